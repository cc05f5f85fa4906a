//! Reading INI files into [`Document`]s.
//!
//! Unlike permissive multi-file readers, a missing file is always an error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::document::Document;
use crate::constants::{COMMENT_PREFIXES, DEFAULT_SECTION, KEY_VALUE_DELIMITERS};
use crate::error::{CakeError, Result};

impl Document {
    /// Loads and parses the INI file at `path`.
    ///
    /// # Errors
    ///
    /// [`CakeError::FileNotFound`] if `path` is missing, not a regular file or
    /// not readable, [`CakeError::Io`] for other read failures and
    /// [`CakeError::Parse`] if it is not valid INI.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CakeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => CakeError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => CakeError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "read config file");
        Self::parse(&contents, path)
    }

    /// Parses INI text. `origin` only labels parse errors.
    ///
    /// Rules: `[name]` opens a section, and text after the closing `]` is
    /// ignored; `key = value` or `key: value` assigns into the current section
    /// (the default section before any header); blank lines and lines starting
    /// with `#` or `;` are skipped; an indented line right after an assignment
    /// continues that value, even if it starts with `#` or `;`. A blank line
    /// always ends a value, so an indented line after it does not continue
    /// it. Repeated keys and sections within one file merge, last value wins.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut doc = Document::new();
        let mut current = DEFAULT_SECTION.to_string();
        let mut last_key: Option<String> = None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() {
                last_key = None;
                continue;
            }
            if raw.starts_with(char::is_whitespace) {
                if let Some(key) = &last_key {
                    let section = doc.section_mut(&current);
                    if let Some(value) = section.get_mut(key) {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(line);
                    }
                    continue;
                }
            }
            if line.starts_with(COMMENT_PREFIXES) {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let close = header
                    .rfind(']')
                    .ok_or_else(|| CakeError::parse(origin, line_no, "unterminated section header"))?;
                let name = header[..close].trim();
                if name.is_empty() {
                    return Err(CakeError::parse(origin, line_no, "empty section name"));
                }
                current = name.to_string();
                doc.section_mut(&current);
                last_key = None;
                continue;
            }

            let Some((key, value)) = line.split_once(KEY_VALUE_DELIMITERS) else {
                return Err(CakeError::parse(
                    origin,
                    line_no,
                    format!("expected `key = value`, found `{}`", line),
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(CakeError::parse(origin, line_no, "missing key before delimiter"));
            }
            doc.set(&current, key, value.trim());
            last_key = Some(key.to_string());
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(text: &str) -> Result<Document> {
        Document::parse(text, &PathBuf::from("test.config"))
    }

    #[test]
    fn test_sections_and_defaults() {
        let doc = parse(
            "top = level\n\
             [DEFAULT]\n\
             key = with default section value\n\
             \n\
             [Foundation]\n\
             key1=key1 from basic configuration\n\
             key2 : key2 from basic configuration\n",
        )
        .unwrap();

        assert_eq!(doc.get(DEFAULT_SECTION, "top"), Some("level"));
        assert_eq!(doc.get(DEFAULT_SECTION, "key"), Some("with default section value"));
        assert_eq!(doc.get("Foundation", "key1"), Some("key1 from basic configuration"));
        assert_eq!(doc.get("Foundation", "key2"), Some("key2 from basic configuration"));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let doc = parse("# comment\n; another\n\n[s]\n  # indented comment\nk = v\n").unwrap();
        assert_eq!(doc.section("s").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = parse("[s]\nk = first\n[other]\nx = 1\n[s]\nk = second\n").unwrap();
        assert_eq!(doc.get("s", "k"), Some("second"));
        assert_eq!(doc.sections().collect::<Vec<_>>(), vec!["s", "other"]);
    }

    #[test]
    fn test_first_delimiter_splits() {
        let doc = parse("[s]\nurl = http://host:80/a=b\ntime: 12:30\n").unwrap();
        assert_eq!(doc.get("s", "url"), Some("http://host:80/a=b"));
        assert_eq!(doc.get("s", "time"), Some("12:30"));
    }

    #[test]
    fn test_keys_with_spaces_and_empty_values() {
        let doc = parse("[New Stuff]\nnew key = v\nempty =\n").unwrap();
        assert_eq!(doc.get("New Stuff", "new key"), Some("v"));
        assert_eq!(doc.get("New Stuff", "empty"), Some(""));
    }

    #[test]
    fn test_continuation_lines() {
        let doc = parse("[s]\nlist = one\n    two\n\tthree\nnext = x\n").unwrap();
        assert_eq!(doc.get("s", "list"), Some("one\ntwo\nthree"));
        assert_eq!(doc.get("s", "next"), Some("x"));
    }

    #[test]
    fn test_case_is_preserved() {
        let doc = parse("[Sec]\nKey = v\n").unwrap();
        assert_eq!(doc.get("Sec", "Key"), Some("v"));
        assert_eq!(doc.get("sec", "key"), None);
    }

    #[test]
    fn test_line_without_delimiter_is_error() {
        let err = parse("[s]\nk = v\njust words\n").unwrap_err();
        match err {
            CakeError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_headers_are_errors() {
        assert!(matches!(parse("[open\n"), Err(CakeError::Parse { line: 1, .. })));
        assert!(matches!(parse("[ ]\n"), Err(CakeError::Parse { line: 1, .. })));
        assert!(matches!(parse("= value\n"), Err(CakeError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_text_after_header_is_ignored() {
        let doc = parse("[sec] ; primary\nk = v\n[other] # note\nx = 1\n").unwrap();
        assert_eq!(doc.get("sec", "k"), Some("v"));
        assert_eq!(doc.get("other", "x"), Some("1"));
        assert_eq!(doc.sections().collect::<Vec<_>>(), vec!["sec", "other"]);
    }

    #[test]
    fn test_header_name_runs_to_last_bracket() {
        let doc = parse("[a]b] trailing\nk = v\n").unwrap();
        assert_eq!(doc.get("a]b", "k"), Some("v"));
    }

    #[test]
    fn test_continuation_keeps_comment_prefixed_lines() {
        let doc = parse("[s]\nnotes = first\n  # kept\n  ; kept too\n# dropped\n").unwrap();
        assert_eq!(doc.get("s", "notes"), Some("first\n# kept\n; kept too"));
    }

    #[test]
    fn test_blank_line_ends_continuation() {
        let err = parse("[s]\nlist = one\n\n    two\n").unwrap_err();
        assert!(matches!(err, CakeError::Parse { line: 4, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.config");
        std::fs::write(&path, "[s]\nk = v\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read_to_string(&path).is_ok() {
            // Running with privileges that ignore file modes.
            return;
        }

        let err = Document::load(&path).unwrap_err();
        assert!(err.is_file_not_found(), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(&dir.path().join("absent.config")).unwrap_err();
        assert!(err.is_file_not_found());
    }

    #[test]
    fn test_load_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path()).unwrap_err();
        assert!(err.is_file_not_found());
    }
}
