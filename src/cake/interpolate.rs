//! `%(name)s` value interpolation.

use super::document::Document;
use crate::constants::MAX_INTERPOLATION_DEPTH;
use crate::error::{CakeError, Result};

impl Document {
    /// Looks up `key` like [`Document::get`] and expands references in it.
    ///
    /// `%(name)s` is replaced by the value of `name` from the same section
    /// (or the defaults), recursively; `%%` yields a literal `%`.
    ///
    /// # Errors
    ///
    /// [`CakeError::Interpolation`] for references to missing keys, malformed
    /// references, or nesting deeper than [`MAX_INTERPOLATION_DEPTH`].
    pub fn get_interpolated(&self, section: &str, key: &str) -> Result<Option<String>> {
        match self.get(section, key) {
            Some(raw) => self.expand(section, key, raw, 1).map(Some),
            None => Ok(None),
        }
    }

    fn expand(&self, section: &str, key: &str, raw: &str, depth: usize) -> Result<String> {
        let fail = |message: String| CakeError::Interpolation {
            section: section.to_string(),
            key: key.to_string(),
            message,
        };
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(fail(format!(
                "references nest deeper than {}",
                MAX_INTERPOLATION_DEPTH
            )));
        }

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(after) = rest.strip_prefix("%%") {
                out.push('%');
                rest = after;
            } else if let Some(after) = rest.strip_prefix("%(") {
                let end = after
                    .find(")s")
                    .ok_or_else(|| fail(format!("unterminated reference in `{}`", raw)))?;
                let name = &after[..end];
                let value = self
                    .get(section, name)
                    .ok_or_else(|| fail(format!("references missing key `{}`", name)))?;
                out.push_str(&self.expand(section, name, value, depth + 1)?);
                rest = &after[end + 2..];
            } else {
                return Err(fail("`%` must be followed by `%` or `(`".to_string()));
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}
