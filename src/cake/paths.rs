//! Path handling for manifests and layer references.

use std::path::{Path, PathBuf};

use crate::constants::LAYERS_SEPARATOR;
use crate::error::{CakeError, Result};

/// Expands a leading `~` component to the current user's home directory.
///
/// Paths without a leading `~` are returned unchanged; `~user` forms are
/// not expanded.
///
/// # Errors
///
/// Returns [`CakeError::NoHomeDir`] if the home directory cannot be determined.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or(CakeError::NoHomeDir)?;
    if rest.as_os_str().is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Resolves one layer reference against the manifest's directory.
///
/// Absolute references (after `~` expansion) are kept as they are.
pub fn resolve_against(base_dir: &Path, reference: &str) -> Result<PathBuf> {
    let expanded = expand_home(Path::new(reference))?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

/// Splits a `layers` value into trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(LAYERS_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Returns the absolute directory containing `file`.
pub fn parent_dir(file: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(file).map_err(|source| CakeError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" a.config ,b.config,, "), vec!["a.config", "b.config"]);
        assert!(split_list(" , ,").is_empty());
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_relative_reference_joins_base() {
        let base = Path::new("/etc/cakes");
        assert_eq!(
            resolve_against(base, "layers/base.config").unwrap(),
            PathBuf::from("/etc/cakes/layers/base.config")
        );
    }

    #[test]
    fn test_absolute_reference_is_kept() {
        let base = Path::new("/etc/cakes");
        assert_eq!(
            resolve_against(base, "/srv/other.config").unwrap(),
            PathBuf::from("/srv/other.config")
        );
    }

    #[test]
    fn test_home_expansion() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~")).unwrap(), home);
        assert_eq!(
            resolve_against(Path::new("/ignored"), "~/x.config").unwrap(),
            home.join("x.config")
        );
        assert_eq!(
            expand_home(Path::new("not/~/home")).unwrap(),
            PathBuf::from("not/~/home")
        );
    }

    #[test]
    fn test_parent_dir_is_absolute() {
        let dir = parent_dir(Path::new("manifest.config")).unwrap();
        assert!(dir.is_absolute());
        assert_eq!(dir, std::env::current_dir().unwrap());
    }
}
