//! Environment variable overrides for an assembled cake.
//!
//! Every `(section, key)` already in the cake maps to one variable name. If
//! that variable is set, its value replaces the cake's. Overrides never add
//! keys or sections.
//!
//! Variable names come from the [`OVERRIDE_INFO_SECTION`] when the cake has
//! one (`{prefix}{separator}{section}{separator}{key}`, verbatim), and are
//! derived otherwise (`{SECTION}_{KEY}`, uppercased, with every character
//! that is not ASCII alphanumeric replaced by `_`).

use indexmap::IndexMap;
use tracing::debug;

use super::document::Document;
use crate::constants::{
    DERIVED_NAME_SEPARATOR, OVERRIDE_INFO_SECTION, OVERRIDE_PREFIX_KEY, OVERRIDE_SEPARATOR_KEY,
};
use crate::error::{CakeError, Result};

/// Source of environment variables.
///
/// Lets tests supply a fixed environment instead of mutating the process's.
pub trait EnvSource {
    /// Get the value of an environment variable by name.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: IndexMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock environment from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// How a `(section, key)` pair maps to an environment variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideNaming {
    /// `{prefix}{separator}{section}{separator}{key}`, case preserved.
    Prefixed { prefix: String, separator: String },
    /// `{SECTION}_{KEY}`, uppercased, non-alphanumerics replaced by `_`.
    Derived,
}

impl OverrideNaming {
    /// Picks the naming scheme configured by `doc`'s override info section.
    ///
    /// # Errors
    ///
    /// [`CakeError::MissingKey`] if the section exists without `prefix` or `separator`.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let Some(info) = doc.section(OVERRIDE_INFO_SECTION) else {
            return Ok(Self::Derived);
        };
        let field = |key: &str| {
            info.get(key)
                .cloned()
                .ok_or_else(|| CakeError::missing_key(OVERRIDE_INFO_SECTION, key))
        };
        Ok(Self::Prefixed {
            prefix: field(OVERRIDE_PREFIX_KEY)?,
            separator: field(OVERRIDE_SEPARATOR_KEY)?,
        })
    }

    /// The variable name that overrides `key` in `section`.
    pub fn variable_name(&self, section: &str, key: &str) -> String {
        match self {
            Self::Prefixed { prefix, separator } => {
                format!("{prefix}{separator}{section}{separator}{key}")
            }
            Self::Derived => format!("{section}{DERIVED_NAME_SEPARATOR}{key}")
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        DERIVED_NAME_SEPARATOR
                    }
                })
                .collect(),
        }
    }
}

/// Replaces values of `doc` with any matching environment variables.
///
/// Every lookup is made against the names of the pairs present on entry, so
/// no override depends on another. The override info section itself is left
/// alone.
pub fn apply_env_overrides(mut doc: Document, env: &dyn EnvSource) -> Result<Document> {
    let naming = OverrideNaming::from_document(&doc)?;

    let overrides: Vec<(String, String, String)> = doc
        .pairs()
        .into_iter()
        .filter(|(section, _)| section != OVERRIDE_INFO_SECTION)
        .filter_map(|(section, key)| {
            let name = naming.variable_name(&section, &key);
            env.get(&name).map(|value| {
                debug!(variable = %name, section = %section, key = %key, "environment override");
                (section, key, value)
            })
        })
        .collect();

    for (section, key, value) in overrides {
        doc.set(&section, key, value);
    }
    Ok(doc)
}
