//! The manifest: which layers make up each named cake.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::document::{Document, Section};
use super::paths;
use crate::constants::{DEFAULT_SECTION, LAYERS_KEY, OVERRIDE_INFO_SECTION};
use crate::error::{CakeError, Result};

/// A parsed manifest file.
///
/// Every named section except [`OVERRIDE_INFO_SECTION`] declares a cake.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    base_dir: PathBuf,
    document: Document,
}

/// The layers and extra keys of one cake, ready to be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCake {
    pub name: String,
    /// Layer files in load order, resolved against the manifest's directory.
    pub layers: Vec<PathBuf>,
    /// Every other key of the cake's section, interpolated.
    pub extras: Section,
}

impl Manifest {
    /// Loads the manifest at `path`, expanding a leading `~`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = paths::expand_home(path.as_ref())?;
        let document = Document::load(&path)?;
        let base_dir = paths::parent_dir(&path)?;
        debug!(manifest = %path.display(), base_dir = %base_dir.display(), "loaded manifest");
        Ok(Self {
            path,
            base_dir,
            document,
        })
    }

    /// Path the manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative layer references resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Names of the cakes the manifest declares, in file order.
    pub fn cake_names(&self) -> Vec<&str> {
        self.document
            .sections()
            .filter(|name| *name != OVERRIDE_INFO_SECTION)
            .collect()
    }

    /// The environment override info section, if the manifest has one.
    pub fn override_info(&self) -> Option<&Section> {
        self.document.section(OVERRIDE_INFO_SECTION)
    }

    /// Resolves the cake `name` into its ordered layer paths and extra keys.
    ///
    /// # Errors
    ///
    /// - [`CakeError::MissingSection`] if `name` is not a cake of this manifest
    /// - [`CakeError::MissingKey`] if the cake has no `layers` key
    /// - [`CakeError::EmptyLayers`] if `layers` names no files
    /// - [`CakeError::Interpolation`] if a value has a bad `%(name)s` reference
    pub fn resolve(&self, name: &str) -> Result<ResolvedCake> {
        if name == DEFAULT_SECTION || name == OVERRIDE_INFO_SECTION || !self.document.has_section(name) {
            return Err(CakeError::MissingSection {
                section: name.to_string(),
                path: self.path.clone(),
            });
        }

        let raw_layers = self
            .document
            .get_interpolated(name, LAYERS_KEY)?
            .ok_or_else(|| CakeError::missing_key(name, LAYERS_KEY))?;
        let entries = paths::split_list(&raw_layers);
        if entries.is_empty() {
            return Err(CakeError::EmptyLayers {
                section: name.to_string(),
            });
        }
        let layers = entries
            .into_iter()
            .map(|entry| paths::resolve_against(&self.base_dir, entry))
            .collect::<Result<Vec<_>>>()?;

        let mut extras = Section::new();
        for key in self.document.effective_keys(name) {
            if key == LAYERS_KEY {
                continue;
            }
            if let Some(value) = self.document.get_interpolated(name, key)? {
                extras.insert(key.to_string(), value);
            }
        }

        debug!(cake = name, layers = layers.len(), extras = extras.len(), "resolved cake");
        Ok(ResolvedCake {
            name: name.to_string(),
            layers,
            extras,
        })
    }
}
