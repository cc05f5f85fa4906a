//! Loading config cakes.
//!
//! A manifest names cakes; each cake lists INI layer files that are merged
//! left to right. Loading a cake runs four steps:
//!
//! 1. resolve the cake's layers and extra keys from the manifest
//! 2. merge the layers, later files winning per `(section, key)`
//! 3. copy the extra keys into the default section where no layer set them
//! 4. replace values with matching environment variables
//!
//! Every file must exist. Any failure aborts the load and no partial cake
//! is returned.

mod document;
mod env;
mod interpolate;
mod layering;
mod loader;
mod manifest;
mod paths;

pub use document::{Document, Section};
pub use env::{apply_env_overrides, EnvSource, MockEnv, OverrideNaming, StdEnv};
pub use layering::{build_cake, propagate_extras};
pub use manifest::{Manifest, ResolvedCake};
pub use paths::expand_home;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::{DEFAULT_SECTION, OVERRIDE_INFO_SECTION};
use crate::error::Result;

/// Loads and parses a single INI file.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    Document::load(path.as_ref())
}

/// Resolves the layer paths and extra keys of `cake_name`.
pub fn resolve_layers(manifest_path: impl AsRef<Path>, cake_name: &str) -> Result<(Vec<PathBuf>, Section)> {
    let resolved = Manifest::load(manifest_path)?.resolve(cake_name)?;
    Ok((resolved.layers, resolved.extras))
}

/// Loads the cake `cake_name` from the manifest at `manifest_path`,
/// applying overrides from the process environment.
pub fn load_cake(manifest_path: impl AsRef<Path>, cake_name: &str) -> Result<Document> {
    load_cake_with_env(manifest_path, cake_name, &StdEnv)
}

/// Like [`load_cake`], reading overrides from `env`.
pub fn load_cake_with_env(
    manifest_path: impl AsRef<Path>,
    cake_name: &str,
    env: &dyn EnvSource,
) -> Result<Document> {
    load_cake_into(manifest_path, cake_name, Document::new(), env)
}

/// Like [`load_cake_with_env`], layering on top of `base` instead of an
/// empty document.
///
/// Precedence, lowest first: `base`, the cake's extra keys, the layers.
/// `base` is consumed; on error it is dropped along with the partial cake.
pub fn load_cake_into(
    manifest_path: impl AsRef<Path>,
    cake_name: &str,
    base: Document,
    env: &dyn EnvSource,
) -> Result<Document> {
    let manifest = Manifest::load(manifest_path)?;
    let resolved = manifest.resolve(cake_name)?;

    let mut cake = base;
    let defaults = cake.section_mut(DEFAULT_SECTION);
    for key in resolved.extras.keys() {
        defaults.shift_remove(key);
    }
    if let Some(info) = manifest.override_info() {
        cake.merge_section(OVERRIDE_INFO_SECTION, info.clone());
    }
    layering::layer_onto(&mut cake, &resolved.layers)?;
    propagate_extras(&mut cake, &resolved.extras);
    let cake = apply_env_overrides(cake, env)?;

    info!(
        cake = cake_name,
        manifest = %manifest.path().display(),
        layers = resolved.layers.len(),
        "loaded config cake"
    );
    Ok(cake)
}
