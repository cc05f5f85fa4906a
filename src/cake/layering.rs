//! Stacking layer files into one document.

use std::path::Path;

use tracing::debug;

use super::document::{Document, Section};
use crate::error::Result;

/// Loads `layers` in order and merges them into a fresh document.
///
/// Later layers win at `(section, key)` granularity. The first missing or
/// malformed layer aborts the build.
pub fn build_cake<P: AsRef<Path>>(layers: &[P]) -> Result<Document> {
    let mut cake = Document::new();
    layer_onto(&mut cake, layers)?;
    Ok(cake)
}

/// Loads `layers` in order and merges each one on top of `cake`.
pub(crate) fn layer_onto<P: AsRef<Path>>(cake: &mut Document, layers: &[P]) -> Result<()> {
    for (index, path) in layers.iter().enumerate() {
        let path = path.as_ref();
        let layer = Document::load(path)?;
        debug!(index, layer = %path.display(), "merging layer");
        cake.merge(layer);
    }
    Ok(())
}

/// Copies `extras` into the default section of `cake`.
///
/// Keys the layers already set in the default section keep their layered
/// value. Returns how many keys were written.
pub fn propagate_extras(cake: &mut Document, extras: &Section) -> usize {
    let mut written = 0;
    for (key, value) in extras {
        if cake.set_default_if_absent(key, value) {
            written += 1;
        }
    }
    written
}
