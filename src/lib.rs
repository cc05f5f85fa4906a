//! Layered INI configuration, driven by a manifest.
//!
//! A manifest file declares named cakes. Each cake lists the layer files to
//! merge, left to right:
//!
//! ```ini
//! [env1]
//! layers = base.config, staging.config
//!
//! [env2]
//! layers = base.config, demo.config
//! keyA = valueA
//! ```
//!
//! [`load_cake`] merges the layers (later files win per `(section, key)`),
//! copies the cake's extra keys into the default section, and applies
//! environment variable overrides. Every referenced file must exist.

pub mod cake;
pub mod constants;
mod error;

pub use cake::{
    apply_env_overrides, build_cake, load_cake, load_cake_into, load_cake_with_env, load_document,
    propagate_extras, resolve_layers, Document, EnvSource, Manifest, MockEnv, OverrideNaming,
    ResolvedCake, Section, StdEnv,
};
pub use error::{CakeError, Result};
