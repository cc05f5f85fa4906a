//! Centralized constants for layercake.
//!
//! Reserved section and key names, and parser limits, live here so they can
//! be changed in one place.

/// Name of the implicit section holding keys declared outside any header.
///
/// An explicit `[DEFAULT]` header writes into the same section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Manifest key listing the layer files of a cake, left to right.
pub const LAYERS_KEY: &str = "layers";

/// Separator between entries of the `layers` value.
pub const LAYERS_SEPARATOR: char = ',';

/// Section configuring how environment variable names are derived.
///
/// May live in the manifest or in any layer; it is kept in the cake.
pub const OVERRIDE_INFO_SECTION: &str = "ENVIRONMENT VARIABLE OVERRIDE INFO";

/// Key in [`OVERRIDE_INFO_SECTION`] holding the variable name prefix.
pub const OVERRIDE_PREFIX_KEY: &str = "prefix";

/// Key in [`OVERRIDE_INFO_SECTION`] holding the separator between prefix, section and key.
pub const OVERRIDE_SEPARATOR_KEY: &str = "separator";

/// Separator used for derived variable names when no override info section exists.
pub const DERIVED_NAME_SEPARATOR: char = '_';

/// Characters that start a comment line.
pub const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Characters that separate a key from its value.
pub const KEY_VALUE_DELIMITERS: [char; 2] = ['=', ':'];

/// Maximum nesting of `%(name)s` references before interpolation gives up.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;
