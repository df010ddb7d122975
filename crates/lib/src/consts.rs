//! Fixed markers and defaults shared across the pipeline.

/// Line terminator mandated by the target runtime, independent of the host.
pub const TERMINATOR: &str = "\r\n";

/// Whole-line comment marker of the target language.
pub const COMMENT_MARKER: &str = "//";

/// Declares the module as a root and names its output target.
pub const TARGET_DIRECTIVE: &str = "//!";

/// Declares one or more whitespace-separated dependencies.
pub const DEPENDS_DIRECTIVE: &str = "//@";

pub const HEADER_SUFFIX: &str = "-header";
pub const FOOTER_SUFFIX: &str = "-footer";

pub const DEFAULT_EXTENSION: &str = "cs";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_SCRIPT_NAME: &str = "Script";

/// Scanned in order; a module found in a later directory replaces an earlier one.
pub const DEFAULT_SOURCE_DIRS: &[&str] = &[
  "main",
  "standalone",
  "misc",
  "weapon",
  "largeship",
  "smallship",
  "utility",
  "lib",
];

pub const CONFIG_FILENAME: &str = "splice.toml";

/// Version reported when no working copy can be inspected.
pub const UNKNOWN_VERSION: &str = "UNKNOWN";

/// Overrides the detected version when set to a non-empty value.
pub const VERSION_ENV_VAR: &str = "SPLICE_BUILD_VERSION";

pub const BANNER_LABEL: &str = "Built by splice";

pub const STRIP_NOTICE: &str = "// NOTE: Leading whitespace stripped to save space.";
