//! Project configuration.
//!
//! A project is a directory holding the module library and an optional
//! `splice.toml`. Every field has a default, so the file only needs to list
//! what differs:
//!
//! ```toml
//! source_dirs = ["main", "utility", "lib"]
//! output_dir = "build"
//! extension = "cs"
//! script_name = "Script"
//! strip = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_FILENAME, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_SCRIPT_NAME, DEFAULT_SOURCE_DIRS};

/// Errors that can occur while loading the project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The config file exists but could not be read.
  #[error("failed to read config '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The config file is not valid TOML or has unexpected fields.
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("source_dirs must list at least one directory")]
  NoSourceDirs,

  #[error("extension must not be empty")]
  EmptyExtension,

  #[error("extension '{0}' must not contain a dot")]
  DottedExtension(String),

  #[error("script_name must not be empty")]
  EmptyScriptName,
}

/// Typed project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Module directories in scan order. Relative entries resolve against the project root.
  pub source_dirs: Vec<PathBuf>,
  /// Root of the generated scripts.
  pub output_dir: PathBuf,
  /// Fragment file extension, without the leading dot.
  pub extension: String,
  /// File stem of every generated script.
  pub script_name: String,
  /// Strip mode unless overridden on the command line.
  pub strip: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_dirs: DEFAULT_SOURCE_DIRS.iter().map(PathBuf::from).collect(),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      extension: DEFAULT_EXTENSION.to_string(),
      script_name: DEFAULT_SCRIPT_NAME.to_string(),
      strip: false,
    }
  }
}

impl Config {
  /// Load `splice.toml` from the project root.
  ///
  /// A missing file yields the defaults. A present file is parsed and validated.
  pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
    let path = project_root.join(CONFIG_FILENAME);

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Self::default());
      }
      Err(source) => return Err(ConfigError::Read { path, source }),
    };

    debug!(path = %path.display(), "loading config");
    Self::from_toml_str(&content)
  }

  /// Parse and validate configuration text.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Check required fields.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.source_dirs.is_empty() {
      return Err(ConfigError::NoSourceDirs);
    }
    if self.extension.is_empty() {
      return Err(ConfigError::EmptyExtension);
    }
    if self.extension.contains('.') {
      return Err(ConfigError::DottedExtension(self.extension.clone()));
    }
    if self.script_name.is_empty() {
      return Err(ConfigError::EmptyScriptName);
    }
    Ok(())
  }

  /// Source directories resolved against the project root, in scan order.
  pub fn source_paths(&self, project_root: &Path) -> Vec<PathBuf> {
    self.source_dirs.iter().map(|dir| project_root.join(dir)).collect()
  }

  /// Where the script for an output target is written: `<output_dir>/<target>/<script_name>.<ext>`.
  pub fn output_path(&self, project_root: &Path, target: &str) -> PathBuf {
    project_root
      .join(&self.output_dir)
      .join(target)
      .join(format!("{}.{}", self.script_name, self.extension))
  }
}
