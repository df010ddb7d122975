//! Explicit build specs.
//!
//! A spec file names the exact module list and output path of one script,
//! bypassing directive discovery:
//!
//! ```toml
//! [script]
//! modules = ["shipcontrol", "eventdriver", "warship"]
//! out = "out/Warship/Script.cs"
//! ```
//!
//! The listed order is used as-is; dependencies are not expanded.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
  #[error("failed to read spec '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse spec: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("spec lists no modules")]
  NoModules,

  #[error("spec lists an empty module name")]
  EmptyModuleName,

  #[error("spec lists module '{0}' more than once")]
  DuplicateModule(String),

  #[error("spec has an empty output path")]
  EmptyOutput,
}

/// A validated build spec.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSpec {
  pub script: ScriptSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptSpec {
  /// Modules in emission order.
  pub modules: Vec<String>,
  /// Output file, relative to the project root.
  pub out: PathBuf,
}

impl BuildSpec {
  pub fn load(path: &Path) -> Result<Self, SpecError> {
    let content = fs::read_to_string(path).map_err(|source| SpecError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content)
  }

  pub fn from_toml_str(content: &str) -> Result<Self, SpecError> {
    let mut spec: BuildSpec = toml::from_str(content)?;
    for module in &mut spec.script.modules {
      *module = module.trim().to_string();
    }
    spec.validate()?;
    Ok(spec)
  }

  pub fn validate(&self) -> Result<(), SpecError> {
    if self.script.modules.is_empty() {
      return Err(SpecError::NoModules);
    }

    let mut seen = HashSet::new();
    for module in &self.script.modules {
      if module.is_empty() {
        return Err(SpecError::EmptyModuleName);
      }
      if !seen.insert(module.as_str()) {
        return Err(SpecError::DuplicateModule(module.clone()));
      }
    }

    if self.script.out.as_os_str().is_empty() {
      return Err(SpecError::EmptyOutput);
    }
    Ok(())
  }

  pub fn modules(&self) -> &[String] {
    &self.script.modules
  }

  /// Output path resolved against the project root.
  pub fn output_path(&self, project_root: &Path) -> PathBuf {
    project_root.join(&self.script.out)
  }
}
