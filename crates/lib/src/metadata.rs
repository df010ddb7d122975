//! Directive extraction from a module's leading comment block.
//!
//! Only the contiguous run of blank and comment lines at the top of a body
//! fragment is inspected. The first line of code ends the block; directives
//! further down the file are ordinary comments.
//!
//! ```text
//! //! Warship Manager
//! //@ shipcontrol eventdriver
//! //@ safemode
//! public class ...
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::consts::{COMMENT_MARKER, DEPENDS_DIRECTIVE, TARGET_DIRECTIVE};

#[derive(Debug, Error)]
#[error("failed to read module metadata from '{path}': {source}")]
pub struct ExtractError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

/// Directives declared by one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMetadata {
  /// Output target name; present only for root modules.
  pub target: Option<String>,
  /// Declared dependencies in order of appearance, duplicates preserved.
  pub dependencies: Vec<String>,
}

impl ModuleMetadata {
  pub fn is_root(&self) -> bool {
    self.target.is_some()
  }
}

/// Read the metadata block of a body fragment.
pub fn extract(body: &Path) -> Result<ModuleMetadata, ExtractError> {
  let file = File::open(body).map_err(|source| ExtractError {
    path: body.to_path_buf(),
    source,
  })?;
  parse(BufReader::new(file)).map_err(|source| ExtractError {
    path: body.to_path_buf(),
    source,
  })
}

/// Parse metadata from any line source.
pub fn parse<R: BufRead>(reader: R) -> io::Result<ModuleMetadata> {
  let mut metadata = ModuleMetadata::default();

  for line in reader.lines() {
    let line = line?;
    let line = line.trim();

    if line.is_empty() {
      continue;
    }
    if !line.starts_with(COMMENT_MARKER) {
      break;
    }

    if let Some(rest) = line.strip_prefix(TARGET_DIRECTIVE) {
      let target = rest.trim();
      if target.is_empty() {
        warn!("ignoring output target directive without a name");
      } else {
        metadata.target = Some(target.to_string());
      }
    } else if let Some(rest) = line.strip_prefix(DEPENDS_DIRECTIVE) {
      metadata
        .dependencies
        .extend(rest.split_whitespace().map(str::to_string));
    }
  }

  Ok(metadata)
}
