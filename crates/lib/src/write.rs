//! Script output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::TERMINATOR;

#[derive(Debug, Error)]
pub enum WriteError {
  #[error("failed to create output directory '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write script '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Join chunks with a blank line between each. Empty chunks contribute nothing.
pub fn join_chunks(chunks: &[String]) -> String {
  let parts: Vec<&str> = chunks.iter().map(String::as_str).filter(|c| !c.is_empty()).collect();
  parts.join(TERMINATOR)
}

/// Write the joined chunks to `path`, replacing any existing file.
///
/// Parent directories are created as needed. Content goes to a sibling temp
/// file first and is renamed into place, so a failure never leaves a
/// truncated script behind. Returns the number of bytes written.
pub fn write_script(chunks: &[String], path: &Path) -> Result<usize, WriteError> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }

  let content = join_chunks(chunks);

  let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
  temp_name.push(".tmp");
  let temp_path = path.with_file_name(temp_name);

  let write_err = |source| WriteError::Write {
    path: path.to_path_buf(),
    source,
  };
  fs::write(&temp_path, content.as_bytes()).map_err(write_err)?;
  if let Err(source) = fs::rename(&temp_path, path) {
    let _ = fs::remove_file(&temp_path);
    return Err(write_err(source));
  }

  debug!(path = %path.display(), bytes = content.len(), "wrote script");
  Ok(content.len())
}
