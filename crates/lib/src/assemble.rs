//! Chunk assembly and text normalization.
//!
//! A script is a sequence of chunks:
//!
//! 1. the version banner
//! 2. the strip notice, in strip mode
//! 3. every module's header, in resolved order
//! 4. every module's footer, in reverse resolved order
//! 5. every module's body, in resolved order
//!
//! Footers are reversed so that header/footer pairs used as scope delimiters
//! nest properly. Empty chunks are dropped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use crate::consts::{BANNER_LABEL, COMMENT_MARKER, STRIP_NOTICE, TERMINATOR};
use crate::registry::{Fragment, ModuleRegistry};

#[derive(Debug, Error)]
pub enum AssembleError {
  #[error("failed to read fragment '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("module '{0}' is not registered")]
  Unregistered(String),
}

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleOptions {
  /// Remove indentation, blank lines and (bodies only) whole-line comments.
  pub strip: bool,
}

/// Two-line provenance banner naming the version and the modules in order.
pub fn banner(version: &str, modules: &[String]) -> String {
  format!(
    "// {} {}{}// Modules: {}{}",
    BANNER_LABEL,
    version,
    TERMINATOR,
    modules.join(", "),
    TERMINATOR
  )
}

/// Normalize fragment text line by line.
///
/// Trailing whitespace is always removed and every line ends with
/// [`TERMINATOR`]. In strip mode, indentation is removed, lines left empty
/// are dropped and, when `drop_comments` is set, whole-line comments too.
pub fn normalize(text: &str, strip: bool, drop_comments: bool) -> String {
  let mut out = String::with_capacity(text.len() + text.len() / 16);

  for line in split_lines(text) {
    let mut line = line.trim_end();

    if strip {
      line = line.trim_start();
      if line.is_empty() || (drop_comments && line.starts_with(COMMENT_MARKER)) {
        continue;
      }
    }

    out.push_str(line);
    out.push_str(TERMINATOR);
  }

  out
}

/// Split on `\n`, `\r\n` or a lone `\r`. A trailing break does not start a new line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
  let mut rest = text;
  std::iter::from_fn(move || {
    if rest.is_empty() {
      return None;
    }
    match rest.find(['\r', '\n']) {
      Some(pos) => {
        let line = &rest[..pos];
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
        Some(line)
      }
      None => {
        let line = rest;
        rest = "";
        Some(line)
      }
    }
  })
}

/// Read and normalize one fragment file.
///
/// Returns `None` when the file does not exist or normalizes to nothing.
pub fn load_chunk(path: &Path, strip: bool, drop_comments: bool) -> Result<Option<String>, AssembleError> {
  let text = match fs::read_to_string(path) {
    Ok(text) => text,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      trace!(path = %path.display(), "fragment absent");
      return Ok(None);
    }
    Err(source) => {
      return Err(AssembleError::Read {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  let chunk = normalize(&text, strip, drop_comments);
  if chunk.is_empty() {
    trace!(path = %path.display(), "fragment empty after normalization");
    return Ok(None);
  }
  Ok(Some(chunk))
}

/// Build the ordered chunk list for a resolved module sequence.
pub fn assemble(
  modules: &[String],
  registry: &ModuleRegistry,
  version: &str,
  options: AssembleOptions,
) -> Result<Vec<String>, AssembleError> {
  let mut chunks = vec![banner(version, modules)];

  if options.strip {
    chunks.push(format!("{}{}", STRIP_NOTICE, TERMINATOR));
  }

  let load = |name: &String, fragment: Fragment| -> Result<Option<String>, AssembleError> {
    let path = registry
      .fragment_path(name, fragment)
      .ok_or_else(|| AssembleError::Unregistered(name.clone()))?;
    load_chunk(&path, options.strip, fragment == Fragment::Body)
  };

  for name in modules {
    chunks.extend(load(name, Fragment::Header)?);
  }
  for name in modules.iter().rev() {
    chunks.extend(load(name, Fragment::Footer)?);
  }
  for name in modules {
    chunks.extend(load(name, Fragment::Body)?);
  }

  debug!(modules = modules.len(), chunks = chunks.len(), strip = options.strip, "assembled script");
  Ok(chunks)
}
