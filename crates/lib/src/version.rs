//! Version stamping for the script banner.
//!
//! The pipeline only sees a [`VersionProvider`]; whether the string comes
//! from the git working copy or a fixed value is decided by the caller.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::consts::{UNKNOWN_VERSION, VERSION_ENV_VAR};

/// Number of hex digits of the commit id shown in the banner.
const SHORT_ID_LEN: usize = 12;

/// Supplies the opaque version string interpolated into every banner.
pub trait VersionProvider {
  fn current_version(&self) -> String;
}

/// A version that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVersion(pub String);

impl Default for FixedVersion {
  fn default() -> Self {
    Self(UNKNOWN_VERSION.to_string())
  }
}

impl VersionProvider for FixedVersion {
  fn current_version(&self) -> String {
    self.0.clone()
  }
}

/// Abbreviated HEAD commit of the git working copy containing `path`.
///
/// Falls back to [`UNKNOWN_VERSION`] when there is no repository or HEAD
/// cannot be resolved (e.g. an unborn branch).
#[derive(Debug, Clone)]
pub struct GitVersion {
  path: PathBuf,
}

impl GitVersion {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  fn head_id(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let repo = gix::discover(&self.path)?;
    let id = repo.head_id()?;
    Ok(id.detach().to_hex_with_len(SHORT_ID_LEN).to_string())
  }
}

impl VersionProvider for GitVersion {
  fn current_version(&self) -> String {
    match self.head_id() {
      Ok(id) => {
        debug!(path = %self.path.display(), version = %id, "resolved version from git");
        id
      }
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "no usable git working copy, version unknown");
        UNKNOWN_VERSION.to_string()
      }
    }
  }
}

/// Pick the provider for a project.
///
/// A non-empty `SPLICE_BUILD_VERSION` pins the version; otherwise git is queried.
pub fn detect_version(project_root: &Path) -> Box<dyn VersionProvider> {
  match std::env::var(VERSION_ENV_VAR) {
    Ok(version) if !version.trim().is_empty() => {
      debug!(version = %version, "version pinned by environment");
      Box::new(FixedVersion(version.trim().to_string()))
    }
    _ => Box::new(GitVersion::new(project_root)),
  }
}
