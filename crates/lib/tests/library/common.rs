//! Shared helpers for library integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use splice_lib::{Config, Project};
use tempfile::TempDir;

/// A throwaway module library.
pub struct Library {
  pub temp: TempDir,
}

impl Library {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the library root, creating parents.
  pub fn write(&self, relative_path: &str, content: &str) -> &Self {
    let path = self.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    self
  }

  /// Open with the given scan order.
  pub fn open(&self, dirs: &[&str]) -> Project {
    let config = Config {
      source_dirs: dirs.iter().map(PathBuf::from).collect(),
      ..Config::default()
    };
    Project::open(self.path(), config).unwrap()
  }

  /// Read a generated script for an output target.
  pub fn script(&self, target: &str) -> String {
    let path = self.path().join("out").join(target).join("Script.cs");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing script {}: {}", path.display(), e))
  }
}
