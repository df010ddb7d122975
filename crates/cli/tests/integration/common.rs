//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Version pinned for every test so banners are deterministic.
pub const TEST_VERSION: &str = "test-0000";

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Project root (canonicalized so it matches paths the binary prints).
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) -> &Self {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    self
  }

  /// Read a file relative to the project root.
  pub fn read_file(&self, relative_path: &str) -> String {
    let path = self.temp.path().join(relative_path);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// Get a pre-configured Command for the splice binary.
  ///
  /// Points `-C` at the project and pins `SPLICE_BUILD_VERSION`.
  pub fn splice_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("splice");
    cmd.arg("-C").arg(self.root());
    cmd.env("SPLICE_BUILD_VERSION", TEST_VERSION);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
