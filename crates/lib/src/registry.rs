//! Module registry.
//!
//! Maps every module name to the directory holding its fragments. A module
//! is registered by its body file `<name>.<ext>`; the optional prologue and
//! epilogue (`<name>-header.<ext>`, `<name>-footer.<ext>`) are probed lazily
//! when a script is assembled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::consts::{FOOTER_SUFFIX, HEADER_SUFFIX};

/// One of the three files a module may contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
  /// `<name>-header.<ext>`, emitted before everything else.
  Header,
  /// `<name>-footer.<ext>`, emitted after all headers in reverse module order.
  Footer,
  /// `<name>.<ext>`, the module's main content.
  Body,
}

impl Fragment {
  /// Suffix appended to the module name to form the file stem.
  pub fn suffix(self) -> &'static str {
    match self {
      Fragment::Header => HEADER_SUFFIX,
      Fragment::Footer => FOOTER_SUFFIX,
      Fragment::Body => "",
    }
  }

  /// File name of this fragment for a module.
  pub fn file_name(self, module: &str, extension: &str) -> String {
    format!("{}{}.{}", module, self.suffix(), extension)
  }
}

/// Immutable mapping from module name to owning directory.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
  modules: BTreeMap<String, PathBuf>,
  extension: String,
}

impl ModuleRegistry {
  /// Scan the given directories in order.
  ///
  /// Only the top level of each directory is read. A name found again in a
  /// later directory replaces the earlier entry. Missing or unreadable
  /// directories contribute nothing.
  pub fn scan(directories: &[PathBuf], extension: &str) -> Self {
    let mut modules = BTreeMap::new();

    for dir in directories {
      let mut found = 0usize;

      for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
      {
        if !entry.file_type().is_file() {
          continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
          continue;
        };
        let Some(name) = module_name(file_name, extension) else {
          continue;
        };

        if let Some(previous) = modules.insert(name.to_string(), dir.clone()) {
          debug!(module = name, previous = %previous.display(), current = %dir.display(), "module overridden");
        } else {
          trace!(module = name, dir = %dir.display(), "registered module");
        }
        found += 1;
      }

      debug!(dir = %dir.display(), modules = found, "scanned source directory");
    }

    Self {
      modules,
      extension: extension.to_string(),
    }
  }

  /// Build a registry from explicit entries.
  pub fn from_entries<I, S>(entries: I, extension: &str) -> Self
  where
    I: IntoIterator<Item = (S, PathBuf)>,
    S: Into<String>,
  {
    Self {
      modules: entries.into_iter().map(|(name, dir)| (name.into(), dir)).collect(),
      extension: extension.to_string(),
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.modules.contains_key(name)
  }

  /// Directory owning the module, if registered.
  pub fn dir(&self, name: &str) -> Option<&Path> {
    self.modules.get(name).map(PathBuf::as_path)
  }

  /// Path a fragment of the module would have. The file may not exist.
  pub fn fragment_path(&self, name: &str, fragment: Fragment) -> Option<PathBuf> {
    self
      .dir(name)
      .map(|dir| dir.join(fragment.file_name(name, &self.extension)))
  }

  /// Registered module names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.modules.keys().map(String::as_str)
  }

  pub fn extension(&self) -> &str {
    &self.extension
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

/// Module name for a body file, or `None` for prologues, epilogues and foreign files.
fn module_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
  let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
  if stem.is_empty() || stem.ends_with(HEADER_SUFFIX) || stem.ends_with(FOOTER_SUFFIX) {
    return None;
  }
  Some(stem)
}
