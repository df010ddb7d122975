//! Build orchestration.
//!
//! A [`Project`] is opened once per run: the registry is scanned, every
//! module's metadata is read to form the dependency graph, and the roots are
//! collected. Each root is then planned, assembled and written in turn; the
//! first failure aborts the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assemble::{AssembleError, AssembleOptions, assemble};
use crate::config::{Config, ConfigError};
use crate::metadata::{self, ExtractError};
use crate::registry::{Fragment, ModuleRegistry};
use crate::resolve::{DependencyGraph, ResolveError, resolve_checked};
use crate::spec::{BuildSpec, SpecError};
use crate::version::VersionProvider;
use crate::write::{WriteError, join_chunks, write_script};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Extract(#[from] ExtractError),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Assemble(#[from] AssembleError),

  #[error(transparent)]
  Write(#[from] WriteError),

  #[error(transparent)]
  Spec(#[from] SpecError),

  /// `--only` named a target no root declares.
  #[error("no root module declares output target '{0}'")]
  UnknownTarget(String),

  /// A `//!` name that would not stay a single directory under the output dir.
  #[error("module '{module}' declares invalid output target '{target}'")]
  InvalidTarget { module: String, target: String },
}

/// A target names one directory directly under the output dir.
fn is_plain_target(target: &str) -> bool {
  !matches!(target, "." | "..")
    && !target.contains(['/', '\\'])
    && !Path::new(target).has_root()
    && Path::new(target).components().count() == 1
}

/// A root module and the target it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Root {
  pub module: String,
  pub target: String,
}

/// Everything needed to assemble one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildUnit {
  pub target: String,
  /// Root first, then dependencies in breadth-first declaration order.
  pub modules: Vec<String>,
  pub output: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  pub strip: bool,
  /// Plan and assemble without writing.
  pub dry_run: bool,
  /// Restrict the build to these output targets. Empty builds every root.
  pub only: Vec<String>,
}

/// Outcome of one script build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub target: String,
  pub output: PathBuf,
  pub modules: Vec<String>,
  /// Size of the script; computed but not written on a dry run.
  pub bytes: usize,
  pub written: bool,
}

/// A scanned module library.
#[derive(Debug)]
pub struct Project {
  root: PathBuf,
  config: Config,
  registry: ModuleRegistry,
  graph: DependencyGraph,
  roots: Vec<Root>,
}

impl Project {
  /// Load `splice.toml` from `root` and open the project.
  pub fn load(root: &Path) -> Result<Self, BuildError> {
    let config = Config::load(root)?;
    Self::open(root, config)
  }

  /// Scan the source directories and read every module's directives.
  pub fn open(root: &Path, config: Config) -> Result<Self, BuildError> {
    config.validate()?;
    let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    let registry = ModuleRegistry::scan(&config.source_paths(&root), &config.extension);

    let mut graph = DependencyGraph::new();
    let mut roots = Vec::new();

    for name in registry.names() {
      let Some(body) = registry.fragment_path(name, Fragment::Body) else {
        continue;
      };
      let meta = metadata::extract(&body)?;

      if let Some(target) = meta.target {
        if !is_plain_target(&target) {
          return Err(BuildError::InvalidTarget {
            module: name.to_string(),
            target,
          });
        }
        debug!(module = name, script = %target, "found root module");
        roots.push(Root {
          module: name.to_string(),
          target,
        });
      }
      graph.insert(name.to_string(), meta.dependencies);
    }

    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for r in &roots {
      if let Some(previous) = seen.insert(r.target.as_str(), r.module.as_str()) {
        warn!(script = %r.target, previous, module = %r.module, "output target declared twice, later root overwrites");
      }
    }

    info!(modules = registry.len(), roots = roots.len(), "opened project");

    Ok(Self {
      root,
      config,
      registry,
      graph,
      roots,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn registry(&self) -> &ModuleRegistry {
    &self.registry
  }

  pub fn graph(&self) -> &DependencyGraph {
    &self.graph
  }

  /// Root modules ordered by module name.
  pub fn roots(&self) -> &[Root] {
    &self.roots
  }

  /// Resolve a root into a build unit. Fails before anything is read if a
  /// referenced module is not registered.
  pub fn plan(&self, root: &Root) -> Result<BuildUnit, BuildError> {
    let modules = resolve_checked(&root.module, &self.graph, &self.registry)?;
    Ok(BuildUnit {
      target: root.target.clone(),
      output: self.config.output_path(&self.root, &root.target),
      modules,
    })
  }

  /// Build every selected root, strictly in sequence.
  pub fn build_all(
    &self,
    options: &BuildOptions,
    version: &dyn VersionProvider,
  ) -> Result<Vec<BuildReport>, BuildError> {
    let selected = self.select_roots(&options.only)?;
    let version = version.current_version();

    let mut reports = Vec::with_capacity(selected.len());
    for root in selected {
      let unit = self.plan(root)?;
      reports.push(self.build_unit(&unit, options, &version)?);
    }
    Ok(reports)
  }

  /// Build the script described by an explicit spec.
  pub fn build_spec(
    &self,
    spec: &BuildSpec,
    options: &BuildOptions,
    version: &dyn VersionProvider,
  ) -> Result<BuildReport, BuildError> {
    spec.validate()?;
    if let Some(missing) = spec.modules().iter().find(|m| !self.registry.contains(m)) {
      return Err(
        ResolveError::MissingModule {
          module: missing.clone(),
          required_by: None,
        }
        .into(),
      );
    }

    let output = spec.output_path(&self.root);
    let target = output
      .parent()
      .and_then(Path::file_name)
      .map(|n| n.to_string_lossy().into_owned())
      .or_else(|| spec.modules().first().cloned())
      .unwrap_or_default();

    let unit = BuildUnit {
      target,
      modules: spec.modules().to_vec(),
      output,
    };
    self.build_unit(&unit, options, &version.current_version())
  }

  fn build_unit(&self, unit: &BuildUnit, options: &BuildOptions, version: &str) -> Result<BuildReport, BuildError> {
    let chunks = assemble(
      &unit.modules,
      &self.registry,
      version,
      AssembleOptions { strip: options.strip },
    )?;

    let bytes = if options.dry_run {
      join_chunks(&chunks).len()
    } else {
      write_script(&chunks, &unit.output)?
    };

    info!(
      script = %unit.target,
      path = %unit.output.display(),
      modules = unit.modules.len(),
      bytes,
      dry_run = options.dry_run,
      "built script"
    );

    Ok(BuildReport {
      target: unit.target.clone(),
      output: unit.output.clone(),
      modules: unit.modules.clone(),
      bytes,
      written: !options.dry_run,
    })
  }

  fn select_roots(&self, only: &[String]) -> Result<Vec<&Root>, BuildError> {
    if only.is_empty() {
      return Ok(self.roots.iter().collect());
    }

    for target in only {
      if !self.roots.iter().any(|r| &r.target == target) {
        return Err(BuildError::UnknownTarget(target.clone()));
      }
    }
    Ok(self.roots.iter().filter(|r| only.contains(&r.target)).collect())
  }
}
