//! Breadth-first dependency resolution.
//!
//! The resolved order drives script layout, so it is breadth-first in
//! declaration order and deliberately not a topological sort. Cycles are not
//! errors; the visited set ends them.

use std::collections::{BTreeMap, HashSet, VecDeque};

use thiserror::Error;
use tracing::trace;

use crate::registry::ModuleRegistry;

/// Declared dependencies per module, in declaration order.
pub type DependencyGraph = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  /// A referenced module has no body file in any source directory.
  #[error("No such module '{module}'")]
  MissingModule {
    module: String,
    /// Module that declared the dependency; `None` when the root itself is missing.
    required_by: Option<String>,
  },
}

/// Expand `root` into a deduplicated, root-first module list.
///
/// Modules absent from the graph are treated as having no dependencies.
pub fn resolve(root: &str, graph: &DependencyGraph) -> Vec<String> {
  let mut order = vec![root.to_string()];
  let mut visited: HashSet<&str> = HashSet::from([root]);
  let mut queue: VecDeque<&str> = VecDeque::from([root]);

  while let Some(current) = queue.pop_front() {
    let Some(deps) = graph.get(current) else {
      continue;
    };

    for dep in deps {
      if visited.insert(dep.as_str()) {
        trace!(module = current, dependency = %dep, "enqueue dependency");
        order.push(dep.clone());
        queue.push_back(dep.as_str());
      }
    }
  }

  order
}

/// Resolve `root` and check that every module in the result is registered.
///
/// The first unregistered module in breadth-first order is reported.
pub fn resolve_checked(
  root: &str,
  graph: &DependencyGraph,
  registry: &ModuleRegistry,
) -> Result<Vec<String>, ResolveError> {
  if !registry.contains(root) {
    return Err(ResolveError::MissingModule {
      module: root.to_string(),
      required_by: None,
    });
  }

  let order = resolve(root, graph);

  if let Some(missing) = order.iter().find(|name| !registry.contains(name)) {
    let required_by = order
      .iter()
      .find(|name| graph.get(name.as_str()).is_some_and(|deps| deps.contains(missing)))
      .cloned();
    return Err(ResolveError::MissingModule {
      module: missing.clone(),
      required_by,
    });
  }

  Ok(order)
}
