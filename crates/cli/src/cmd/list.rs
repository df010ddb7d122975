//! Implementation of the `splice list` command.
//!
//! Shows every root module with its output target and resolved module
//! order without building anything.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use splice_lib::{BuildUnit, Project};

use crate::output::{OutputFormat, print_json, print_stat, symbols};

pub fn cmd_list(project_dir: &Path, output: OutputFormat) -> Result<()> {
  let project =
    Project::load(project_dir).with_context(|| format!("Failed to open project: {}", project_dir.display()))?;

  let units = project
    .roots()
    .iter()
    .map(|root| project.plan(root))
    .collect::<Result<Vec<BuildUnit>, _>>()?;

  if output.is_json() {
    return print_json(&units);
  }

  for (root, unit) in project.roots().iter().zip(&units) {
    println!(
      "{} {} {}",
      symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
      unit.target.if_supports_color(Stream::Stdout, |s| s.bold()),
      format!("({})", root.module).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
    print_stat("Modules", &unit.modules.join(", "));
  }

  println!();
  print_stat("Registered modules", &project.registry().len().to_string());
  print_stat("Roots", &units.len().to_string());
  Ok(())
}
