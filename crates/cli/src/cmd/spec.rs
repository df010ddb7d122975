//! Implementation of the `splice spec` command.
//!
//! Builds scripts from explicit spec files instead of directive discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use splice_lib::{BuildOptions, BuildSpec, Project, detect_version};

use crate::output::{print_script, print_success};

pub fn cmd_spec(project_dir: &Path, files: &[PathBuf], strip: bool) -> Result<()> {
  let project =
    Project::load(project_dir).with_context(|| format!("Failed to open project: {}", project_dir.display()))?;

  let options = BuildOptions {
    strip: strip || project.config().strip,
    ..BuildOptions::default()
  };
  let version = detect_version(project.root());

  for file in files {
    let spec = BuildSpec::load(file).with_context(|| format!("Invalid spec: {}", file.display()))?;
    let report = project
      .build_spec(&spec, &options, version.as_ref())
      .with_context(|| format!("Failed to build spec: {}", file.display()))?;

    let path = report
      .output
      .strip_prefix(project.root())
      .unwrap_or(&report.output);
    print_script(&report.target, &path.display().to_string(), report.bytes as u64);
  }

  println!();
  print_success(&format!("Built {} script(s) from specs", files.len()));
  Ok(())
}
