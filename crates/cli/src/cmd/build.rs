//! Implementation of the `splice build` command.
//!
//! Discovers every root module in the project and writes one script per
//! output target.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use splice_lib::{BuildOptions, Project, detect_version};

use crate::output::{
  OutputFormat, format_duration, print_info, print_json, print_script, print_stat, print_success, print_warning,
};

pub fn cmd_build(project_dir: &Path, options: BuildOptions, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let project =
    Project::load(project_dir).with_context(|| format!("Failed to open project: {}", project_dir.display()))?;

  let options = BuildOptions {
    strip: options.strip || project.config().strip,
    ..options
  };

  if project.roots().is_empty() {
    if output.is_json() {
      print_json(&Vec::<()>::new())?;
    } else {
      print_warning("No root modules found (no module declares an output target)");
    }
    return Ok(());
  }

  let version = detect_version(project.root());
  let reports = project.build_all(&options, version.as_ref())?;

  if output.is_json() {
    print_json(&reports)?;
    return Ok(());
  }

  for report in &reports {
    let path = report
      .output
      .strip_prefix(project.root())
      .unwrap_or(&report.output);
    print_script(&report.target, &path.display().to_string(), report.bytes as u64);
  }

  println!();
  if options.dry_run {
    print_info("Dry run - no scripts written");
  } else {
    print_success("Build complete!");
  }
  print_stat("Scripts", &reports.len().to_string());
  print_stat("Strip mode", if options.strip { "on" } else { "off" });
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
