//! Tests for `splice build` and `splice list`.

use predicates::prelude::*;

use super::common::{TEST_VERSION, TestEnv};

fn alpha_project() -> TestEnv {
  let env = TestEnv::new();
  env
    .write_file("main/a.cs", "//! Alpha\n//@ b\nprint A\n")
    .write_file("lib/b.cs", "print B\n");
  env
}

#[test]
fn build_writes_script_per_root() {
  let env = alpha_project();
  env.write_file("main/c.cs", "//! Gamma\nprint C\n");

  env
    .splice_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Alpha"))
    .stdout(predicate::str::contains("Gamma"))
    .stdout(predicate::str::contains("Build complete"));

  assert_eq!(
    env.read_file("out/Alpha/Script.cs"),
    format!(
      "// Built by splice {}\r\n// Modules: a, b\r\n\r\n//! Alpha\r\n//@ b\r\nprint A\r\n\r\nprint B\r\n",
      TEST_VERSION
    )
  );
  assert!(env.exists("out/Gamma/Script.cs"));
}

#[test]
fn build_missing_module_fails_with_name() {
  let env = TestEnv::new();
  env.write_file("main/a.cs", "//! Alpha\n//@ zebra\nprint A\n");

  env
    .splice_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No such module 'zebra'"));

  assert!(!env.exists("out/Alpha/Script.cs"));
}

#[test]
fn strip_flag_compacts_output() {
  let env = TestEnv::new();
  env.write_file("main/a.cs", "//! Alpha\n\n    // helper\n    int x;\n");

  env.splice_cmd().args(["build", "--strip"]).assert().success();

  let script = env.read_file("out/Alpha/Script.cs");
  assert!(script.contains("// NOTE: Leading whitespace stripped"));
  assert!(script.ends_with("\r\n\r\nint x;\r\n"));
  assert!(!script.contains("helper"));
}

#[test]
fn config_enables_strip_and_custom_layout() {
  let env = TestEnv::new();
  env
    .write_file(
      "splice.toml",
      "source_dirs = [\"scripts\"]\noutput_dir = \"dist\"\nscript_name = \"Program\"\nstrip = true\n",
    )
    .write_file("scripts/a.cs", "//! Alpha\n    int x;\n");

  env.splice_cmd().arg("build").assert().success();

  let script = env.read_file("dist/Alpha/Program.cs");
  assert!(script.ends_with("int x;\r\n"));
  assert!(script.contains("// NOTE:"));
}

#[test]
fn dry_run_writes_nothing() {
  let env = alpha_project();

  env
    .splice_cmd()
    .args(["build", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(!env.exists("out"));
}

#[test]
fn only_selects_targets() {
  let env = alpha_project();
  env.write_file("main/c.cs", "//! Gamma\nprint C\n");

  env.splice_cmd().args(["build", "--only", "Gamma"]).assert().success();
  assert!(env.exists("out/Gamma/Script.cs"));
  assert!(!env.exists("out/Alpha"));

  env
    .splice_cmd()
    .args(["build", "--only", "Delta"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Delta"));
}

#[test]
fn build_json_reports() {
  let env = alpha_project();

  env
    .splice_cmd()
    .args(["build", "--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"target\": \"Alpha\""))
    .stdout(predicate::str::contains("\"written\": true"));
}

#[test]
fn list_shows_resolved_order() {
  let env = alpha_project();

  env
    .splice_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("Alpha"))
    .stdout(predicate::str::contains("a, b"));

  assert!(!env.exists("out"));
}
