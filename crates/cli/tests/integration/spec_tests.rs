//! Tests for `splice spec`.

use predicates::prelude::*;

use super::common::{TEST_VERSION, TestEnv};

#[test]
fn spec_builds_listed_modules() {
  let env = TestEnv::new();
  env
    .write_file("lib/a.cs", "A\n")
    .write_file("lib/b.cs", "B\n")
    .write_file("specs/x.toml", "[script]\nmodules = [\"b\", \"a\"]\nout = \"out/X/Script.cs\"\n");

  env
    .splice_cmd()
    .arg("spec")
    .arg(env.root().join("specs/x.toml"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 script(s)"));

  assert_eq!(
    env.read_file("out/X/Script.cs"),
    format!("// Built by splice {}\r\n// Modules: b, a\r\n\r\nB\r\n\r\nA\r\n", TEST_VERSION)
  );
}

#[test]
fn invalid_spec_fails() {
  let env = TestEnv::new();
  env.write_file("specs/bad.toml", "[script]\nmodules = []\nout = \"out/X/Script.cs\"\n");

  env
    .splice_cmd()
    .arg("spec")
    .arg(env.root().join("specs/bad.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("no modules"));
}

#[test]
fn spec_with_missing_module_fails() {
  let env = TestEnv::new();
  env.write_file("specs/x.toml", "[script]\nmodules = [\"ghost\"]\nout = \"out/X/Script.cs\"\n");

  env
    .splice_cmd()
    .arg("spec")
    .arg(env.root().join("specs/x.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("No such module 'ghost'"));

  assert!(!env.exists("out"));
}
