//! Builds from explicit spec files.

use splice_lib::pipeline::BuildError;
use splice_lib::resolve::ResolveError;
use splice_lib::{BuildOptions, BuildSpec, FixedVersion};

use super::common::Library;

#[test]
fn spec_uses_listed_order_without_expansion() {
  let lib = Library::new();
  lib
    .write("lib/a.cs", "//@ c\nA\n")
    .write("lib/b.cs", "B\n")
    .write("lib/c.cs", "C\n")
    .write("specs/x.toml", "[script]\nmodules = [\"b\", \"a\"]\nout = \"out/X/Script.cs\"\n");

  let project = lib.open(&["lib"]);
  let spec = BuildSpec::load(&lib.path().join("specs/x.toml")).unwrap();
  let report = project
    .build_spec(&spec, &BuildOptions::default(), &FixedVersion("v".to_string()))
    .unwrap();

  assert_eq!(report.modules, vec!["b", "a"]);
  assert_eq!(report.target, "X");
  assert_eq!(
    lib.script("X"),
    "// Built by splice v\r\n// Modules: b, a\r\n\r\nB\r\n\r\n//@ c\r\nA\r\n"
  );
}

#[test]
fn spec_with_unknown_module_fails() {
  let lib = Library::new();
  lib.write("lib/a.cs", "A\n");

  let project = lib.open(&["lib"]);
  let spec = BuildSpec::from_toml_str("[script]\nmodules = [\"a\", \"nope\"]\nout = \"out/X/Script.cs\"\n").unwrap();
  let err = project
    .build_spec(&spec, &BuildOptions::default(), &FixedVersion::default())
    .unwrap_err();

  assert!(matches!(
    err,
    BuildError::Resolve(ResolveError::MissingModule { ref module, .. }) if module == "nope"
  ));
  assert!(!lib.path().join("out").exists());
}
