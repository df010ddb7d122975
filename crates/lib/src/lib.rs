//! splice-lib: assembles single-file scripts from a library of fragments.
//!
//! This crate provides the pieces of the build pipeline:
//! - `ModuleRegistry`: module name to owning directory, scanned once per run
//! - `metadata`: output target and dependency directives from a module's header comments
//! - `resolve`: breadth-first dependency expansion of a root module
//! - `assemble`: header/footer/body chunk ordering and text normalization
//! - `Project`: orchestration of the above for every root in the library

pub mod assemble;
pub mod config;
pub mod consts;
pub mod metadata;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod spec;
pub mod version;
pub mod write;

pub use config::Config;
pub use pipeline::{BuildError, BuildOptions, BuildReport, BuildUnit, Project, Root};
pub use registry::{Fragment, ModuleRegistry};
pub use spec::BuildSpec;
pub use version::{FixedVersion, GitVersion, VersionProvider, detect_version};
