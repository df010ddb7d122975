//! CLI integration tests: real builds through the `splice` binary.

mod build_tests;
mod common;
mod spec_tests;
