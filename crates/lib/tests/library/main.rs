//! Library integration tests: full pipeline runs against fixture trees.

mod common;
mod spec_tests;
