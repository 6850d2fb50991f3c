//! Test utilities for unit tests, integration tests and benchmarks.
//!
//! Gated behind `cfg(test)` or the `test-support` feature so none of this
//! ships in production builds.

pub mod fixture_spec;
