//
// lib.rs
//
// Update engine for generated TypeScript test scaffolds.
//
// Given the constructor parameters a class takes now and the text of its
// existing generated spec file, `update` returns the removal edits that drop
// stale dependencies from the spec's `setup()` helper. The binary in main.rs
// wires this to the file system through `cli::sync`.

pub mod class_reader;
pub mod cli;
pub mod config;
pub mod dependency_diff;
pub mod edit;
pub mod error;
pub mod instantiation;
pub mod parser_pool;
pub mod patch;
pub mod removal_planner;
pub mod separator;
pub mod setup_locator;
pub mod syntax;
pub mod update;
// test_utils is available in test builds and when the `test-support` feature is enabled.
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use class_reader::{read_class_signature, ClassSignature};
pub use config::{SeparatorPolicy, UpdateConfig};
pub use dependency_diff::DesiredDependency;
pub use edit::Edit;
pub use error::{ClassReadError, PatchError, UpdateError};
pub use patch::apply_edits;
pub use update::{plan_update, update, update_with_config, UpdatePlan};
