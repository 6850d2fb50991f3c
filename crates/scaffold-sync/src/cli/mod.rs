//! Command-line front end.
//!
//! - `sync`: walks class files, updates their companion spec files

pub mod sync;
