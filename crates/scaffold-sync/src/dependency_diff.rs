//
// dependency_diff.rs
//
// Compares the wired dependency names with the class's current constructor
//

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One constructor parameter of the class-under-test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredDependency {
    pub name: String,
    /// Declared type as written, not used for diffing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl DesiredDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }

    pub fn with_type(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
        }
    }
}

/// Wired names that are no longer constructor parameters, in order of first
/// appearance.
pub fn stale_names<'a>(wired: &[&'a str], desired: &[DesiredDependency]) -> IndexSet<&'a str> {
    wired
        .iter()
        .copied()
        .filter(|name| !desired.iter().any(|d| d.name == *name))
        .collect()
}

/// Constructor parameters the setup function does not wire yet.
///
/// Only reported; adding wiring is not supported.
pub fn unwired_dependencies<'d>(
    wired: &[&str],
    desired: &'d [DesiredDependency],
) -> Vec<&'d DesiredDependency> {
    desired
        .iter()
        .filter(|d| !wired.contains(&d.name.as_str()))
        .collect()
}
