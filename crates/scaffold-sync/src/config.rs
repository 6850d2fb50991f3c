//
// config.rs
//
// Configuration for updating an existing spec file
//

use serde::{Deserialize, Serialize};

/// Default marker the generated setup helper's name starts with.
pub const DEFAULT_SETUP_PREFIX: &str = "setup";

/// How a removed node takes the comma next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorPolicy {
    /// Absorb the next comma token; a removal that empties the tail of a list
    /// absorbs the comma before it instead, so no dangling comma is left.
    #[default]
    ListAware,
    /// Absorb the single character right after the node if it is a comma.
    /// Removing the last element of a list leaves the previous comma behind.
    NextChar,
}

/// Update pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Name prefix identifying the setup function
    pub setup_prefix: String,
    /// Comma handling for removed nodes
    pub separator_policy: SeparatorPolicy,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            setup_prefix: DEFAULT_SETUP_PREFIX.to_string(),
            separator_policy: SeparatorPolicy::ListAware,
        }
    }
}
