//! Entry point for updating an existing generated spec file.
//!
//! ```text
//! parse → find setup* → find `new Class(...)` → diff names → plan removals → emit edits
//! ```
//!
//! Every stage is a pure function of its inputs. Nothing is read from or
//! written to disk here; the caller supplies the content and applies the
//! returned edits (see [`crate::patch::apply_edits`]).

use std::path::Path;

use crate::config::UpdateConfig;
use crate::dependency_diff::{stale_names, unwired_dependencies, DesiredDependency};
use crate::edit::{emit_edits, Edit};
use crate::error::UpdateError;
use crate::instantiation::{find_instantiation, wired_identifiers};
use crate::removal_planner::plan_removals;
use crate::setup_locator::find_setup_function;
use crate::syntax;

/// Edits that remove every dependency of `class_name` no longer present in
/// `dependencies` from the setup function of `content`.
///
/// Uses [`UpdateConfig::default`]. An empty result means the file is already
/// in sync.
pub fn update(
    path: &Path,
    content: &str,
    dependencies: &[DesiredDependency],
    class_name: &str,
) -> Result<Vec<Edit>, UpdateError> {
    update_with_config(path, content, dependencies, class_name, &UpdateConfig::default())
}

pub fn update_with_config(
    path: &Path,
    content: &str,
    dependencies: &[DesiredDependency],
    class_name: &str,
    config: &UpdateConfig,
) -> Result<Vec<Edit>, UpdateError> {
    plan_update(path, content, dependencies, class_name, config).map(|plan| plan.edits)
}

/// Everything [`update`] works out about a spec file, for callers that
/// report more than the edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Name of the setup function that was found.
    pub setup: String,
    pub wired: Vec<String>,
    pub stale: Vec<String>,
    /// Constructor parameters with no wiring yet. Never edited.
    pub unwired: Vec<DesiredDependency>,
    pub edits: Vec<Edit>,
}

pub fn plan_update(
    path: &Path,
    content: &str,
    dependencies: &[DesiredDependency],
    class_name: &str,
    config: &UpdateConfig,
) -> Result<UpdatePlan, UpdateError> {
    let tree = syntax::parse(path, content);

    let setup = find_setup_function(&tree, &config.setup_prefix).ok_or_else(|| {
        UpdateError::SetupNotFound {
            path: path.to_path_buf(),
            prefix: config.setup_prefix.clone(),
        }
    })?;
    log::trace!("{}: setup function\n{}", path.display(), syntax::dump(setup.node));

    let instantiation = find_instantiation(setup.node, class_name).ok_or_else(|| {
        UpdateError::InstantiationNotFound {
            path: path.to_path_buf(),
            setup: setup.name.to_string(),
            class_name: class_name.to_string(),
        }
    })?;

    let wired = wired_identifiers(instantiation);
    let stale = stale_names(&wired, dependencies);
    let unwired = unwired_dependencies(&wired, dependencies);
    log::debug!(
        "{}: `{}` wires {:?}, stale {:?}, unwired {}",
        path.display(),
        setup.name,
        wired,
        stale,
        unwired.len()
    );

    let removals = plan_removals(setup.node, &stale, config.separator_policy);
    let edits = emit_edits(path, content, &removals);

    Ok(UpdatePlan {
        setup: setup.name.to_string(),
        wired: wired.iter().map(|name| name.to_string()).collect(),
        stale: stale.iter().map(|name| name.to_string()).collect(),
        unwired: unwired.into_iter().cloned().collect(),
        edits,
    })
}
