//! Group planning: one group's declaration into concrete build requests.

use std::path::PathBuf;

use crate::config::{BuilderOptions, BundleConfig};
use crate::error::{BundleError, Result};

use super::{exclusion, paths};

/// A single engine invocation to perform.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Bundle arithmetic expression handed to the engine.
    pub expression: String,

    /// Absolute artifact destination.
    pub dest: PathBuf,

    /// Loader-relative path the artifact is tracked under.
    pub short_path: String,

    /// Effective builder options: the group's own, defaulted from the
    /// global builder options.
    pub options: BuilderOptions,

    /// Name used in progress output (the group for combined bundles, the
    /// item otherwise).
    pub label: String,
}

/// Outcome of planning one group.
#[derive(Debug)]
pub enum GroupPlan {
    /// Group is declared with `"bundle": false`; a recognized no-op.
    Skip,
    /// Engine requests to run, in declared order.
    Build(Vec<BuildRequest>),
}

/// Plans the named group into build requests.
///
/// An unknown group name is an error, distinct from a disabled group which
/// plans as [`GroupPlan::Skip`]. Combined groups produce exactly one
/// request joining the items with `" + "`; individual groups produce one
/// request per item. The exclusion suffix is resolved once and shared by
/// every request of the group.
pub fn plan_group(config: &BundleConfig, name: &str) -> Result<GroupPlan> {
    let group = config
        .groups
        .get(name)
        .ok_or_else(|| BundleError::GroupNotFound(name.to_string()))?;

    if !group.bundle {
        return Ok(GroupPlan::Skip);
    }

    let mut options = group.builder.defaulted_from(&config.options.builder);
    // the engine never splits CSS out of a bundle
    options
        .passthrough
        .entry("separateCSS".to_string())
        .or_insert(serde_json::Value::Bool(false));

    let minus = exclusion::exclusion_suffix(&group.exclude, &config.groups)?;
    let items = group.items.names();

    let requests = if group.combine {
        let dest = paths::bundle_dest(config, name, true, &options);
        vec![BuildRequest {
            expression: format!("{}{minus}", items.join(" + ")),
            short_path: paths::short_path(config, &dest),
            dest,
            options,
            label: name.to_string(),
        }]
    } else {
        items
            .iter()
            .map(|item| {
                let dest = paths::bundle_dest(config, item, false, &options);
                BuildRequest {
                    expression: format!("{item}{minus}"),
                    short_path: paths::short_path(config, &dest),
                    dest,
                    options: options.clone(),
                    label: item.clone(),
                }
            })
            .collect()
    };

    Ok(GroupPlan::Build(requests))
}
