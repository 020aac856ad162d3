//! Ordered execution of build requests against the engine.

use super::engine::BundleEngine;
use super::planner::BuildRequest;

/// A successfully produced artifact.
#[derive(Debug, Clone)]
pub struct BuiltBundle {
    /// Loader-relative short path.
    pub path: String,

    /// Module identifiers included in the artifact.
    pub modules: Vec<String>,
}

/// Runs requests strictly in declared order, one engine call at a time.
///
/// The destination's parent directory is created before each call. A
/// failing request is logged and produces no artifact; the remaining
/// requests still run.
pub async fn run_requests<E: BundleEngine + ?Sized>(
    engine: &E,
    requests: &[BuildRequest],
) -> Vec<BuiltBundle> {
    let mut completed = Vec::new();

    for request in requests {
        if let Some(parent) = request.dest.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                log::error!("cannot create {}: {e}", parent.display());
                continue;
            }
        }

        match engine
            .build(&request.expression, &request.dest, &request.options)
            .await
        {
            Ok(output) => {
                log::info!(" ✔ bundled: {}", request.label);
                completed.push(BuiltBundle {
                    path: request.short_path.clone(),
                    modules: output.modules,
                });
            }
            Err(e) => {
                log::error!("build failed for {}: {e}", request.label);
            }
        }
    }

    completed
}
