//! Top-level bundle and unbundle operations.

use crate::config::BundleConfig;
use crate::error::{BundleError, Result};

use super::engine::BundleEngine;
use super::manifest::ManifestStore;
use super::planner::{self, GroupPlan};
use super::sequencer::{self, BuiltBundle};
use super::{checksum, paths};

/// Coordinates group planning, engine runs, checksums, and manifest state.
///
/// The orchestrator owns its configuration and a handle to the external
/// bundling engine. Groups are processed strictly in request order, one
/// engine call in flight at a time, and the persisted manifest is updated
/// exactly once per operation.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use bundlekit::{BundleConfig, Bundler, ProcessEngine};
///
/// # async fn example() -> bundlekit::Result<()> {
/// let config = BundleConfig::load(Path::new("."), Path::new("bundles.json"))?;
/// let bundler = Bundler::new(config, ProcessEngine::new("jspm"));
///
/// // Build every configured group.
/// bundler.bundle(None).await?;
///
/// // Remove one group from the manifest.
/// bundler.unbundle(Some(&["app".to_string()])).await?;
/// # Ok(())
/// # }
/// ```
pub struct Bundler<E> {
    config: BundleConfig,
    engine: E,
    store: ManifestStore,
}

impl<E> Bundler<E> {
    /// Creates a bundler over `config` and `engine`.
    pub fn new(config: BundleConfig, engine: E) -> Self {
        let store = ManifestStore::new(paths::manifest_path(&config));
        Self {
            config,
            engine,
            store,
        }
    }

    /// The configuration this bundler operates on.
    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Removes groups from the persisted manifest.
    ///
    /// With `None`, the whole manifest is wiped without consulting the
    /// group table. With names, each combined group contributes its single
    /// short path and each individual group one short path per item; an
    /// unknown name is logged and skipped without affecting its siblings.
    /// Artifacts on disk are left in place.
    pub async fn unbundle(&self, groups: Option<&[String]>) -> Result<()> {
        log::info!("-- unbundling -----------");

        let Some(groups) = groups else {
            log::info!("removing all bundles...");
            return self.store.persist(None).await;
        };

        let mut removed = Vec::new();
        for name in groups {
            let Some(group) = self.config.groups.get(name) else {
                log::error!("cannot unbundle unknown group: {name}");
                continue;
            };
            let options = group.builder.defaulted_from(&self.config.options.builder);
            if group.combine {
                let dest = paths::bundle_dest(&self.config, name, true, &options);
                removed.push(paths::short_path(&self.config, &dest));
            } else {
                for item in group.items.names() {
                    let dest = paths::bundle_dest(&self.config, &item, false, &options);
                    removed.push(paths::short_path(&self.config, &dest));
                }
            }
        }

        for path in &removed {
            log::info!(" ✔ removed: {path}");
        }

        let mut manifest = self.store.load().await;
        manifest.prune(removed.iter().map(String::as_str));
        self.store.persist(Some(&manifest)).await
    }
}

impl<E: BundleEngine> Bundler<E> {
    /// Builds the requested groups and folds the results into the
    /// persisted manifest.
    ///
    /// `None` builds every configured group. An empty group table fails
    /// fast with [`BundleError::NoGroups`] before any I/O. A group that
    /// cannot be planned, or a build request the engine rejects, is logged
    /// and skipped; the remaining work still runs and the manifest update
    /// happens exactly once at the end with whatever completed.
    ///
    /// Returns the successfully built bundles.
    pub async fn bundle(&self, groups: Option<&[String]>) -> Result<Vec<BuiltBundle>> {
        if self.config.groups.is_empty() {
            return Err(BundleError::NoGroups);
        }

        log::info!("-- bundling -------------");

        let names: Vec<String> = match groups {
            Some(names) => names.to_vec(),
            None => self.config.groups.keys().cloned().collect(),
        };

        let mut completed = Vec::new();
        for name in &names {
            match planner::plan_group(&self.config, name) {
                Ok(GroupPlan::Skip) => log::info!("skipping: {name}"),
                Ok(GroupPlan::Build(requests)) => {
                    log::info!("bundling group: {name} ...");
                    completed.extend(sequencer::run_requests(&self.engine, &requests).await);
                }
                Err(e) => log::error!("cannot bundle {name}: {e}"),
            }
        }

        let chksums = checksum::checksum_bundles(&self.config.base_url, &completed).await;
        let mut manifest = self.store.load().await;
        manifest.merge(&completed, &chksums);
        self.store.persist(Some(&manifest)).await?;

        log::info!("-- complete -------------");
        Ok(completed)
    }
}
