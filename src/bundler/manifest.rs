//! Persisted bundle manifest: load, merge, prune, persist.
//!
//! The manifest is the single source of truth for which bundles exist and
//! their validity fingerprints. On disk it is a small script the runtime
//! module loader executes directly: it registers the checksum and bundle
//! mappings on `module.exports` and hands the bundle map to
//! `System.config` for module resolution. This store re-extracts the two
//! embedded JSON bodies when the tool runs again.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, Result};

use super::sequencer::BuiltBundle;

/// The bundle→modules and bundle→checksum mappings consumed by the runtime
/// module loader.
///
/// The two key sets move in lockstep: every merged bundle gets a checksum
/// entry, defaulting to an empty string when checksum computation was
/// skipped or failed for that artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Loader-relative bundle path to the modules it contains.
    pub bundles: BTreeMap<String, Vec<String>>,

    /// Loader-relative bundle path to its content checksum.
    pub chksums: BTreeMap<String, String>,
}

impl Manifest {
    /// True when neither mapping has entries.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty() && self.chksums.is_empty()
    }

    /// Folds built bundles and their checksums into the manifest.
    ///
    /// Entries are keyed by path, later writes winning, so re-merging the
    /// same bundle list is idempotent.
    pub fn merge(&mut self, bundles: &[BuiltBundle], chksums: &BTreeMap<String, String>) {
        for bundle in bundles {
            self.bundles
                .insert(bundle.path.clone(), bundle.modules.clone());
            self.chksums.insert(
                bundle.path.clone(),
                chksums.get(&bundle.path).cloned().unwrap_or_default(),
            );
        }
    }

    /// Drops both mappings' entries for each path. Absent paths are a
    /// no-op.
    pub fn prune<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for path in paths {
            self.bundles.remove(path);
            self.chksums.remove(path);
        }
    }
}

/// On-disk manifest access.
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Creates a store around the manifest file location.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The manifest file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the manifest, substituting an empty one when the file is
    /// missing or unreadable.
    ///
    /// A missing manifest is the normal first-run state; it is logged as a
    /// warning, never an error, and the file is not created by loading.
    pub async fn load(&self) -> Manifest {
        match self.try_load().await {
            Ok(manifest) => manifest,
            Err(e) => {
                log::warn!("no usable manifest at {}: {e}", self.path.display());
                Manifest::default()
            }
        }
    }

    async fn try_load(&self) -> Result<Manifest> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(Manifest {
            bundles: extract_map(&text, "bundles")?,
            chksums: extract_map(&text, "chksums")?,
        })
    }

    /// Writes the loader-consumable manifest file.
    ///
    /// `None` writes the empty-shaped manifest, which is how "remove all
    /// bundles" is realized. The written file evaluates cleanly even when
    /// both mappings are empty.
    pub async fn persist(&self, manifest: Option<&Manifest>) -> Result<()> {
        log::info!("updating manifest...");
        let empty = Manifest::default();
        let manifest = manifest.unwrap_or(&empty);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, render(manifest)?).await?;

        log::info!(" ✔ manifest updated");
        Ok(())
    }
}

fn render(manifest: &Manifest) -> Result<String> {
    let chksums = tab_json(&manifest.chksums)?;
    let bundles = tab_json(&manifest.bundles)?;
    Ok(format!(
        "(function(module){{\n  \
         var chksums = module.exports.chksums = {chksums};\n  \
         var bundles = module.exports.bundles = {bundles};\n  \
         System.config({{bundles: bundles}});\n\
         }})((typeof module !== \"undefined\") ? module : {{exports: {{}}}});"
    ))
}

fn tab_json<T: Serialize>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn extract_map<T>(text: &str, key: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let pattern = format!(r"(?s)module\.exports\.{key}\s*=\s*(\{{.*?\}});");
    let re = Regex::new(&pattern)
        .map_err(|e| BundleError::Config(format!("manifest pattern for {key}: {e}")))?;
    let body = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| BundleError::Config(format!("manifest is missing the {key} mapping")))?;
    Ok(serde_json::from_str(body)?)
}
