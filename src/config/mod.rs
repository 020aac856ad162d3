//! Configuration for bundling operations.
//!
//! Two documents feed a run: the project `package.json`, which supplies the
//! base output directory the runtime loader serves from, and a group-table
//! document (`bundles.json` by default) declaring named bundle groups and
//! global bundler options. The library API can also be handed a fully
//! constructed [`BundleConfig`] directly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::error::{BundleError, Result};

/// Group table: group name to its declared configuration.
pub type GroupTable = BTreeMap<String, GroupSpec>;

/// Recognized builder options plus passthrough for the engine.
///
/// The three recognized flags stay unset (`None`) until defaulting fills
/// them, so a group-level document can distinguish "not given" from an
/// explicit `false`. Everything else lands in `passthrough` and is handed
/// to the engine untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderOptions {
    /// Minify the produced artifact.
    #[serde(default)]
    pub minify: Option<bool>,

    /// Mangle identifiers while minifying.
    #[serde(default)]
    pub mangle: Option<bool>,

    /// Emit source maps next to the artifact.
    #[serde(default)]
    pub source_maps: Option<bool>,

    /// Engine-specific options forwarded without interpretation.
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, serde_json::Value>,
}

impl BuilderOptions {
    /// Returns these options with missing keys filled from `defaults`.
    ///
    /// Keys present here always win; defaults only fill gaps.
    pub fn defaulted_from(&self, defaults: &BuilderOptions) -> BuilderOptions {
        let mut passthrough = defaults.passthrough.clone();
        passthrough.extend(self.passthrough.clone());
        BuilderOptions {
            minify: self.minify.or(defaults.minify),
            mangle: self.mangle.or(defaults.mangle),
            source_maps: self.source_maps.or(defaults.source_maps),
            passthrough,
        }
    }
}

/// A name collection that may be declared as a list or as a map whose keys
/// are the names (map values are ignored).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    /// Ordered list form: `["app/main", "app/util"]`
    Names(Vec<String>),
    /// Keyed form: `{"app/main": {}, "app/util": {}}`
    Keyed(BTreeMap<String, serde_json::Value>),
}

impl NameList {
    /// The declared names, in list order or sorted key order.
    pub fn names(&self) -> Vec<String> {
        match self {
            NameList::Names(names) => names.clone(),
            NameList::Keyed(map) => map.keys().cloned().collect(),
        }
    }

    /// True when no names are declared.
    pub fn is_empty(&self) -> bool {
        match self {
            NameList::Names(names) => names.is_empty(),
            NameList::Keyed(map) => map.is_empty(),
        }
    }
}

impl Default for NameList {
    fn default() -> Self {
        NameList::Names(Vec::new())
    }
}

/// One named group in the group table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    /// Merge all items into a single artifact instead of one per item.
    #[serde(default)]
    pub combine: bool,

    /// Disabled groups (`"bundle": false`) are a recognized skip, not an
    /// error.
    #[serde(default = "default_true")]
    pub bundle: bool,

    /// Bundle-expression items. A name that matches another group is only
    /// meaningful inside `exclude`; items are opaque to the planner.
    #[serde(default)]
    pub items: NameList,

    /// Names to subtract. Group names expand recursively to that group's
    /// items.
    #[serde(default)]
    pub exclude: NameList,

    /// Group builder options, defaulted from the global builder options.
    #[serde(default)]
    pub builder: BuilderOptions,
}

fn default_true() -> bool {
    true
}

/// Global bundler options from the group-table document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundlerOptions {
    /// Directory for bundle artifacts, relative to the base output root.
    pub bundle_dest: PathBuf,

    /// Manifest file name, written at the base output root.
    pub bundle_file: String,

    /// Builder defaults applied to every group.
    pub builder: BuilderOptions,
}

impl Default for BundlerOptions {
    fn default() -> Self {
        Self {
            bundle_dest: PathBuf::from("bundles"),
            bundle_file: "bundles.js".to_string(),
            builder: BuilderOptions {
                minify: Some(false),
                mangle: Some(false),
                source_maps: Some(false),
                passthrough: BTreeMap::new(),
            },
        }
    }
}

/// The group-table document (`bundles.json`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BundleDocument {
    options: BundlerOptions,
    groups: GroupTable,
}

/// Complete configuration for one orchestrator instance.
///
/// Owned, immutable state passed into every operation; nothing here is
/// module-level or mutated after construction.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Resolved absolute base output root. The manifest file and all bundle
    /// artifacts live under this directory, and loader-relative short paths
    /// strip this prefix.
    pub base_url: PathBuf,

    /// Global bundler options.
    pub options: BundlerOptions,

    /// The group table.
    pub groups: GroupTable,
}

impl BundleConfig {
    /// Creates a configuration from already-built parts.
    pub fn new(base_url: PathBuf, options: BundlerOptions, groups: GroupTable) -> Self {
        Self {
            base_url,
            options,
            groups,
        }
    }

    /// Loads configuration for the project at `root`.
    ///
    /// Reads `package.json` for the base output directory (defaulting to
    /// the project root when the file or key is absent) and `groups_file`
    /// for options and the group table. A missing group-table document
    /// yields an empty table with a warning; requesting a bundle against it
    /// then fails fast with [`BundleError::NoGroups`]. A present but
    /// unparsable document is a configuration error.
    pub fn load(root: &Path, groups_file: &Path) -> Result<Self> {
        let doc_path = root.join(groups_file);
        let doc = match std::fs::read_to_string(&doc_path) {
            Ok(text) => serde_json::from_str::<BundleDocument>(&text).map_err(|e| {
                BundleError::Config(format!("cannot parse {}: {e}", doc_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no group table at {}", doc_path.display());
                BundleDocument::default()
            }
            Err(e) => {
                return Err(BundleError::Config(format!(
                    "cannot read {}: {e}",
                    doc_path.display()
                )));
            }
        };

        Ok(Self {
            base_url: resolve_base_url(root)?,
            options: doc.options,
            groups: doc.groups,
        })
    }
}

/// Resolves the base output root from the project `package.json`.
///
/// Honors `jspm.directories.baseURL` first, then `directories.baseURL`.
/// Absence of the file or the key defaults to the project root itself.
fn resolve_base_url(root: &Path) -> Result<PathBuf> {
    let package = root.join("package.json");
    let relative = match std::fs::read_to_string(&package) {
        Ok(text) => serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|doc| base_url_key(&doc))
            .unwrap_or_else(|| ".".to_string()),
        Err(_) => {
            log::debug!("no package.json at {}; using the project root", package.display());
            ".".to_string()
        }
    };
    Ok(root.join(relative).absolutize()?.into_owned())
}

fn base_url_key(doc: &serde_json::Value) -> Option<String> {
    doc.pointer("/jspm/directories/baseURL")
        .or_else(|| doc.pointer("/directories/baseURL"))
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_spec_defaults() {
        let group: GroupSpec = serde_json::from_str(r#"{"combine": true}"#).unwrap();
        assert!(group.combine);
        assert!(group.bundle);
        assert!(group.items.is_empty());
        assert!(group.exclude.is_empty());
        assert_eq!(group.builder.minify, None);
    }

    #[test]
    fn items_accept_list_and_map_forms() {
        let listed: GroupSpec =
            serde_json::from_str(r#"{"items": ["b", "a"]}"#).unwrap();
        assert_eq!(listed.items.names(), vec!["b", "a"]);

        let keyed: GroupSpec =
            serde_json::from_str(r#"{"items": {"b": {}, "a": {"weight": 2}}}"#).unwrap();
        assert_eq!(keyed.items.names(), vec!["a", "b"]);
    }

    #[test]
    fn builder_options_recognize_camel_case_and_passthrough() {
        let group: GroupSpec = serde_json::from_str(
            r#"{"builder": {"minify": true, "sourceMaps": true, "lowResSourceMaps": false}}"#,
        )
        .unwrap();
        assert_eq!(group.builder.minify, Some(true));
        assert_eq!(group.builder.source_maps, Some(true));
        assert_eq!(
            group.builder.passthrough.get("lowResSourceMaps"),
            Some(&serde_json::Value::Bool(false))
        );
    }

    #[test]
    fn defaulting_fills_missing_keys_only() {
        let group = BuilderOptions {
            minify: Some(true),
            ..Default::default()
        };
        let defaults = BundlerOptions::default().builder;
        let effective = group.defaulted_from(&defaults);
        assert_eq!(effective.minify, Some(true));
        assert_eq!(effective.mangle, Some(false));
        assert_eq!(effective.source_maps, Some(false));
    }

    #[test]
    fn document_parses_options_and_groups() {
        let doc: BundleDocument = serde_json::from_str(
            r#"{
                "options": {"bundleDest": "out", "bundleFile": "m.js"},
                "groups": {
                    "app": {"combine": true, "items": ["app/main"]},
                    "vendor": {"combine": true, "items": ["lodash"], "bundle": false}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.options.bundle_dest, PathBuf::from("out"));
        assert_eq!(doc.options.bundle_file, "m.js");
        assert_eq!(doc.groups.len(), 2);
        assert!(!doc.groups["vendor"].bundle);
    }
}
