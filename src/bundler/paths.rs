//! Destination and loader-relative path resolution.

use std::path::{Path, PathBuf};

use crate::config::{BuilderOptions, BundleConfig};

/// Computes the on-disk destination for a named bundle.
///
/// Combined groups nest under a subdirectory named after the group; per-item
/// bundles sit flat in the bundle output directory. The file suffix follows
/// the effective minify option.
pub fn bundle_dest(
    config: &BundleConfig,
    name: &str,
    combine: bool,
    options: &BuilderOptions,
) -> PathBuf {
    let suffix = if options.minify.unwrap_or(false) {
        ".min.js"
    } else {
        ".js"
    };
    let file = format!("{name}{suffix}");
    let out_dir = config.base_url.join(&config.options.bundle_dest);
    if combine {
        out_dir.join(name).join(file)
    } else {
        out_dir.join(file)
    }
}

/// Strips the base output root from `dest`, yielding the path the runtime
/// loader will reference the bundle by.
pub fn short_path(config: &BundleConfig, dest: &Path) -> String {
    let relative = dest.strip_prefix(&config.base_url).unwrap_or(dest);
    // loader paths are always forward-slashed
    relative.to_string_lossy().replace('\\', "/")
}

/// Location of the persisted manifest file.
pub fn manifest_path(config: &BundleConfig) -> PathBuf {
    config.base_url.join(&config.options.bundle_file)
}
