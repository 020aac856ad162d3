//! Artifact checksum calculation.
//!
//! Bundle artifacts are fingerprinted with SHA-256 so the runtime loader
//! can decide whether a cached bundle is still valid.

use std::collections::BTreeMap;
use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::Result;

use super::sequencer::BuiltBundle;

/// Computes a checksum per built bundle, keyed by loader-relative path.
///
/// Each artifact is read from the base output root plus its short path.
/// A bundle whose artifact cannot be read is logged and omitted from the
/// result; its manifest entry later defaults to an empty checksum. One
/// failure never aborts the computation for the others.
pub async fn checksum_bundles(
    base_url: &Path,
    bundles: &[BuiltBundle],
) -> BTreeMap<String, String> {
    let mut sums = BTreeMap::new();
    log::info!("calculating checksums...");

    for bundle in bundles {
        let artifact = base_url.join(&bundle.path);
        match file_sha256(&artifact).await {
            Ok(sum) => {
                log::info!(" ✔ {} {sum}", bundle.path);
                sums.insert(bundle.path.clone(), sum);
            }
            Err(e) => log::warn!("checksum failed for {}: {e}", bundle.path),
        }
    }

    sums
}

/// SHA-256 of a single file, hex encoded.
///
/// Reads in 8 KiB chunks to handle large artifacts without loading them
/// whole.
pub async fn file_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
