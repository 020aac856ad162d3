//! Bundle-group orchestration.
//!
//! Turns a declarative table of named groups into engine build requests,
//! runs them in order, fingerprints the produced artifacts, and keeps the
//! persisted loader manifest in step with what was built.
//!
//! # Overview
//!
//! One `bundle` operation flows:
//!
//! 1. [`planner`] resolves each requested group into build requests,
//!    flattening exclusions via [`exclusion`] and computing destinations
//!    via [`paths`]
//! 2. [`sequencer`] runs the requests against the [`engine`] in declared
//!    order
//! 3. [`checksum`] fingerprints every produced artifact
//! 4. [`manifest`] merges results and checksums into the persisted
//!    manifest in a single update
//!
//! `unbundle` runs the inverse: group names resolve to short paths, which
//! are pruned from the manifest; with no names the manifest is wiped.

pub mod checksum;
pub mod engine;
pub mod exclusion;
pub mod manifest;
pub mod paths;
pub mod planner;
pub mod sequencer;

mod orchestrator;

pub use engine::{BuildOutput, BundleEngine, ProcessEngine};
pub use manifest::{Manifest, ManifestStore};
pub use orchestrator::Bundler;
pub use planner::{BuildRequest, GroupPlan};
pub use sequencer::BuiltBundle;
