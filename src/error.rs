//! Error types for bundle orchestration.
//!
//! Fatal configuration problems surface through [`BundleError`]; per-group
//! and per-request failures are logged at the call site and degrade to
//! partial results instead of aborting a run.

use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Main error type for all bundler operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// Bundling was requested before any groups were configured
    #[error("no bundle groups are defined")]
    NoGroups,

    /// A requested group name is absent from the group table
    #[error("unknown bundle group: {0}")]
    GroupNotFound(String),

    /// An exclusion entry expands back into a group already being expanded
    #[error("cyclic exclusion through group: {0}")]
    CyclicExclusion(String),

    /// The external bundling engine failed for one build request
    #[error("bundle engine failed for \"{expression}\": {message}")]
    Engine {
        /// Bundle arithmetic expression the engine was given
        expression: String,
        /// Engine-reported failure detail
        message: String,
    },

    /// Project or group-table configuration is unreadable
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
