//! Group-oriented bundle orchestration for SystemJS-style module loaders.
//!
//! This library resolves a declarative table of named bundle groups into
//! concrete build requests, drives an external bundling engine to produce
//! the artifacts, checksums them, and maintains the persisted manifest the
//! runtime loader consults for bundle membership and cache validity.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use bundler::{
    BuildOutput, BuildRequest, BuiltBundle, BundleEngine, Bundler, Manifest, ManifestStore,
    ProcessEngine,
};
pub use config::{BuilderOptions, BundleConfig, BundlerOptions, GroupSpec, GroupTable, NameList};
pub use error::{BundleError, Result};
