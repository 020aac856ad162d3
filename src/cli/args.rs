//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Group-oriented bundler front end
#[derive(Parser, Debug)]
#[command(
    name = "bundlekit",
    version,
    about = "Builds grouped module bundles and tracks them in a loader manifest",
    long_about = "Resolves named bundle groups from bundles.json into build requests, runs them \
through an external bundling engine, checksums the produced artifacts, and keeps the \
loader-consumable manifest file in step.

Usage:
  bundlekit bundle                bundle every configured group
  bundlekit bundle app routes     bundle two groups
  bundlekit unbundle app          drop one group from the manifest
  bundlekit unbundle              wipe the manifest"
)]
pub struct Args {
    /// Project root containing package.json
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Group-table document, relative to the project root
    #[arg(long, value_name = "FILE", default_value = "bundles.json")]
    pub config: PathBuf,

    /// External bundling engine command
    #[arg(long, value_name = "PROGRAM", default_value = "jspm")]
    pub engine: String,

    #[command(subcommand)]
    pub command: Command,
}

/// The two operations exposed to callers.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build bundle groups and update the manifest
    Bundle {
        /// Groups to build; every configured group when omitted
        groups: Vec<String>,
    },
    /// Remove bundle groups from the manifest
    Unbundle {
        /// Groups to remove; wipes the whole manifest when omitted
        groups: Vec<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
