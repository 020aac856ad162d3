//! Command line interface for the bundler.

mod args;

pub use args::{Args, Command};

use crate::bundler::{Bundler, ProcessEngine};
use crate::config::BundleConfig;
use crate::error::Result;

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = BundleConfig::load(&args.root, &args.config)?;

    match args.command {
        Command::Bundle { groups } => {
            // fail before resolving the engine program
            if config.groups.is_empty() {
                return Err(crate::error::BundleError::NoGroups);
            }
            let engine = ProcessEngine::resolve(&args.engine)?;
            let bundler = Bundler::new(config, engine);
            bundler.bundle(group_selection(&groups)).await?;
        }
        Command::Unbundle { groups } => {
            // unbundle never invokes the engine; skip program resolution
            let bundler = Bundler::new(config, ProcessEngine::new(&args.engine));
            bundler.unbundle(group_selection(&groups)).await?;
        }
    }

    Ok(0)
}

/// An empty group list on the command line means "all groups" for bundle
/// and "everything" for unbundle.
fn group_selection(groups: &[String]) -> Option<&[String]> {
    if groups.is_empty() { None } else { Some(groups) }
}
