//! bundlekit - group-oriented bundler front end.
//!
//! This binary builds grouped module bundles through an external bundling
//! engine and keeps the loader-consumable manifest file in step.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; progress lines are emitted at info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match bundlekit::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
