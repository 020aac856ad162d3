//! External bundling engine interface.
//!
//! The engine is the collaborator that actually resolves, transpiles, and
//! writes a bundle artifact. This crate only prepares its inputs: a bundle
//! arithmetic expression (`"a + b - c"`), a destination path, and builder
//! options. Group expansion and exclusion flattening happen before the
//! engine is called; the engine has no notion of groups.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::BuilderOptions;
use crate::error::{BundleError, Result};

/// Output of one engine invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildOutput {
    /// Module identifiers included in the artifact, in inclusion order.
    pub modules: Vec<String>,
}

/// Interface to the external module-bundling engine.
#[async_trait]
pub trait BundleEngine {
    /// Builds `expression` into an artifact at `dest` and reports the
    /// transitive module list.
    async fn build(
        &self,
        expression: &str,
        dest: &Path,
        options: &BuilderOptions,
    ) -> Result<BuildOutput>;
}

/// Engine adapter that shells out to an external bundler command.
///
/// The command is invoked as
/// `<program> bundle <expression> <dest> [--minify] [--mangle] [--source-maps] [--options <json>]`
/// and must print a JSON document `{"modules": [...]}` on stdout. A failure
/// exit status or unreadable output is reported as that request's engine
/// failure.
pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    /// Creates an engine around `program` without checking that it exists.
    ///
    /// A missing program surfaces as an engine failure on the first build.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Creates an engine around `program`, resolving it on `PATH` first.
    pub fn resolve(program: &str) -> Result<Self> {
        let program = which::which(program).map_err(|e| {
            BundleError::Config(format!("bundler engine '{program}' not found: {e}"))
        })?;
        Ok(Self { program })
    }

    /// The resolved engine program.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl BundleEngine for ProcessEngine {
    async fn build(
        &self,
        expression: &str,
        dest: &Path,
        options: &BuilderOptions,
    ) -> Result<BuildOutput> {
        let mut command = tokio::process::Command::new(&self.program);
        command.arg("bundle").arg(expression).arg(dest);
        if options.minify.unwrap_or(false) {
            command.arg("--minify");
        }
        if options.mangle.unwrap_or(false) {
            command.arg("--mangle");
        }
        if options.source_maps.unwrap_or(false) {
            command.arg("--source-maps");
        }
        if !options.passthrough.is_empty() {
            command
                .arg("--options")
                .arg(serde_json::to_string(&options.passthrough)?);
        }

        let output = command.output().await?;
        if !output.status.success() {
            return Err(BundleError::Engine {
                expression: expression.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| BundleError::Engine {
            expression: expression.to_string(),
            message: format!("unreadable engine output: {e}"),
        })
    }
}
