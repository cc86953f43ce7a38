//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_settings_file, Settings};
use crate::error::Result;

use super::cache::CacheCommand;
use super::ci::CiConfigCommand;
use super::images::ImagesCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing human or JSON output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load settings, honoring `--config` and `--cache-dir`.
    pub fn settings(&self, cli: &Cli) -> Result<Settings> {
        let mut settings = match &cli.config {
            Some(path) => load_settings_file(path)?,
            None => Settings::discover(&self.project_root)?,
        };

        if let Some(dir) = &cli.cache_dir {
            settings.cache.dir = dir.clone();
        }

        Ok(settings)
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let settings = self.settings(cli)?;

        match &cli.command {
            Commands::Cache(args) => {
                let cache_dir = settings.cache.resolved_dir(&self.project_root);
                let project_root = self.project_root.clone();
                CacheCommand::new(args.clone(), cache_dir, project_root).execute(out)
            }
            Commands::Images(args) => {
                let project_root = self.project_root.clone();
                ImagesCommand::new(args.clone(), settings.images, project_root).execute(out)
            }
            Commands::CiConfig => CiConfigCommand.execute(out),
        }
    }
}
