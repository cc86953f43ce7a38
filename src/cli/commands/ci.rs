//! CI config command implementation.

use std::io::Write;

use crate::ci::github_actions_cache_config;

use super::dispatcher::{Command, CommandResult};

/// Prints the GitHub Actions cache configuration.
pub struct CiConfigCommand;

impl Command for CiConfigCommand {
    fn execute(&self, out: &mut dyn Write) -> crate::error::Result<CommandResult> {
        let json = serde_json::to_string_pretty(&github_actions_cache_config())
            .map_err(anyhow::Error::from)?;
        writeln!(out, "{}", json)?;
        Ok(CommandResult::success())
    }
}
