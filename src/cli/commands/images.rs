//! Images command implementation.
//!
//! Provides `archdoc images optimize <DIR>`.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::optimize::{ImageOptimizer, OptimizeOptions};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the images command.
#[derive(Debug, Clone, Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesSubcommand,
}

/// Images subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ImagesSubcommand {
    /// Optimize every image in a directory for web display.
    Optimize {
        /// Directory containing generated images.
        dir: PathBuf,
        /// Maximum width in pixels (overrides settings).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_width: Option<u32>,
        /// JPEG quality 1-100 (overrides settings).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,
    },
}

/// The images command implementation.
pub struct ImagesCommand {
    args: ImagesArgs,
    options: OptimizeOptions,
    project_root: PathBuf,
}

impl ImagesCommand {
    /// Create a new images command with options from settings.
    ///
    /// A relative images directory is taken relative to `project_root`.
    pub fn new(args: ImagesArgs, options: OptimizeOptions, project_root: PathBuf) -> Self {
        Self {
            args,
            options,
            project_root,
        }
    }
}

impl Command for ImagesCommand {
    fn execute(&self, out: &mut dyn Write) -> crate::error::Result<CommandResult> {
        let exit_code = match &self.args.command {
            ImagesSubcommand::Optimize {
                dir,
                max_width,
                quality,
            } => {
                let mut options = self.options;
                if let Some(width) = max_width {
                    options.max_width = *width;
                }
                if let Some(quality) = quality {
                    options.quality = *quality;
                }
                optimize_dir(&self.project_root.join(dir), options, out)?
            }
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn optimize_dir(dir: &Path, options: OptimizeOptions, out: &mut dyn Write) -> Result<i32> {
    if !dir.is_dir() {
        writeln!(out, "No images directory found at {}", dir.display())?;
        return Ok(1);
    }

    let optimized = ImageOptimizer::new(options).optimize_directory(dir);
    writeln!(out, "Optimized {} images", optimized.len())?;
    for path in &optimized {
        writeln!(out, "  {}", path.display())?;
    }

    Ok(0)
}
