//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::cache::CacheArgs;
use super::commands::images::ImagesArgs;

/// archdoc - C4 architecture documentation with cached diagram generation.
#[derive(Debug, Parser)]
#[command(name = "archdoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides default archdoc.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Diagram cache directory (overrides settings)
    #[arg(long, global = true, env = "ARCHDOC_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and manage the diagram cache
    Cache(CacheArgs),

    /// Optimize generated images
    Images(ImagesArgs),

    /// Print the CI cache configuration as JSON
    CiConfig,
}
