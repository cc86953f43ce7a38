//! Cache command implementation.
//!
//! Provides `archdoc cache stats`, `archdoc cache clear`, etc.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cache::hash::is_valid_digest;
use crate::cache::{CacheEntry, DiagramCache};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show cache statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List cached diagrams.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check whether a diagram source is cached and up to date.
    Check {
        /// Diagram source path.
        source: PathBuf,
        /// Compare against this file's content instead of the source.
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Forget a single diagram.
    Invalidate {
        /// Diagram source path.
        source: PathBuf,
    },
    /// Remove all entries.
    Clear,
    /// Remove entries whose source files no longer exist.
    Cleanup,
}

/// The cache command implementation.
pub struct CacheCommand {
    args: CacheArgs,
    cache_dir: PathBuf,
    project_root: PathBuf,
}

impl CacheCommand {
    /// Create a new cache command operating on `cache_dir`.
    ///
    /// Relative source paths are taken relative to `project_root`.
    pub fn new(args: CacheArgs, cache_dir: PathBuf, project_root: PathBuf) -> Self {
        Self {
            args,
            cache_dir,
            project_root,
        }
    }

    fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, out: &mut dyn Write) -> crate::error::Result<CommandResult> {
        let mut cache = DiagramCache::open(&self.cache_dir)?;

        let exit_code = match &self.args.command {
            CacheSubcommand::Stats { json } => show_stats(&cache, *json, out)?,
            CacheSubcommand::List { json } => list_cache(&cache, *json, out)?,
            CacheSubcommand::Check {
                source,
                content_file,
            } => {
                let content_file = content_file.as_deref().map(|p| self.project_path(p));
                check_source(
                    &cache,
                    source,
                    &self.project_path(source),
                    content_file.as_deref(),
                    out,
                )?
            }
            CacheSubcommand::Invalidate { source } => {
                cache.invalidate(self.project_path(source));
                writeln!(out, "Invalidated {}", source.display())?;
                0
            }
            CacheSubcommand::Clear => {
                let count = cache.len();
                cache.clear();
                writeln!(out, "Cleared {} entries", count)?;
                0
            }
            CacheSubcommand::Cleanup => {
                let removed = cache.cleanup_stale_entries();
                writeln!(out, "Removed {} stale entries", removed)?;
                0
            }
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn show_stats(cache: &DiagramCache, json: bool, out: &mut dyn Write) -> Result<i32> {
    let stats = cache.stats();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(0);
    }

    writeln!(out, "Cache Statistics:\n")?;
    writeln!(out, "  Total entries: {}", stats.total_entries)?;
    writeln!(out, "  Total outputs: {}", stats.total_outputs)?;
    writeln!(out, "  Cache file size: {} bytes", stats.cache_file_size)?;
    writeln!(out, "  Cache file: {}", stats.cache_file_path.display())?;

    Ok(0)
}

fn list_cache(cache: &DiagramCache, json: bool, out: &mut dyn Write) -> Result<i32> {
    if json {
        let entries: BTreeMap<&str, &CacheEntry> = cache.entries().collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(0);
    }

    if cache.is_empty() {
        writeln!(out, "Cache is empty")?;
        return Ok(0);
    }

    writeln!(out, "{} cached entries:\n", cache.len())?;
    for (key, entry) in cache.entries() {
        let formats: Vec<&str> = entry.output_files.keys().map(String::as_str).collect();
        let digest = if is_valid_digest(&entry.content_hash) {
            ""
        } else {
            " (no digest)"
        };
        writeln!(
            out,
            "  {} [{}] {}{}",
            key,
            formats.join(", "),
            entry.last_modified.format("%Y-%m-%d %H:%M:%S"),
            digest
        )?;
    }

    Ok(0)
}

fn check_source(
    cache: &DiagramCache,
    source: &Path,
    resolved: &Path,
    content_file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<i32> {
    let content = content_file
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read content file {}", path.display()))
        })
        .transpose()?;

    if cache.is_cached(resolved, content.as_deref()) {
        writeln!(out, "{}: cached", source.display())?;
        Ok(0)
    } else {
        writeln!(out, "{}: stale", source.display())?;
        Ok(1)
    }
}
