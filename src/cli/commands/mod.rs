//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads settings
//! once, applies global flag overrides and routes CLI subcommands to their
//! implementations.

pub mod cache;
pub mod ci;
pub mod dispatcher;
pub mod images;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
