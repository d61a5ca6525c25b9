//! Workspace configuration and command rendering for the `docweave` tool.
//!
//! This crate provides:
//! - [`WorkspaceConfig`] - `docweave.toml`: load policies and source locations
//! - [`commands`] - `check`, `show`, `dump` and `paths`, rendered to text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;

pub use commands::PathFilter;
pub use config::{CONFIG_FILE, WorkspaceConfig};
