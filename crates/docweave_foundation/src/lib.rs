//! Core names, dialects, and error types for docweave.
//!
//! This crate provides:
//! - [`EntityName`] - Shared, cheaply cloned entity identifiers
//! - [`Dialect`] - The three metadata dialects a schema is assembled from
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dialect;
pub mod error;
pub mod name;

pub use dialect::Dialect;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use name::EntityName;
