//! docweave - Schema unification for document-store resources
//!
//! This crate re-exports all layers of docweave for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: docweave_cli        - docweave.toml, command rendering, `docweave` binary
//! Layer 2: docweave_schema     - Field classification, resolver, document graph
//! Layer 1: docweave_metadata   - Dialect loaders, source discovery
//! Layer 0: docweave_foundation - Core types (EntityName, Dialect, Error)
//! ```

pub use docweave_cli as cli;
pub use docweave_foundation as foundation;
pub use docweave_metadata as metadata;
pub use docweave_schema as schema;
