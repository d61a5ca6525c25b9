//! Schema unification for docweave.
//!
//! This crate turns the three metadata dialects loaded by
//! [`docweave_metadata`] into one canonical schema:
//! - [`Field`] / [`FieldKind`] - Merged field descriptors
//! - [`classify`] - Merge one entity's descriptors into fields
//! - [`DocumentResolver`] - Memoized, cycle-tolerant resolution
//! - [`DocumentGraph`] - One [`Document`] per entity, in discovery order
//! - [`FieldPath`] - Dotted paths through embedded documents
//! - [`SharedGraph`] - Atomically replaceable graph handle
//!
//! ```
//! use docweave_metadata::{DialectSources, LoadConfig};
//! use docweave_schema::DocumentGraph;
//!
//! let sources = DialectSources::new()
//!     .with_persistence("order.mongodb.xml", r#"<m><document name="Order"><field fieldName="id"/></document></m>"#);
//! let graph = DocumentGraph::compile(&sources, LoadConfig::strict()).unwrap();
//! assert_eq!(graph.get_document("Order").unwrap().fields[0].exposed_name, "id");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod document;
pub mod field;
pub mod graph;
pub mod paths;
pub mod resolver;
pub mod shared;

pub use classify::{EmbedTargets, classify};
pub use document::Document;
pub use field::{Field, FieldKind};
pub use graph::DocumentGraph;
pub use paths::FieldPath;
pub use resolver::DocumentResolver;
pub use shared::SharedGraph;
