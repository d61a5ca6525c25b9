//! Metadata dialect loaders and source discovery for docweave.
//!
//! This crate provides:
//! - [`MetadataSource`] / [`SourceSet`] - Raw dialect sources, in discovery order
//! - [`persistence`], [`serialization`], [`validation`] - One typed parser per dialect
//! - [`DescriptorMap`] - Entity name to descriptor, in discovery order
//! - [`MetadataSet`] - The three descriptor maps, cross-checked
//! - [`LoadConfig`] - Orphan and duplicate policies
//! - [`SourceConfig`] / [`discover`] - Filesystem source discovery
//!
//! Parsing is pure: a loader never looks at another dialect, and field
//! merging is left to the schema compiler.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod descriptor;
pub mod discover;
pub mod persistence;
pub mod serialization;
pub mod set;
pub mod source;
pub mod validation;

mod xml;

pub use config::{DuplicatePolicy, LoadConfig, OrphanPolicy};
pub use descriptor::{Descriptor, DescriptorMap};
pub use discover::{DialectSourceConfig, SourceConfig, discover, discover_dialect};
pub use persistence::{EmbedCardinality, PersistenceDescriptor, PersistenceField, PersistenceKind, Relation};
pub use serialization::{SerializationDescriptor, SerializationField};
pub use set::{DescriptorTriple, MetadataSet};
pub use source::{DialectSources, MetadataSource, SourceSet};
pub use validation::{ValidationDescriptor, ValidationField};
