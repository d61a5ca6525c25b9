//! Compiled documents.

use docweave_foundation::EntityName;

use crate::field::Field;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entity's unified schema.
///
/// Identity is the entity name. Embed fields refer to other documents by
/// name; the owning [`DocumentGraph`](crate::DocumentGraph) resolves them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// Entity name.
    pub name: EntityName,
    /// True if the entity is only ever stored inside another document.
    pub embedded: bool,
    /// Fields in persistence declaration order.
    pub fields: Vec<Field>,
}

impl Document {
    /// Creates a document.
    #[must_use]
    pub const fn new(name: EntityName, embedded: bool, fields: Vec<Field>) -> Self {
        Self {
            name,
            embedded,
            fields,
        }
    }

    /// Returns a field by internal name.
    #[must_use]
    pub fn field(&self, internal_name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.internal_name == internal_name)
    }

    /// Returns a field by exposed (wire) name.
    #[must_use]
    pub fn field_by_exposed(&self, exposed_name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.exposed_name == exposed_name)
    }

    /// Iterates required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.required)
    }

    /// Iterates read-only fields.
    pub fn read_only_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.read_only)
    }

    /// Iterates searchable fields.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.searchable())
    }

    /// Iterates embed fields.
    pub fn embed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_embed())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
