//! Canonical field descriptors.
//!
//! A [`Field`] is what the three dialects agree a field is once merged. The
//! variant set is closed: downstream consumers match exhaustively on
//! [`FieldKind`].

use docweave_foundation::EntityName;
use docweave_metadata::{EmbedCardinality, Relation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element type of an array field when serialization declares none.
pub const DEFAULT_ELEMENT_TYPE: &str = "array<string>";

/// The classified shape of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum FieldKind {
    /// A plain value with its persistence type, verbatim.
    Scalar {
        /// Declared storage type.
        scalar_type: String,
        /// Whether the field may be used in queries.
        searchable: bool,
    },
    /// A persistence `collection`.
    Array {
        /// Type expression of the elements.
        element_type: String,
        /// Whether the field may be used in queries.
        searchable: bool,
    },
    /// Exactly one nested instance of another entity.
    EmbedOne {
        /// The nested entity.
        target: EntityName,
        /// Inline or referenced storage.
        relation: Relation,
    },
    /// Zero or more nested instances of another entity.
    EmbedMany {
        /// The nested entity.
        target: EntityName,
        /// Inline or referenced storage.
        relation: Relation,
    },
}

impl FieldKind {
    /// Creates an embed kind of the given cardinality.
    #[must_use]
    pub fn embed(target: EntityName, cardinality: EmbedCardinality, relation: Relation) -> Self {
        match cardinality {
            EmbedCardinality::One => Self::EmbedOne { target, relation },
            EmbedCardinality::Many => Self::EmbedMany { target, relation },
        }
    }
}

/// One field of a compiled document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Name used by the persistence layer.
    pub internal_name: String,
    /// Name used on the wire.
    pub exposed_name: String,
    /// Whether clients may not write the field.
    pub read_only: bool,
    /// Whether the field must be present and non-blank.
    pub required: bool,
    /// Classified shape.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: FieldKind,
}

impl Field {
    /// Returns true if the field may be used in queries. Embeds never are.
    #[must_use]
    pub const fn searchable(&self) -> bool {
        match &self.kind {
            FieldKind::Scalar { searchable, .. } | FieldKind::Array { searchable, .. } => *searchable,
            FieldKind::EmbedOne { .. } | FieldKind::EmbedMany { .. } => false,
        }
    }

    /// Returns the nested entity of an embed field.
    #[must_use]
    pub const fn target(&self) -> Option<&EntityName> {
        match &self.kind {
            FieldKind::EmbedOne { target, .. } | FieldKind::EmbedMany { target, .. } => Some(target),
            FieldKind::Scalar { .. } | FieldKind::Array { .. } => None,
        }
    }

    /// Returns the scalar or element type. Embeds have none.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Scalar { scalar_type, .. } => Some(scalar_type),
            FieldKind::Array { element_type, .. } => Some(element_type),
            FieldKind::EmbedOne { .. } | FieldKind::EmbedMany { .. } => None,
        }
    }

    /// Returns true for embed fields.
    #[must_use]
    pub const fn is_embed(&self) -> bool {
        self.target().is_some()
    }

    /// Returns true for embed-many fields.
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self.kind, FieldKind::EmbedMany { .. })
    }
}
