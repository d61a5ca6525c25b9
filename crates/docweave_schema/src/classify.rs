//! Field classification: merging one entity's three descriptors.
//!
//! Persistence is authoritative for which fields exist and in what order.
//! Each persistence field is looked up by internal name in the serialization
//! and validation descriptors and merged:
//!
//! | attribute      | source                                    | default         |
//! |----------------|-------------------------------------------|-----------------|
//! | kind           | persistence                               |                 |
//! | scalar type    | persistence                               | `string`        |
//! | element type   | serialization                             | `array<string>` |
//! | exposed name   | serialization `serialized-name`           | internal name   |
//! | read-only      | serialization                             | false           |
//! | searchable     | serialization (not on embeds)             | false           |
//! | required       | validation `NotBlank` / `NotNull`         | false           |

use docweave_foundation::{EntityName, Result};
use docweave_metadata::{DescriptorTriple, PersistenceField, PersistenceKind, ValidationField};

use crate::field::{DEFAULT_ELEMENT_TYPE, Field, FieldKind};

/// Persistence type that classifies a field as an array.
pub const COLLECTION_TYPE: &str = "collection";

/// Resolves the targets of embed fields as the classifier meets them.
pub trait EmbedTargets {
    /// Ensures `target` resolves, or will once the current resolution
    /// unwinds.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if `target` has no persistence
    /// descriptor, or any error raised while resolving it.
    fn require(&mut self, target: &EntityName, referenced_from: &EntityName) -> Result<()>;
}

/// Classifies every persistence field of an entity, in declared order.
///
/// # Errors
///
/// Returns the first error reported by `targets` for an embed field.
pub fn classify<T>(triple: &DescriptorTriple<'_>, targets: &mut T) -> Result<Vec<Field>>
where
    T: EmbedTargets + ?Sized,
{
    let entity = triple.entity();
    let mut fields = Vec::with_capacity(triple.persistence.fields.len());
    for field in &triple.persistence.fields {
        if let PersistenceKind::Embed { target, .. } = &field.kind {
            targets.require(target, entity)?;
        }
        fields.push(classify_field(triple, field));
    }
    Ok(fields)
}

/// Classifies one persistence field without touching its embed target.
#[must_use]
pub fn classify_field(triple: &DescriptorTriple<'_>, field: &PersistenceField) -> Field {
    let serialized = triple.serialization.and_then(|s| s.field(&field.name));
    let required = triple
        .validation
        .and_then(|v| v.field(&field.name))
        .is_some_and(ValidationField::required);
    let searchable = serialized.is_some_and(|s| s.searchable);

    let kind = match &field.kind {
        PersistenceKind::Field { declared_type } if declared_type == COLLECTION_TYPE => FieldKind::Array {
            element_type: serialized
                .and_then(|s| s.declared_type.clone())
                .unwrap_or_else(|| DEFAULT_ELEMENT_TYPE.to_string()),
            searchable,
        },
        PersistenceKind::Field { declared_type } => FieldKind::Scalar {
            scalar_type: declared_type.clone(),
            searchable,
        },
        PersistenceKind::Embed {
            target,
            cardinality,
            relation,
        } => FieldKind::embed(target.clone(), *cardinality, *relation),
    };

    Field {
        internal_name: field.name.clone(),
        exposed_name: serialized
            .and_then(|s| s.exposed_name.clone())
            .unwrap_or_else(|| field.name.clone()),
        read_only: serialized.is_some_and(|s| s.read_only),
        required,
        kind,
    }
}
