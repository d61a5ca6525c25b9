//! Persistence dialect: document store mappings.
//!
//! ```xml
//! <doctrine-mongo-mapping xmlns="http://doctrine-project.org/schemas/odm/doctrine-mongo-mapping">
//!   <document name="Order">
//!     <field fieldName="id" type="string" id="true"/>
//!     <field fieldName="items" type="collection"/>
//!     <embed-one field="customer" target-document="Customer"/>
//!   </document>
//!   <embedded-document name="Customer">
//!     <field fieldName="name" type="string"/>
//!   </embedded-document>
//! </doctrine-mongo-mapping>
//! ```
//!
//! This dialect is the only mandatory one: its field list, in declared
//! order, is the field list of the compiled document.

use std::collections::HashSet;
use std::sync::Arc;

use docweave_foundation::{Dialect, EntityName, Result};

use crate::descriptor::Descriptor;
use crate::source::MetadataSource;
use crate::xml::{self, Element};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage type used when a `<field>` declares none.
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// Whether an embed field holds one nested instance or many.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EmbedCardinality {
    /// `embed-one` / `reference-one`.
    One,
    /// `embed-many` / `reference-many`.
    Many,
}

/// How the nested entity is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Relation {
    /// Stored inline in the owning document.
    Embedded,
    /// Stored as a reference to a separate document.
    Referenced,
}

/// The kind of a persistence field, as declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistenceKind {
    /// A `<field>` element with its declared storage type (`collection` included).
    Field {
        /// Declared storage type, verbatim.
        declared_type: String,
    },
    /// An `embed-*` or `reference-*` element.
    Embed {
        /// Target entity named by `target-document`.
        target: EntityName,
        /// One or many nested instances.
        cardinality: EmbedCardinality,
        /// Inline or referenced storage.
        relation: Relation,
    },
}

/// One persistence-declared field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistenceField {
    /// Internal field name.
    pub name: String,
    /// Declared kind.
    pub kind: PersistenceKind,
}

/// Persistence descriptor for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistenceDescriptor {
    /// Entity name.
    pub entity: EntityName,
    /// True for `<embedded-document>`, false for `<document>`.
    pub embedded: bool,
    /// Fields in declared order.
    pub fields: Vec<PersistenceField>,
    /// Source that declared this entity.
    pub source_id: Arc<str>,
}

impl PersistenceDescriptor {
    /// Returns a field by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&PersistenceField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Descriptor for PersistenceDescriptor {
    const DIALECT: Dialect = Dialect::Persistence;

    fn entity(&self) -> &EntityName {
        &self.entity
    }

    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn parse(source: &MetadataSource) -> Result<Vec<Self>> {
        parse(source)
    }
}

/// Parses every `<document>` and `<embedded-document>` declared in a source.
///
/// # Errors
///
/// Returns a metadata parse error if the XML is malformed, an entity or field
/// lacks its name, an embed lacks its target, or a field is declared twice.
pub fn parse(source: &MetadataSource) -> Result<Vec<PersistenceDescriptor>> {
    let root = xml::parse(source)?;
    let entities = root.descendants(&|e: &Element| e.name == "document" || e.name == "embedded-document");
    entities
        .into_iter()
        .map(|element| parse_entity(element, source))
        .collect()
}

fn parse_entity(element: &Element, source: &MetadataSource) -> Result<PersistenceDescriptor> {
    let entity = EntityName::new(element.required_attr("name", source)?);
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for child in &element.children {
        let Some(field) = parse_field(child, source)? else {
            continue;
        };
        if !seen.insert(field.name.clone()) {
            return Err(child.error(
                source,
                format!("field `{}` declared twice on `{entity}`", field.name),
            ));
        }
        fields.push(field);
    }

    Ok(PersistenceDescriptor {
        entity,
        embedded: element.name == "embedded-document",
        fields,
        source_id: Arc::clone(&source.id),
    })
}

fn parse_field(element: &Element, source: &MetadataSource) -> Result<Option<PersistenceField>> {
    let (cardinality, relation) = match element.name.as_str() {
        "field" => {
            let name = element
                .non_empty_attr("fieldName")
                .or_else(|| element.non_empty_attr("name"))
                .ok_or_else(|| element.error(source, "<field> is missing required attribute `fieldName`"))?;
            let declared_type = element.non_empty_attr("type").unwrap_or(DEFAULT_FIELD_TYPE);
            return Ok(Some(PersistenceField {
                name: name.to_string(),
                kind: PersistenceKind::Field {
                    declared_type: declared_type.to_string(),
                },
            }));
        }
        "embed-one" => (EmbedCardinality::One, Relation::Embedded),
        "reference-one" => (EmbedCardinality::One, Relation::Referenced),
        "embed-many" => (EmbedCardinality::Many, Relation::Embedded),
        "reference-many" => (EmbedCardinality::Many, Relation::Referenced),
        _ => return Ok(None),
    };

    let name = element.required_attr("field", source)?;
    let target = element.required_attr("target-document", source)?;
    Ok(Some(PersistenceField {
        name: name.to_string(),
        kind: PersistenceKind::Embed {
            target: EntityName::new(target),
            cardinality,
            relation,
        },
    }))
}
