//! Serialization dialect: wire mappings.
//!
//! ```xml
//! <serializer>
//!   <class name="Order">
//!     <property name="items" serialized-name="lineItems" type="array&lt;string&gt;"/>
//!     <property name="id" read-only="true" searchable="true"/>
//!     <property name="tags">
//!       <type><![CDATA[array<string>]]></type>
//!     </property>
//!   </class>
//! </serializer>
//! ```
//!
//! Owns the exposed name, the declared wire type and the `read-only` and
//! `searchable` flags. Properties are matched to persistence fields by their
//! internal `name`, never by `serialized-name`.

use std::collections::HashSet;
use std::sync::Arc;

use docweave_foundation::{Dialect, EntityName, Result};

use crate::descriptor::Descriptor;
use crate::source::MetadataSource;
use crate::xml::{self, Element};

/// One serialization property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationField {
    /// Internal field name.
    pub name: String,
    /// `serialized-name`, when declared and non-empty.
    pub exposed_name: Option<String>,
    /// `type` attribute or `<type>` child text, when declared.
    pub declared_type: Option<String>,
    /// `read-only="true"`.
    pub read_only: bool,
    /// `searchable="true"`.
    pub searchable: bool,
}

/// Serialization descriptor for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationDescriptor {
    /// Entity name.
    pub entity: EntityName,
    /// Properties in declared order.
    pub fields: Vec<SerializationField>,
    /// Source that declared this entity.
    pub source_id: Arc<str>,
}

impl SerializationDescriptor {
    /// Returns a property by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SerializationField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Descriptor for SerializationDescriptor {
    const DIALECT: Dialect = Dialect::Serialization;

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

/// Parses every `<class>` declared in a source.
///
/// # Errors
///
/// Returns a metadata parse error if the XML is malformed, a class or
/// property lacks its name, or a property is declared twice.
pub fn parse(source: &MetadataSource) -> Result<Vec<SerializationDescriptor>> {
    let root = xml::parse(source)?;
    let classes = root.descendants(&|e: &Element| e.name == "class");
    classes
        .into_iter()
        .map(|class| parse_class(class, source))
        .collect()
}

fn parse_class(class: &Element, source: &MetadataSource) -> Result<SerializationDescriptor> {
    let entity = EntityName::new(class.required_attr("name", source)?);
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for property in class.children_named("property") {
        let field = parse_property(property, source)?;
        if !seen.insert(field.name.clone()) {
            return Err(property.error(
                source,
                format!("property `{}` declared twice on `{entity}`", field.name),
            ));
        }
        fields.push(field);
    }

    Ok(SerializationDescriptor {
        entity,
        fields,
        source_id: Arc::clone(&source.id),
    })
}

fn parse_property(property: &Element, source: &MetadataSource) -> Result<SerializationField> {
    let name = property.required_attr("name", source)?.to_string();
    let declared_type = property
        .non_empty_attr("type")
        .map(str::to_string)
        .or_else(|| {
            property
                .children_named("type")
                .next()
                .map(|ty| ty.text.trim().to_string())
                .filter(|ty| !ty.is_empty())
        });

    Ok(SerializationField {
        name,
        exposed_name: property.non_empty_attr("serialized-name").map(str::to_string),
        declared_type,
        read_only: property.flag("read-only"),
        searchable: property.flag("searchable"),
    })
}
