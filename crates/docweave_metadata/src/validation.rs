//! Validation dialect: constraint mappings.
//!
//! ```xml
//! <constraint-mapping xmlns="http://symfony.com/schema/dic/constraint-mapping">
//!   <class name="Order">
//!     <property name="customer">
//!       <constraint name="NotNull"/>
//!     </property>
//!   </class>
//! </constraint-mapping>
//! ```
//!
//! Only the required flag is derived from this dialect. All constraint names
//! are kept so callers can inspect the rest.

use std::collections::HashSet;
use std::sync::Arc;

use docweave_foundation::{Dialect, EntityName, Result};

use crate::descriptor::Descriptor;
use crate::source::MetadataSource;
use crate::xml::{self, Element};

/// Constraints that make a field required.
pub const REQUIRED_CONSTRAINTS: [&str; 2] = ["NotBlank", "NotNull"];

/// One validated property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationField {
    /// Internal field name.
    pub name: String,
    /// Constraint names in declared order.
    pub constraints: Vec<String>,
}

impl ValidationField {
    /// Returns true if a `NotBlank` or `NotNull` constraint is declared.
    #[must_use]
    pub fn required(&self) -> bool {
        self.constraints
            .iter()
            .any(|constraint| REQUIRED_CONSTRAINTS.contains(&constraint.as_str()))
    }
}

/// Validation descriptor for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationDescriptor {
    /// Entity name.
    pub entity: EntityName,
    /// Properties in declared order.
    pub fields: Vec<ValidationField>,
    /// Source that declared this entity.
    pub source_id: Arc<str>,
}

impl ValidationDescriptor {
    /// Returns a property by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ValidationField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Descriptor for ValidationDescriptor {
    const DIALECT: Dialect = Dialect::Validation;

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
/// Returns a metadata parse error if the XML is malformed, a class, property
/// or constraint lacks its name, or a property is declared twice.
pub fn parse(source: &MetadataSource) -> Result<Vec<ValidationDescriptor>> {
    let root = xml::parse(source)?;
    let classes = root.descendants(&|e: &Element| e.name == "class");
    classes
        .into_iter()
        .map(|class| parse_class(class, source))
        .collect()
}

fn parse_class(class: &Element, source: &MetadataSource) -> Result<ValidationDescriptor> {
    let entity = EntityName::new(class.required_attr("name", source)?);
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for property in class.children_named("property") {
        let name = property.required_attr("name", source)?.to_string();
        if !seen.insert(name.clone()) {
            return Err(property.error(
                source,
                format!("property `{name}` declared twice on `{entity}`"),
            ));
        }
        let constraints = property
            .children_named("constraint")
            .map(|constraint| constraint.required_attr("name", source).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        fields.push(ValidationField { name, constraints });
    }

    Ok(ValidationDescriptor {
        entity,
        fields,
        source_id: Arc::clone(&source.id),
    })
}
