//! Integration tests for the dialect loaders
//!
//! Tests each dialect's grammar through the public parsing API.

use docweave_foundation::{Dialect, ErrorKind};
use docweave_metadata::{
    Descriptor, DescriptorMap, DuplicatePolicy, EmbedCardinality, MetadataSource, PersistenceDescriptor,
    PersistenceKind, Relation, SerializationDescriptor, SourceSet, ValidationDescriptor,
};

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn persistence_with_namespace_prefixes() {
    let source = MetadataSource::new(
        "prefixed.xml",
        r#"<odm:doctrine-mongo-mapping xmlns:odm="http://doctrine-project.org/schemas/odm/doctrine-mongo-mapping">
             <odm:document name="Shop">
               <odm:field fieldName="title" type="string"/>
               <odm:reference-one field="owner" target-document="User"/>
             </odm:document>
           </odm:doctrine-mongo-mapping>"#,
    );
    let descriptors = PersistenceDescriptor::parse(&source).unwrap();
    assert_eq!(descriptors.len(), 1);
    let shop = &descriptors[0];
    assert_eq!(shop.entity, "Shop");
    assert_eq!(
        shop.field("owner").unwrap().kind,
        PersistenceKind::Embed {
            target: "User".into(),
            cardinality: EmbedCardinality::One,
            relation: Relation::Referenced,
        }
    );
}

#[test]
fn persistence_field_name_attribute_fallback() {
    let source = MetadataSource::new("p.xml", r#"<m><document name="A"><field name="legacy" type="int"/></document></m>"#);
    let a = &PersistenceDescriptor::parse(&source).unwrap()[0];
    assert_eq!(a.fields[0].name, "legacy");
}

#[test]
fn persistence_malformed_entity_is_not_dropped() {
    let source = MetadataSource::new(
        "broken.mongodb.xml",
        r#"<m><document name="Ok"/><document name="Bad"><embed-many field="x"/></document></m>"#,
    );
    let err = PersistenceDescriptor::parse(&source).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MetadataParse { ref source_id, .. } if source_id == "broken.mongodb.xml"
    ));
}

#[test]
fn persistence_unclosed_document_fails() {
    let source = MetadataSource::new("p.xml", r#"<m><document name="A">"#);
    assert!(PersistenceDescriptor::parse(&source).is_err());
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn serialization_entities_and_properties() {
    let source = MetadataSource::new(
        "Order.xml",
        r#"<serializer>
             <class name="Order"><property name="items" serialized-name="lineItems" type="array&lt;string&gt;"/></class>
             <class name="Customer"><property name="email" searchable="TRUE"/></class>
           </serializer>"#,
    );
    let descriptors = SerializationDescriptor::parse(&source).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].field("items").unwrap().exposed_name.as_deref(), Some("lineItems"));
    assert!(!descriptors[1].field("email").unwrap().searchable);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn validation_required_constraints() {
    let source = MetadataSource::new(
        "validation.xml",
        r#"<constraint-mapping>
             <class name="Order">
               <property name="a"><constraint name="NotBlank"/></property>
               <property name="b"><constraint name="NotNull"/></property>
               <property name="c"><constraint name="Email"/></property>
             </class>
           </constraint-mapping>"#,
    );
    let order = &ValidationDescriptor::parse(&source).unwrap()[0];
    let required: Vec<_> = order.fields.iter().map(|f| (f.name.as_str(), f.required())).collect();
    assert_eq!(required, vec![("a", true), ("b", true), ("c", false)]);
}

// =============================================================================
// Descriptor Maps
// =============================================================================

#[test]
fn descriptor_map_keeps_discovery_order_across_sources() {
    let sources = SourceSet::from_sources(
        Dialect::Persistence,
        [
            MetadataSource::new("1.xml", r#"<m><document name="B"/><document name="A"/></m>"#),
            MetadataSource::new("2.xml", r#"<m><document name="C"/></m>"#),
        ],
    );
    let map: DescriptorMap<PersistenceDescriptor> = DescriptorMap::load(&sources, DuplicatePolicy::Reject).unwrap();
    let names: Vec<_> = map.names().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
    assert_eq!(map.get("C").unwrap().source_id(), "2.xml");
}

#[test]
fn descriptor_map_last_wins_replaces_in_place() {
    let sources = SourceSet::from_sources(
        Dialect::Validation,
        [
            MetadataSource::new("1.xml", r#"<m><class name="A"/><class name="B"/></m>"#),
            MetadataSource::new("2.xml", r#"<m><class name="A"><property name="x"/></class></m>"#),
        ],
    );
    let map: DescriptorMap<ValidationDescriptor> = DescriptorMap::load(&sources, DuplicatePolicy::LastWins).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("A").unwrap().fields.len(), 1);
    assert_eq!(map.get("A").unwrap().source_id(), "2.xml");
}
