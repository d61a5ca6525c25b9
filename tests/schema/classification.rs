//! Integration tests for field classification
//!
//! Tests attribute precedence and defaults across the three dialects.

use docweave_metadata::{DialectSources, LoadConfig, Relation};
use docweave_schema::{DocumentGraph, Field, FieldKind};

fn compile(persistence: &str, serialization: &str, validation: &str) -> DocumentGraph {
    let sources = DialectSources::new()
        .with_persistence("p.xml", persistence)
        .with_serialization("s.xml", serialization)
        .with_validation("v.xml", validation);
    DocumentGraph::compile(&sources, LoadConfig::strict()).unwrap()
}

#[test]
fn persistence_only_entity_gets_all_defaults() {
    let graph = compile(
        r#"<m><document name="Note"><field fieldName="body"/><field fieldName="tags" type="collection"/></document></m>"#,
        "<serializer/>",
        "<m/>",
    );
    let note = graph.get_document("Note").unwrap();
    for field in &note.fields {
        assert_eq!(field.exposed_name, field.internal_name);
        assert!(!field.read_only);
        assert!(!field.required);
        assert!(!field.searchable());
    }
    assert_eq!(note.field("body").unwrap().type_name(), Some("string"));
    assert_eq!(note.field("tags").unwrap().type_name(), Some("array<string>"));
}

#[test]
fn serialization_properties_for_unknown_fields_are_ignored() {
    let graph = compile(
        r#"<m><document name="A"><field fieldName="x"/></document></m>"#,
        r#"<serializer><class name="A"><property name="ghost" serialized-name="g"/></class></serializer>"#,
        r#"<m><class name="A"><property name="ghost"><constraint name="NotNull"/></property></class></m>"#,
    );
    let a = graph.get_document("A").unwrap();
    assert_eq!(a.len(), 1);
    assert!(a.field("ghost").is_none());
    assert!(a.field_by_exposed("g").is_none());
}

#[test]
fn embeds_carry_relation_and_required() {
    let graph = compile(
        r#"<m>
             <document name="A">
               <reference-one field="owner" target-document="B"/>
               <embed-many field="parts" target-document="B"/>
             </document>
             <document name="B"/>
           </m>"#,
        r#"<serializer><class name="A"><property name="owner" serialized-name="ownerRef" read-only="true"/></class></serializer>"#,
        r#"<m><class name="A"><property name="parts"><constraint name="NotBlank"/></property></class></m>"#,
    );
    let a = graph.get_document("A").unwrap();
    assert_eq!(
        a.fields,
        vec![
            Field {
                internal_name: "owner".to_string(),
                exposed_name: "ownerRef".to_string(),
                read_only: true,
                required: false,
                kind: FieldKind::EmbedOne {
                    target: "B".into(),
                    relation: Relation::Referenced,
                },
            },
            Field {
                internal_name: "parts".to_string(),
                exposed_name: "parts".to_string(),
                read_only: false,
                required: true,
                kind: FieldKind::EmbedMany {
                    target: "B".into(),
                    relation: Relation::Embedded,
                },
            },
        ]
    );
}

#[test]
fn document_helpers_over_compiled_fields() {
    let graph = compile(
        r#"<m><document name="A"><field fieldName="id"/><field fieldName="n" type="int"/><embed-one field="b" target-document="B"/></document><document name="B"/></m>"#,
        r#"<serializer><class name="A"><property name="id" read-only="true" searchable="true"/><property name="n" searchable="true"/></class></serializer>"#,
        r#"<m><class name="A"><property name="b"><constraint name="NotNull"/></property></class></m>"#,
    );
    let a = graph.get_document("A").unwrap();
    let names = |fields: Vec<&Field>| fields.iter().map(|f| f.internal_name.clone()).collect::<Vec<_>>();
    assert_eq!(names(a.searchable_fields().collect()), vec!["id", "n"]);
    assert_eq!(names(a.read_only_fields().collect()), vec!["id"]);
    assert_eq!(names(a.required_fields().collect()), vec!["b"]);
    assert_eq!(names(a.embed_fields().collect()), vec!["b"]);
}
