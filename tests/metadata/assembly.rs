//! Integration tests for metadata assembly
//!
//! Tests cross-dialect checks: orphans, duplicates, and descriptor triples.

use docweave_foundation::{Dialect, ErrorKind};
use docweave_metadata::{DialectSources, DuplicatePolicy, LoadConfig, MetadataSet, OrphanPolicy};

fn sources() -> DialectSources {
    DialectSources::new()
        .with_persistence("p.xml", r#"<m><document name="Order"><field fieldName="id"/></document></m>"#)
        .with_serialization(
            "s.xml",
            r#"<serializer><class name="Order"/><class name="Invoice"/></serializer>"#,
        )
}

#[test]
fn orphan_serialization_descriptor_rejected() {
    let err = MetadataSet::load(&sources(), LoadConfig::default()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MissingPersistenceDescriptor { ref entity_name, dialect: Dialect::Serialization }
            if entity_name == "Invoice"
    ));
    assert_eq!(err.entity().map(|e| e.as_str()), Some("Invoice"));
}

#[test]
fn orphan_skip_policy_only_drops_orphans() {
    let config = LoadConfig::strict().with_orphans(OrphanPolicy::Skip);
    let set = MetadataSet::load(&sources(), config).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.serialization().get("Order").is_some());
    assert!(set.serialization().get("Invoice").is_none());
    assert!(!set.contains("Invoice"));
}

#[test]
fn duplicates_rejected_unless_last_wins() {
    let sources = DialectSources::new()
        .with_persistence("p.xml", r#"<m><document name="Order"/></m>"#)
        .with_validation("a.xml", r#"<m><class name="Order"/></m>"#)
        .with_validation("b.xml", r#"<m><class name="Order"><property name="id"/></class></m>"#);

    let err = MetadataSet::load(&sources, LoadConfig::strict()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateEntity { dialect: Dialect::Validation, .. }));

    let config = LoadConfig::strict().with_duplicates(DuplicatePolicy::LastWins);
    let set = MetadataSet::load(&sources, config).unwrap();
    let triple = set.triple("Order").unwrap();
    assert_eq!(triple.validation.unwrap().fields.len(), 1);
}

#[test]
fn parse_error_aborts_load() {
    let sources = DialectSources::new()
        .with_persistence("p.xml", r#"<m><document name="Order"/></m>"#)
        .with_validation("broken.xml", "<m><class name=\"Order\">");
    let err = MetadataSet::load(&sources, LoadConfig::lenient()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MetadataParse { ref source_id, .. } if source_id == "broken.xml"));
}
