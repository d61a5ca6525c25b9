//! Integration tests for document resolution
//!
//! Tests memoization, cycles, failures, and graph queries.

use std::sync::Arc;

use docweave_foundation::{Dialect, ErrorKind};
use docweave_metadata::{DialectSources, LoadConfig, MetadataSet};
use docweave_schema::{DocumentGraph, DocumentResolver};

fn metadata(persistence: &str) -> MetadataSet {
    let sources = DialectSources::new().with_persistence("p.xml", persistence);
    MetadataSet::load(&sources, LoadConfig::strict()).unwrap()
}

// =============================================================================
// Memoization
// =============================================================================

#[test]
fn resolve_is_idempotent() {
    let set = metadata(r#"<m><document name="A"><embed-one field="b" target-document="B"/></document><document name="B"/></m>"#);
    let mut resolver = DocumentResolver::new(&set);
    let a1 = resolver.resolve("A").unwrap();
    let b1 = resolver.resolve("B").unwrap();
    let a2 = resolver.resolve("A").unwrap();
    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(Arc::ptr_eq(&b1, resolver.cached("B").unwrap()));
}

#[test]
fn shared_target_resolved_once() {
    let set = metadata(
        r#"<m>
             <document name="A"><embed-one field="x" target-document="Shared"/><embed-many field="y" target-document="Shared"/></document>
             <document name="B"><embed-one field="z" target-document="Shared"/></document>
             <embedded-document name="Shared"/>
           </m>"#,
    );
    let mut resolver = DocumentResolver::new(&set);
    resolver.resolve("A").unwrap();
    let shared = Arc::clone(resolver.cached("Shared").unwrap());
    resolver.resolve("B").unwrap();
    assert!(Arc::ptr_eq(&shared, resolver.cached("Shared").unwrap()));
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn mutual_recursion_builds_complete_graph() {
    let set = metadata(
        r#"<m>
             <document name="A"><embed-one field="b" target-document="B"/></document>
             <document name="B"><embed-one field="a" target-document="A"/></document>
           </m>"#,
    );
    let graph = DocumentGraph::build(&set).unwrap();
    let a = graph.get_document("A").unwrap();
    let b = graph.target(a.field("b").unwrap()).unwrap();
    assert_eq!(b.name, "B");
    let back = graph.target(b.field("a").unwrap()).unwrap();
    assert!(Arc::ptr_eq(back, a));
}

#[test]
fn longer_cycle_resolves_every_member() {
    let set = metadata(
        r#"<m>
             <document name="A"><embed-one field="next" target-document="B"/></document>
             <document name="B"><embed-one field="next" target-document="C"/></document>
             <document name="C"><embed-many field="next" target-document="A"/></document>
           </m>"#,
    );
    let mut resolver = DocumentResolver::new(&set);
    resolver.resolve("B").unwrap();
    assert_eq!(resolver.cached_len(), 3);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unknown_entity_names_entity_and_referrer() {
    let set = metadata(r#"<m><document name="Order"><embed-one field="customer" target-document="Customer"/></document></m>"#);
    let err = DocumentGraph::build(&set).unwrap_err();
    match err.kind {
        ErrorKind::UnknownEntity {
            entity_name,
            referenced_from,
        } => {
            assert_eq!(entity_name, "Customer");
            assert_eq!(referenced_from.unwrap(), "Order");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn graph_get_document_for_orphan_is_unknown() {
    let sources = DialectSources::new()
        .with_persistence("p.xml", r#"<m><document name="A"/></m>"#)
        .with_validation("v.xml", r#"<m><class name="Ghost"/></m>"#);
    let set = MetadataSet::load(&sources, LoadConfig::lenient()).unwrap();

    let err = DocumentResolver::new(&set).resolve("Ghost").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MissingPersistenceDescriptor { dialect: Dialect::Validation, .. }
    ));

    let graph = DocumentGraph::build(&set).unwrap();
    assert!(graph.get_document("Ghost").is_err());
    assert_eq!(graph.len(), 1);
}

#[test]
fn error_display_includes_resolution_chain() {
    let set = metadata(
        r#"<m>
             <document name="A"><embed-one field="b" target-document="B"/></document>
             <document name="B"><embed-one field="c" target-document="C"/></document>
           </m>"#,
    );
    let err = DocumentResolver::new(&set).resolve("A").unwrap_err();
    let context = err.context.unwrap().to_string();
    assert!(context.contains("while resolving A"));
    assert!(context.contains("while resolving B"));
}
