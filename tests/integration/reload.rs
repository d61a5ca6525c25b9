//! Rebuilding and republishing a graph while readers hold snapshots.

use std::fs;
use std::sync::Arc;

use docweave_metadata::{LoadConfig, SourceConfig, discover};
use docweave_schema::{DocumentGraph, SharedGraph};

fn build(root: &std::path::Path) -> docweave_foundation::Result<DocumentGraph> {
    let sources = discover(&SourceConfig::under(root))?;
    DocumentGraph::compile(&sources, LoadConfig::strict())
}

#[test]
fn reload_after_metadata_change() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("Item.mongodb.xml");
    fs::write(&mapping, r#"<m><document name="Item"><field fieldName="sku"/></document></m>"#).unwrap();

    let shared = SharedGraph::new(build(dir.path()).unwrap());
    let snapshot = shared.load();
    assert_eq!(snapshot.get_document("Item").unwrap().len(), 1);

    fs::write(
        &mapping,
        r#"<m><document name="Item"><field fieldName="sku"/><field fieldName="price" type="float"/></document></m>"#,
    )
    .unwrap();
    shared.rebuild(|| build(dir.path())).unwrap();

    assert_eq!(snapshot.get_document("Item").unwrap().len(), 1);
    assert_eq!(shared.load().get_document("Item").unwrap().len(), 2);
}

#[test]
fn broken_reload_keeps_serving_previous_graph() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("Item.mongodb.xml");
    fs::write(&mapping, r#"<m><document name="Item"/></m>"#).unwrap();

    let shared = SharedGraph::new(build(dir.path()).unwrap());
    let before = shared.load();

    fs::write(&mapping, r#"<m><document name="Item"><embed-one field="x" target-document="Nope"/></document></m>"#)
        .unwrap();
    assert!(shared.rebuild(|| build(dir.path())).is_err());
    assert!(Arc::ptr_eq(&before, &shared.load()));
}
