//! Integration tests for filesystem source discovery
//!
//! Tests glob matching, ordering, and error reporting on real directories.

use std::fs;
use std::path::{Path, PathBuf};

use docweave_foundation::{Dialect, ErrorKind};
use docweave_metadata::{DialectSourceConfig, LoadConfig, MetadataSet, SourceConfig, discover, discover_dialect};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/order")
}

fn file_names(set: &docweave_metadata::SourceSet) -> Vec<String> {
    set.iter()
        .map(|source| {
            Path::new(&*source.id)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn discovers_fixture_tree_with_default_patterns() {
    let sources = discover(&SourceConfig::under(fixtures())).unwrap();
    assert_eq!(file_names(&sources.persistence), vec!["Customer.mongodb.xml", "Order.mongodb.xml"]);
    assert_eq!(file_names(&sources.serialization), vec!["Customer.xml", "Order.xml"]);
    assert_eq!(file_names(&sources.validation), vec!["validation.xml"]);
}

#[test]
fn discovered_sources_load() {
    let sources = discover(&SourceConfig::under(fixtures())).unwrap();
    let set = MetadataSet::load(&sources, LoadConfig::strict()).unwrap();
    let names: Vec<_> = set.entity_names().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Customer", "Address", "Order"]);
}

#[test]
fn multiple_roots_are_searched_in_order() {
    let dir = tempfile::tempdir().unwrap();
    for (root, file) in [("second", "A.mongodb.xml"), ("first", "B.mongodb.xml")] {
        fs::create_dir_all(dir.path().join(root)).unwrap();
        fs::write(dir.path().join(root).join(file), "<m/>").unwrap();
    }

    let config = DialectSourceConfig::new(dir.path().join("first"), &["*.mongodb.xml"])
        .with_roots([dir.path().join("first"), dir.path().join("second")]);
    let set = discover_dialect(Dialect::Persistence, &config).unwrap();
    assert_eq!(file_names(&set), vec!["B.mongodb.xml", "A.mongodb.xml"]);
    assert_eq!(set.dialect(), Dialect::Persistence);
}

#[test]
fn missing_root_reported() {
    let config = SourceConfig::under("/nonexistent/docweave/root");
    let err = discover(&config).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}
