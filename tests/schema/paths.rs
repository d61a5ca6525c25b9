//! Integration tests for field path projection

use docweave_metadata::{DialectSources, LoadConfig};
use docweave_schema::{DocumentGraph, FieldPath};

fn graph() -> DocumentGraph {
    let sources = DialectSources::new()
        .with_persistence(
            "p.xml",
            r#"<m>
                 <document name="Shop">
                   <field fieldName="id"/>
                   <embed-many field="products" target-document="Product"/>
                 </document>
                 <embedded-document name="Product">
                   <field fieldName="sku"/>
                   <embed-many field="variants" target-document="Variant"/>
                 </embedded-document>
                 <embedded-document name="Variant">
                   <field fieldName="link"/>
                   <embed-one field="parent" target-document="Product"/>
                 </embedded-document>
               </m>"#,
        )
        .with_serialization(
            "s.xml",
            r#"<serializer><class name="Variant"><property name="link" serialized-name="$ref" read-only="true"/></class></serializer>"#,
        );
    DocumentGraph::compile(&sources, LoadConfig::strict()).unwrap()
}

#[test]
fn nested_many_segments() {
    let paths = graph().field_paths("Shop", |f| f.read_only).unwrap();
    assert_eq!(paths, vec![FieldPath::new(["products", "0", "variants", "0", "$ref"])]);
    assert_eq!(paths[0].to_string(), "products.0.variants.0.$ref");
    assert_eq!(paths[0].segments().len(), 5);
}

#[test]
fn cycle_through_parent_terminates() {
    let paths: Vec<String> = graph()
        .field_paths("Product", |_| true)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(paths, vec!["sku", "variants", "variants.0.$ref", "variants.0.parent"]);
}
