//! Rendering for the `docweave` subcommands.
//!
//! Each command renders to a `String` so it can be tested without a
//! terminal; the binary only prints.

use std::fmt::Write;

use docweave_foundation::{Error, ErrorKind, Result};
use docweave_metadata::Relation;
use docweave_schema::{Document, DocumentGraph, Field, FieldKind};

/// Which fields `paths` lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PathFilter {
    /// Every field.
    #[default]
    All,
    /// Read-only fields.
    ReadOnly,
    /// Searchable fields.
    Searchable,
    /// Required fields.
    Required,
    /// Fields whose scalar or element type is exactly this.
    Type(String),
}

impl PathFilter {
    /// Returns true if `field` passes the filter.
    #[must_use]
    pub fn matches(&self, field: &Field) -> bool {
        match self {
            Self::All => true,
            Self::ReadOnly => field.read_only,
            Self::Searchable => field.searchable(),
            Self::Required => field.required,
            Self::Type(name) => field.type_name() == Some(name.as_str()),
        }
    }
}

/// Summarizes a built graph.
#[must_use]
pub fn check(graph: &DocumentGraph) -> String {
    let documents = graph.len();
    let fields: usize = graph.documents().map(|d| d.len()).sum();
    let embeds: usize = graph.documents().map(|d| d.embed_fields().count()).sum();
    format!("ok: {documents} documents, {fields} fields, {embeds} embeds")
}

/// Renders one document.
///
/// # Errors
///
/// Returns an unknown entity error if the graph has no such document.
pub fn show(graph: &DocumentGraph, entity: &str) -> Result<String> {
    let document = graph.get_document(entity)?;
    Ok(render_document(document))
}

/// Renders a document as an indented field listing.
#[must_use]
pub fn render_document(document: &Document) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", document.name);
    if document.embedded {
        out.push_str(" (embedded)");
    }
    out.push('\n');

    for field in &document.fields {
        let _ = write!(out, "  {}", field.exposed_name);
        if field.exposed_name != field.internal_name {
            let _ = write!(out, " <- {}", field.internal_name);
        }
        let _ = write!(out, ": {}", describe_kind(&field.kind));

        let flags = flags(field);
        if !flags.is_empty() {
            let _ = write!(out, " [{}]", flags.join(", "));
        }
        out.push('\n');
    }
    out
}

fn describe_kind(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Scalar { scalar_type, .. } => scalar_type.clone(),
        FieldKind::Array { element_type, .. } => format!("array of {element_type}"),
        FieldKind::EmbedOne { target, relation } => format!("one {target}{}", relation_suffix(*relation)),
        FieldKind::EmbedMany { target, relation } => format!("many {target}{}", relation_suffix(*relation)),
    }
}

const fn relation_suffix(relation: Relation) -> &'static str {
    match relation {
        Relation::Embedded => "",
        Relation::Referenced => " (reference)",
    }
}

fn flags(field: &Field) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if field.required {
        flags.push("required");
    }
    if field.read_only {
        flags.push("read-only");
    }
    if field.searchable() {
        flags.push("searchable");
    }
    flags
}

/// Renders every document as pretty JSON, in discovery order.
///
/// # Errors
///
/// Returns an internal error if serialization fails.
pub fn dump(graph: &DocumentGraph) -> Result<String> {
    let documents: Vec<&Document> = graph.documents().map(|document| &**document).collect();
    serde_json::to_string_pretty(&documents)
        .map_err(|e| Error::new(ErrorKind::Internal(format!("failed to serialize documents: {e}"))))
}

/// Lists the dotted paths of matching fields reachable from `entity`.
///
/// # Errors
///
/// Returns an unknown entity error if the graph has no such document.
pub fn paths(graph: &DocumentGraph, entity: &str, filter: &PathFilter) -> Result<String> {
    let paths = graph.field_paths(entity, |field| filter.matches(field))?;
    let mut out = String::new();
    for path in paths {
        let _ = writeln!(out, "{path}");
    }
    Ok(out)
}
