//! Dotted field paths through embedded documents.
//!
//! Consumers that rewrite links, enforce read-only fields or validate query
//! fields address nested values by path: exposed names joined with `.`, with
//! a `0` segment after every embed-many field (`items.0.ref`).

use std::fmt;

use docweave_foundation::{EntityName, Result};

use crate::document::Document;
use crate::field::Field;
use crate::graph::DocumentGraph;

/// Segment standing for "any element" of an embed-many field.
pub const MANY_SEGMENT: &str = "0";

/// A path from a root document to a (possibly nested) field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates a path from its segments.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl DocumentGraph {
    /// Collects the path of every field, reachable from `root`, that matches
    /// `predicate`.
    ///
    /// Embeds are followed depth first in field order. A document already on
    /// the current walk is not entered again, so cyclic graphs terminate.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if `root` is not in the graph.
    pub fn field_paths<P>(&self, root: &str, predicate: P) -> Result<Vec<FieldPath>>
    where
        P: Fn(&Field) -> bool,
    {
        let document = self.get_document(root)?;
        let mut walk = Walk {
            graph: self,
            predicate: &predicate,
            prefix: Vec::new(),
            visiting: vec![document.name.clone()],
            found: Vec::new(),
        };
        walk.document(document);
        Ok(walk.found)
    }
}

struct Walk<'g, 'p> {
    graph: &'g DocumentGraph,
    predicate: &'p dyn Fn(&Field) -> bool,
    prefix: Vec<String>,
    visiting: Vec<EntityName>,
    found: Vec<FieldPath>,
}

impl Walk<'_, '_> {
    fn document(&mut self, document: &Document) {
        for field in &document.fields {
            self.prefix.push(field.exposed_name.clone());
            if (self.predicate)(field) {
                self.found.push(FieldPath::new(self.prefix.iter().cloned()));
            }
            self.embed(field);
            self.prefix.pop();
        }
    }

    fn embed(&mut self, field: &Field) {
        let graph = self.graph;
        let Some(target) = graph.target(field) else {
            return;
        };
        if self.visiting.contains(&target.name) {
            return;
        }

        let many = field.is_many();
        if many {
            self.prefix.push(MANY_SEGMENT.to_string());
        }
        self.visiting.push(target.name.clone());
        self.document(target);
        self.visiting.pop();
        if many {
            self.prefix.pop();
        }
    }
}
