//! The document graph.
//!
//! Built once, then read without synchronization. Documents are stored by
//! name in a persistent map, so cloning a graph is cheap and a rebuilt graph
//! can be swapped in atomically (see [`SharedGraph`](crate::SharedGraph)).

use std::sync::Arc;

use im::HashMap;
use tracing::info;

use docweave_foundation::{EntityName, Error, Result};
use docweave_metadata::{DialectSources, LoadConfig, MetadataSet};

use crate::document::Document;
use crate::field::Field;
use crate::resolver::DocumentResolver;

/// One [`Document`] per entity, with every embed target resolved.
#[derive(Clone, Debug, Default)]
pub struct DocumentGraph {
    documents: HashMap<EntityName, Arc<Document>>,
    order: Vec<EntityName>,
}

impl DocumentGraph {
    /// Resolves every entity of a metadata set.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error. No partial graph is produced.
    pub fn build(metadata: &MetadataSet) -> Result<Self> {
        let graph = DocumentResolver::new(metadata).into_graph()?;
        info!(documents = graph.len(), "built document graph");
        Ok(graph)
    }

    /// Loads metadata from sources and builds the graph.
    ///
    /// # Errors
    ///
    /// Returns the first load or resolution error.
    pub fn compile(sources: &DialectSources, config: LoadConfig) -> Result<Self> {
        let metadata = MetadataSet::load(sources, config)?;
        Self::build(&metadata)
    }

    pub(crate) fn from_parts(documents: HashMap<EntityName, Arc<Document>>, order: Vec<EntityName>) -> Self {
        Self { documents, order }
    }

    /// Returns a document by entity name.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if the graph has no such document.
    pub fn get_document(&self, entity: &str) -> Result<&Arc<Document>> {
        self.document(entity)
            .ok_or_else(|| Error::unknown_entity(EntityName::new(entity), None))
    }

    /// Returns a document by entity name, if present.
    #[must_use]
    pub fn document(&self, entity: &str) -> Option<&Arc<Document>> {
        self.documents.get(entity)
    }

    /// Iterates all documents in discovery order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.order.iter().filter_map(|name| self.documents.get(name))
    }

    /// Iterates entity names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &EntityName> {
        self.order.iter()
    }

    /// Returns the document an embed field points at.
    #[must_use]
    pub fn target(&self, field: &Field) -> Option<&Arc<Document>> {
        field.target().and_then(|target| self.documents.get(target))
    }

    /// Returns true if the graph has a document for the entity.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.documents.contains_key(entity)
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the graph has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
