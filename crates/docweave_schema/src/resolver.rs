//! Memoized, cycle-tolerant document resolution.
//!
//! The resolver owns its cache; there is no global state. Resolving an
//! entity classifies its fields and, for every embed field, resolves the
//! target first. An entity already on the resolution stack is a forward
//! reference: it is not resolved again, and it will be cached by the time
//! the outermost frame returns.
//!
//! A failed top-level resolution restores the cache to what it was before
//! the call, so a resolver never holds documents whose targets are missing.

use std::sync::Arc;

use im::HashMap;
use tracing::{debug, trace};

use docweave_foundation::{EntityName, Error, ErrorContext, Result};
use docweave_metadata::{DescriptorTriple, MetadataSet};

use crate::classify::{EmbedTargets, classify};
use crate::document::Document;
use crate::graph::DocumentGraph;

/// Resolves entities of one [`MetadataSet`] into [`Document`]s on demand.
#[derive(Debug)]
pub struct DocumentResolver<'m> {
    metadata: &'m MetadataSet,
    cache: HashMap<EntityName, Arc<Document>>,
    stack: Vec<EntityName>,
}

impl<'m> DocumentResolver<'m> {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(metadata: &'m MetadataSet) -> Self {
        Self {
            metadata,
            cache: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Resolves an entity, returning the cached document on repeated calls.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if the entity or any entity it embeds
    /// has no persistence descriptor, or a missing persistence descriptor
    /// error if the entity was only declared by a secondary dialect.
    pub fn resolve(&mut self, entity: &str) -> Result<Arc<Document>> {
        if let Some(document) = self.cache.get(entity) {
            trace!(entity, "document cache hit");
            return Ok(Arc::clone(document));
        }

        let metadata = self.metadata;
        let Some(triple) = metadata.triple(entity) else {
            return Err(self.not_found(entity));
        };

        let checkpoint = self.cache.clone();
        let result = self.build(triple);
        if result.is_err() {
            self.cache = checkpoint;
            self.stack.clear();
        }
        result
    }

    /// Resolves every entity, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn resolve_all(&mut self) -> Result<Vec<Arc<Document>>> {
        let metadata = self.metadata;
        metadata
            .entity_names()
            .map(|name| self.resolve(name.as_str()))
            .collect()
    }

    /// Returns a resolved document without resolving anything.
    #[must_use]
    pub fn cached(&self, entity: &str) -> Option<&Arc<Document>> {
        self.cache.get(entity)
    }

    /// Returns the number of resolved documents.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolves every remaining entity and freezes the result into a graph.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn into_graph(mut self) -> Result<DocumentGraph> {
        self.resolve_all()?;
        let order = self.metadata.entity_names().cloned().collect();
        Ok(DocumentGraph::from_parts(self.cache, order))
    }

    fn build(&mut self, triple: DescriptorTriple<'m>) -> Result<Arc<Document>> {
        let name = triple.entity().clone();
        self.stack.push(name.clone());
        let fields = classify(&triple, self);
        self.stack.pop();

        let document = Arc::new(Document::new(name.clone(), triple.persistence.embedded, fields?));
        debug!(entity = %name, fields = document.len(), "resolved document");
        self.cache.insert(name, Arc::clone(&document));
        Ok(document)
    }

    fn not_found(&self, entity: &str) -> Error {
        let name = EntityName::new(entity);
        match self.metadata.orphan_dialect(entity) {
            Some(dialect) => Error::missing_persistence(name, dialect),
            None => Error::unknown_entity(name, None),
        }
    }

    fn resolution_context(&self) -> ErrorContext {
        self.stack
            .iter()
            .fold(ErrorContext::new(), |context, frame| context.with_frame(frame.as_str()))
    }
}

impl EmbedTargets for DocumentResolver<'_> {
    fn require(&mut self, target: &EntityName, referenced_from: &EntityName) -> Result<()> {
        if self.cache.contains_key(target) {
            trace!(entity = %target, "document cache hit");
            return Ok(());
        }
        if self.stack.contains(target) {
            trace!(entity = %target, from = %referenced_from, "forward reference");
            return Ok(());
        }

        let metadata = self.metadata;
        let Some(triple) = metadata.triple(target.as_str()) else {
            return Err(
                Error::unknown_entity(target.clone(), Some(referenced_from.clone()))
                    .with_context(self.resolution_context()),
            );
        };
        self.build(triple).map(drop)
    }
}
