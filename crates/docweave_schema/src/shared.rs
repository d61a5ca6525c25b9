//! A reader-visible graph that can be replaced while being read.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use docweave_foundation::Result;

use crate::graph::DocumentGraph;

/// Shared handle to the current [`DocumentGraph`].
///
/// Readers take a snapshot with [`load`](Self::load) and keep using it for
/// as long as they like. Reloading builds a fresh graph off to the side and
/// publishes it with a single atomic swap; graphs are never mutated in place.
#[derive(Debug)]
pub struct SharedGraph {
    current: ArcSwap<DocumentGraph>,
}

impl SharedGraph {
    /// Publishes an initial graph.
    #[must_use]
    pub fn new(graph: DocumentGraph) -> Self {
        Self {
            current: ArcSwap::from_pointee(graph),
        }
    }

    /// Returns a snapshot of the current graph.
    #[must_use]
    pub fn load(&self) -> Arc<DocumentGraph> {
        self.current.load_full()
    }

    /// Publishes a new graph, returning the one it replaced.
    pub fn store(&self, graph: DocumentGraph) -> Arc<DocumentGraph> {
        self.current.swap(Arc::new(graph))
    }

    /// Builds a replacement graph and publishes it if the build succeeds.
    ///
    /// On failure the current graph stays published.
    ///
    /// # Errors
    ///
    /// Returns the build error.
    pub fn rebuild<F>(&self, build: F) -> Result<Arc<DocumentGraph>>
    where
        F: FnOnce() -> Result<DocumentGraph>,
    {
        match build() {
            Ok(graph) => {
                let graph = Arc::new(graph);
                self.current.store(Arc::clone(&graph));
                info!(documents = graph.len(), "published rebuilt document graph");
                Ok(graph)
            }
            Err(err) => {
                warn!(error = %err, "graph rebuild failed, keeping current graph");
                Err(err)
            }
        }
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new(DocumentGraph::default())
    }
}
