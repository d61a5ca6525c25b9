//! Raw metadata sources.
//!
//! The compiler never decides which files exist. Callers either enumerate
//! sources themselves and build a [`SourceSet`] in memory, or use
//! [`crate::discover`] to walk configured directories.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use docweave_foundation::{Dialect, Error, Result};

/// One metadata document in a single dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataSource {
    /// Identifier reported in errors (usually the file path).
    pub id: Arc<str>,
    /// Full source text.
    pub text: String,
}

impl MetadataSource {
    /// Creates a source from an identifier and its text.
    #[must_use]
    pub fn new(id: impl AsRef<str>, text: impl Into<String>) -> Self {
        Self {
            id: Arc::from(id.as_ref()),
            text: text.into(),
        }
    }

    /// Reads a source from a file, using its path as the identifier.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// Ordered collection of sources for one dialect.
///
/// Order is discovery order; it decides the order entities are listed in
/// and, under [`crate::DuplicatePolicy::LastWins`], which declaration wins.
#[derive(Clone, Debug)]
pub struct SourceSet {
    dialect: Dialect,
    sources: Vec<MetadataSource>,
}

impl SourceSet {
    /// Creates an empty source set for a dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sources: Vec::new(),
        }
    }

    /// Creates a source set from already enumerated sources.
    #[must_use]
    pub fn from_sources(dialect: Dialect, sources: impl IntoIterator<Item = MetadataSource>) -> Self {
        Self {
            dialect,
            sources: sources.into_iter().collect(),
        }
    }

    /// Adds a source.
    #[must_use]
    pub fn with_source(mut self, source: MetadataSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Appends a source.
    pub fn push(&mut self, source: MetadataSource) {
        self.sources.push(source);
    }

    /// Returns the dialect these sources are written in.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Iterates sources in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataSource> {
        self.sources.iter()
    }

    /// Returns the number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if there are no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Sources for all three dialects.
#[derive(Clone, Debug)]
pub struct DialectSources {
    /// Persistence mapping sources.
    pub persistence: SourceSet,
    /// Serialization mapping sources.
    pub serialization: SourceSet,
    /// Validation mapping sources.
    pub validation: SourceSet,
}

impl DialectSources {
    /// Creates an empty set of sources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            persistence: SourceSet::new(Dialect::Persistence),
            serialization: SourceSet::new(Dialect::Serialization),
            validation: SourceSet::new(Dialect::Validation),
        }
    }

    /// Adds a persistence source.
    #[must_use]
    pub fn with_persistence(mut self, id: &str, text: impl Into<String>) -> Self {
        self.persistence.push(MetadataSource::new(id, text));
        self
    }

    /// Adds a serialization source.
    #[must_use]
    pub fn with_serialization(mut self, id: &str, text: impl Into<String>) -> Self {
        self.serialization.push(MetadataSource::new(id, text));
        self
    }

    /// Adds a validation source.
    #[must_use]
    pub fn with_validation(mut self, id: &str, text: impl Into<String>) -> Self {
        self.validation.push(MetadataSource::new(id, text));
        self
    }

    /// Returns the source set for a dialect.
    #[must_use]
    pub const fn get(&self, dialect: Dialect) -> &SourceSet {
        match dialect {
            Dialect::Persistence => &self.persistence,
            Dialect::Serialization => &self.serialization,
            Dialect::Validation => &self.validation,
        }
    }

    /// Returns the total number of sources across dialects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.persistence.len() + self.serialization.len() + self.validation.len()
    }

    /// Returns true if no dialect has any source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DialectSources {
    fn default() -> Self {
        Self::new()
    }
}
