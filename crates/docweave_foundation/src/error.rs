//! Error types for docweave.
//!
//! Uses `thiserror` for ergonomic error definition with rich context. Every
//! error is fatal to schema construction: no partially built graph is ever
//! handed out.

use std::fmt;

use thiserror::Error;

use crate::dialect::Dialect;
use crate::name::EntityName;

/// Result alias used throughout docweave.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for docweave operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a malformed metadata error for the given source.
    #[must_use]
    pub fn metadata_parse(source_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MetadataParse {
            source_id: source_id.into(),
            detail: detail.into(),
        })
    }

    /// Creates an unknown entity error.
    ///
    /// `referenced_from` is the entity whose embed field named the missing
    /// entity, or `None` for a direct lookup.
    #[must_use]
    pub fn unknown_entity(entity_name: EntityName, referenced_from: Option<EntityName>) -> Self {
        Self::new(ErrorKind::UnknownEntity {
            entity_name,
            referenced_from,
        })
    }

    /// Creates a missing persistence descriptor error.
    #[must_use]
    pub fn missing_persistence(entity_name: EntityName, dialect: Dialect) -> Self {
        Self::new(ErrorKind::MissingPersistenceDescriptor {
            entity_name,
            dialect,
        })
    }

    /// Creates a duplicate entity error.
    #[must_use]
    pub fn duplicate_entity(
        entity_name: EntityName,
        dialect: Dialect,
        first_source: impl Into<String>,
        second_source: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::DuplicateEntity {
            entity_name,
            dialect,
            first_source: first_source.into(),
            second_source: second_source.into(),
        })
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Returns the entity this error is about, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&EntityName> {
        match &self.kind {
            ErrorKind::UnknownEntity { entity_name, .. }
            | ErrorKind::MissingPersistenceDescriptor { entity_name, .. }
            | ErrorKind::DuplicateEntity { entity_name, .. } => Some(entity_name),
            ErrorKind::MetadataParse { .. }
            | ErrorKind::Io(_)
            | ErrorKind::Config(_)
            | ErrorKind::Internal(_) => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A metadata source could not be parsed in its dialect's grammar.
    #[error("malformed metadata in {source_id}: {detail}")]
    MetadataParse {
        /// Identifier of the offending source (usually a path).
        source_id: String,
        /// Description of the problem.
        detail: String,
    },

    /// An entity was requested or referenced but has no persistence descriptor.
    #[error("unknown entity `{entity_name}`{}", referenced_from_suffix(.referenced_from.as_ref()))]
    UnknownEntity {
        /// The entity that could not be found.
        entity_name: EntityName,
        /// The entity whose embed field referenced it.
        referenced_from: Option<EntityName>,
    },

    /// An entity is described by a secondary dialect but not by persistence.
    #[error("entity `{entity_name}` has a {dialect} descriptor but no persistence descriptor")]
    MissingPersistenceDescriptor {
        /// The entity lacking a persistence descriptor.
        entity_name: EntityName,
        /// The dialect that does describe it.
        dialect: Dialect,
    },

    /// The same entity is declared twice within one dialect.
    #[error(
        "entity `{entity_name}` declared twice in {dialect} metadata ({first_source} and {second_source})"
    )]
    DuplicateEntity {
        /// The entity declared twice.
        entity_name: EntityName,
        /// The dialect containing both declarations.
        dialect: Dialect,
        /// Source of the first declaration.
        first_source: String,
        /// Source of the second declaration.
        second_source: String,
    },

    /// Reading a metadata source failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn referenced_from_suffix(referenced_from: Option<&EntityName>) -> String {
    referenced_from.map_or_else(String::new, |from| format!(" referenced from `{from}`"))
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source identifier.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Chain of entities being resolved when the error occurred, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  while resolving {frame}")?;
            }
        }
        Ok(())
    }
}
