//! Filesystem source discovery.
//!
//! Each dialect is configured with a set of root directories and glob
//! patterns matched against paths relative to each root. Files are read in
//! sorted path order, so discovery (and therefore entity order) is stable
//! across runs and platforms.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use docweave_foundation::{Dialect, Error, Result};

use crate::source::{DialectSources, MetadataSource, SourceSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where to look for one dialect's sources.
///
/// `*` does not cross directory separators; use `**/` to search below a root.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialectSourceConfig {
    /// Directories to search recursively.
    pub roots: Vec<PathBuf>,
    /// Glob patterns, relative to a root.
    pub patterns: Vec<String>,
}

impl DialectSourceConfig {
    /// Creates a configuration with one root and the given patterns.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, patterns: &[&str]) -> Self {
        Self {
            roots: vec![root.into()],
            patterns: patterns.iter().map(ToString::to_string).collect(),
        }
    }

    /// Default patterns for a dialect, searched from the current directory.
    #[must_use]
    pub fn default_for(dialect: Dialect) -> Self {
        let patterns: &[&str] = match dialect {
            Dialect::Persistence => &["**/*.mongodb.xml"],
            Dialect::Serialization => &["**/serializer/*.xml"],
            Dialect::Validation => &["**/validation.xml", "**/validation/*.xml"],
        };
        Self::new(".", patterns)
    }

    /// Replaces the roots.
    #[must_use]
    pub fn with_roots(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        self.roots = roots.into_iter().collect();
        self
    }

    /// Resolves relative roots against `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        for root in &mut self.roots {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
        self
    }

    fn glob_set(&self, dialect: Dialect) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| Error::config(format!("invalid {dialect} pattern `{pattern}`: {e}")))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| Error::config(format!("invalid {dialect} patterns: {e}")))
    }
}

/// Where to look for the sources of all three dialects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SourceConfig {
    /// Persistence mapping locations.
    pub persistence: DialectSourceConfig,
    /// Serialization mapping locations.
    pub serialization: DialectSourceConfig,
    /// Validation mapping locations.
    pub validation: DialectSourceConfig,
}

impl SourceConfig {
    /// Default patterns for every dialect under a single root.
    #[must_use]
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            persistence: DialectSourceConfig::default_for(Dialect::Persistence)
                .with_roots([root.clone()]),
            serialization: DialectSourceConfig::default_for(Dialect::Serialization)
                .with_roots([root.clone()]),
            validation: DialectSourceConfig::default_for(Dialect::Validation).with_roots([root]),
        }
    }

    /// Returns the configuration for a dialect.
    #[must_use]
    pub const fn get(&self, dialect: Dialect) -> &DialectSourceConfig {
        match dialect {
            Dialect::Persistence => &self.persistence,
            Dialect::Serialization => &self.serialization,
            Dialect::Validation => &self.validation,
        }
    }

    /// Resolves every relative root against `base`.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        Self {
            persistence: self.persistence.relative_to(base),
            serialization: self.serialization.relative_to(base),
            validation: self.validation.relative_to(base),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::under(".")
    }
}

/// Discovers and reads the sources of all three dialects.
///
/// # Errors
///
/// Returns a configuration error for invalid patterns or missing roots, and
/// an I/O error if a directory or file cannot be read.
pub fn discover(config: &SourceConfig) -> Result<DialectSources> {
    Ok(DialectSources {
        persistence: discover_dialect(Dialect::Persistence, &config.persistence)?,
        serialization: discover_dialect(Dialect::Serialization, &config.serialization)?,
        validation: discover_dialect(Dialect::Validation, &config.validation)?,
    })
}

/// Discovers and reads the sources of one dialect.
///
/// # Errors
///
/// See [`discover`].
pub fn discover_dialect(dialect: Dialect, config: &DialectSourceConfig) -> Result<SourceSet> {
    let globs = config.glob_set(dialect)?;
    let mut set = SourceSet::new(dialect);

    for root in &config.roots {
        if !root.is_dir() {
            return Err(Error::config(format!(
                "{dialect} root '{}' is not a directory",
                root.display()
            )));
        }
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root.as_path());
                Error::io(format!("failed to walk '{}': {e}", path.display()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if globs.is_match(relative) {
                set.push(MetadataSource::read(entry.path())?);
            }
        }
    }

    debug!(dialect = %dialect, sources = set.len(), "discovered metadata sources");
    Ok(set)
}
