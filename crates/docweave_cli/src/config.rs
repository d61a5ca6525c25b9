//! Workspace configuration (`docweave.toml`).
//!
//! ```toml
//! [load]
//! orphans = "skip"
//! duplicates = "reject"
//!
//! [sources.persistence]
//! roots = ["src"]
//! patterns = ["**/*.mongodb.xml"]
//! ```
//!
//! Every table is optional. Relative roots are resolved against the
//! directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use docweave_foundation::{Error, Result};
use docweave_metadata::{LoadConfig, MetadataSet, SourceConfig, discover};
use docweave_schema::DocumentGraph;

/// File name looked up in a workspace directory.
pub const CONFIG_FILE: &str = "docweave.toml";

/// Everything needed to build a graph from a directory tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Cross-checking policies.
    pub load: LoadConfig,
    /// Where each dialect's sources live.
    pub sources: SourceConfig,
}

impl WorkspaceConfig {
    /// Parses a configuration from TOML text. Roots are left as written.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not a valid configuration.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("invalid {CONFIG_FILE}: {e}")))
    }

    /// Reads a configuration file, resolving roots against its directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration
    /// error if it cannot be parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;
        let config = Self::from_toml(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        debug!(path = %path.display(), "read workspace configuration");
        Ok(config.relative_to(base))
    }

    /// Locates the configuration for a workspace path.
    ///
    /// A file is read as a configuration. A directory uses its
    /// `docweave.toml` when present, and the default patterns under the
    /// directory otherwise.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub fn locate(path: &Path) -> Result<Self> {
        if path.is_file() {
            return Self::read(path);
        }
        let candidate = path.join(CONFIG_FILE);
        if candidate.is_file() {
            return Self::read(&candidate);
        }
        debug!(path = %path.display(), "no workspace configuration, using defaults");
        Ok(Self {
            load: LoadConfig::default(),
            sources: SourceConfig::under(path),
        })
    }

    /// Replaces the load policies.
    #[must_use]
    pub fn with_load(mut self, load: LoadConfig) -> Self {
        self.load = load;
        self
    }

    /// Resolves every relative root against `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.sources = self.sources.relative_to(base);
        self
    }

    /// Returns every configured root, deduplicated.
    #[must_use]
    pub fn roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = [&self.sources.persistence, &self.sources.serialization, &self.sources.validation]
            .into_iter()
            .flat_map(|dialect| dialect.roots.iter().cloned())
            .collect();
        roots.sort();
        roots.dedup();
        roots
    }

    /// Discovers and loads the workspace metadata.
    ///
    /// # Errors
    ///
    /// Returns the first discovery or load error.
    pub fn load_metadata(&self) -> Result<MetadataSet> {
        let sources = discover(&self.sources)?;
        MetadataSet::load(&sources, self.load)
    }

    /// Discovers, loads and resolves the workspace into a graph.
    ///
    /// # Errors
    ///
    /// Returns the first discovery, load or resolution error.
    pub fn build_graph(&self) -> Result<DocumentGraph> {
        DocumentGraph::build(&self.load_metadata()?)
    }
}
