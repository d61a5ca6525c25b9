//! Load configuration.
//!
//! Controls how strictly the three dialects are cross-checked while they are
//! assembled into a [`crate::MetadataSet`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with serialization or validation descriptors for entities the
/// persistence dialect does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OrphanPolicy {
    /// Fail with a missing persistence descriptor error.
    #[default]
    Reject,
    /// Keep them out of the build and log a warning.
    Skip,
}

/// What to do when one dialect declares the same entity twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// Fail with a duplicate entity error.
    #[default]
    Reject,
    /// The declaration from the later source replaces the earlier one.
    LastWins,
}

/// Configuration for assembling metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadConfig {
    /// Policy for descriptors without a persistence counterpart.
    pub orphans: OrphanPolicy,
    /// Policy for entities declared twice within one dialect.
    pub duplicates: DuplicatePolicy,
}

impl LoadConfig {
    /// Every inconsistency is an error. This is the default.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Tolerates orphaned descriptors and redeclared entities, logging each.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            orphans: OrphanPolicy::Skip,
            duplicates: DuplicatePolicy::LastWins,
        }
    }

    /// Builder method to set the orphan policy.
    #[must_use]
    pub fn with_orphans(mut self, orphans: OrphanPolicy) -> Self {
        self.orphans = orphans;
        self
    }

    /// Builder method to set the duplicate policy.
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
