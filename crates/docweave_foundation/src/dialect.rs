//! The three metadata dialects.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A metadata dialect.
///
/// Each dialect is authored independently and owns a disjoint set of field
/// attributes: persistence owns field kinds and storage types, serialization
/// owns exposed names and flags, validation owns the required flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Dialect {
    /// Document store mapping (documents, embedded documents, fields).
    Persistence,
    /// Wire serialization mapping (classes, properties, exposed names).
    Serialization,
    /// Validation constraint mapping (classes, properties, constraints).
    Validation,
}

impl Dialect {
    /// All dialects, in load order.
    pub const ALL: [Self; 3] = [Self::Persistence, Self::Serialization, Self::Validation];

    /// Returns the lowercase name of this dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persistence => "persistence",
            Self::Serialization => "serialization",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
