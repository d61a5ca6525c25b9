//! Per-dialect descriptor maps.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace, warn};

use docweave_foundation::{Dialect, EntityName, Error, Result};

use crate::config::DuplicatePolicy;
use crate::source::SourceSet;

/// A raw, per-entity descriptor produced by one dialect parser.
pub trait Descriptor: Sized {
    /// The dialect this descriptor belongs to.
    const DIALECT: Dialect;

    /// The entity this descriptor describes.
    fn entity(&self) -> &EntityName;

    /// Identifier of the source that declared it.
    fn source_id(&self) -> &str;

    /// Parses every descriptor declared in one source.
    ///
    /// # Errors
    ///
    /// Returns a metadata parse error if the source is malformed.
    fn parse(source: &crate::MetadataSource) -> Result<Vec<Self>>;
}

/// Entity name to descriptor, in the order entities were discovered.
#[derive(Clone, Debug)]
pub struct DescriptorMap<D> {
    entries: IndexMap<EntityName, D>,
}

impl<D: Descriptor> DescriptorMap<D> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Parses every source of a set and collects the descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if any source is malformed, if the set belongs to a
    /// different dialect, or if an entity is declared twice and the policy
    /// rejects duplicates.
    pub fn load(sources: &SourceSet, duplicates: DuplicatePolicy) -> Result<Self> {
        if sources.dialect() != D::DIALECT {
            return Err(Error::config(format!(
                "{} sources passed to the {} loader",
                sources.dialect(),
                D::DIALECT
            )));
        }

        let mut map = Self::new();
        for source in sources.iter() {
            let descriptors = D::parse(source)?;
            debug!(
                dialect = %D::DIALECT,
                source = %source.id,
                entities = descriptors.len(),
                "parsed metadata source"
            );
            for descriptor in descriptors {
                map.insert(descriptor, duplicates)?;
            }
        }
        Ok(map)
    }

    /// Inserts a descriptor, applying the duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns a duplicate entity error under [`DuplicatePolicy::Reject`].
    pub fn insert(&mut self, descriptor: D, duplicates: DuplicatePolicy) -> Result<()> {
        match self.entries.entry(descriptor.entity().clone()) {
            Entry::Vacant(slot) => {
                trace!(dialect = %D::DIALECT, entity = %descriptor.entity(), "registered entity");
                slot.insert(descriptor);
            }
            Entry::Occupied(mut slot) => match duplicates {
                DuplicatePolicy::Reject => {
                    return Err(Error::duplicate_entity(
                        descriptor.entity().clone(),
                        D::DIALECT,
                        slot.get().source_id(),
                        descriptor.source_id(),
                    ));
                }
                DuplicatePolicy::LastWins => {
                    warn!(
                        dialect = %D::DIALECT,
                        entity = %descriptor.entity(),
                        replaced = slot.get().source_id(),
                        by = descriptor.source_id(),
                        "entity redeclared, later declaration wins"
                    );
                    slot.insert(descriptor);
                }
            },
        }
        Ok(())
    }

    /// Returns the descriptor for an entity.
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&D> {
        self.entries.get(entity)
    }

    /// Returns true if the entity has a descriptor.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entries.contains_key(entity)
    }

    /// Removes an entity, preserving the order of the rest.
    pub fn remove(&mut self, entity: &str) -> Option<D> {
        self.entries.shift_remove(entity)
    }

    /// Iterates entity names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &EntityName> {
        self.entries.keys()
    }

    /// Iterates descriptors in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &D> {
        self.entries.values()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entity is described.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D: Descriptor> Default for DescriptorMap<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Descriptor> FromIterator<D> for DescriptorMap<D> {
    /// Collects descriptors; later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut map = Self::new();
        for descriptor in iter {
            map.entries.insert(descriptor.entity().clone(), descriptor);
        }
        map
    }
}
