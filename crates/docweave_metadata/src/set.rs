//! The three descriptor maps, assembled and cross-checked.

use tracing::{info, warn};

use docweave_foundation::{Dialect, EntityName, Error, Result};

use crate::config::{LoadConfig, OrphanPolicy};
use crate::descriptor::{Descriptor, DescriptorMap};
use crate::persistence::PersistenceDescriptor;
use crate::serialization::SerializationDescriptor;
use crate::source::DialectSources;
use crate::validation::ValidationDescriptor;

/// One entity's descriptors across the three dialects.
#[derive(Clone, Copy, Debug)]
pub struct DescriptorTriple<'a> {
    /// The mandatory persistence descriptor.
    pub persistence: &'a PersistenceDescriptor,
    /// The serialization descriptor, if the entity has one.
    pub serialization: Option<&'a SerializationDescriptor>,
    /// The validation descriptor, if the entity has one.
    pub validation: Option<&'a ValidationDescriptor>,
}

impl DescriptorTriple<'_> {
    /// Returns the entity name.
    #[must_use]
    pub fn entity(&self) -> &EntityName {
        &self.persistence.entity
    }
}

/// All metadata for one build: a descriptor map per dialect.
#[derive(Clone, Debug, Default)]
pub struct MetadataSet {
    persistence: DescriptorMap<PersistenceDescriptor>,
    serialization: DescriptorMap<SerializationDescriptor>,
    validation: DescriptorMap<ValidationDescriptor>,
    orphans: Vec<(EntityName, Dialect)>,
}

impl MetadataSet {
    /// Loads and assembles metadata from the sources of all three dialects.
    ///
    /// # Errors
    ///
    /// Returns the first parse, duplicate, or orphan error encountered.
    pub fn load(sources: &DialectSources, config: LoadConfig) -> Result<Self> {
        let persistence = DescriptorMap::load(&sources.persistence, config.duplicates)?;
        let serialization = DescriptorMap::load(&sources.serialization, config.duplicates)?;
        let validation = DescriptorMap::load(&sources.validation, config.duplicates)?;
        let set = Self::assemble(persistence, serialization, validation, config.orphans)?;
        info!(
            persistence = set.persistence.len(),
            serialization = set.serialization.len(),
            validation = set.validation.len(),
            "loaded metadata"
        );
        Ok(set)
    }

    /// Assembles already loaded descriptor maps.
    ///
    /// Serialization and validation descriptors for entities absent from
    /// persistence are rejected or set aside according to `orphans`.
    ///
    /// # Errors
    ///
    /// Returns a missing persistence descriptor error under
    /// [`OrphanPolicy::Reject`].
    pub fn assemble(
        persistence: DescriptorMap<PersistenceDescriptor>,
        mut serialization: DescriptorMap<SerializationDescriptor>,
        mut validation: DescriptorMap<ValidationDescriptor>,
        orphans: OrphanPolicy,
    ) -> Result<Self> {
        let mut found = orphans_of(&persistence, &serialization);
        found.extend(orphans_of(&persistence, &validation));

        if orphans == OrphanPolicy::Reject {
            if let Some((entity, dialect)) = found.first() {
                return Err(Error::missing_persistence(entity.clone(), *dialect));
            }
        }

        for (entity, dialect) in &found {
            warn!(entity = %entity, dialect = %dialect, "descriptor has no persistence counterpart, skipped");
            match dialect {
                Dialect::Serialization => {
                    serialization.remove(entity.as_str());
                }
                Dialect::Validation => {
                    validation.remove(entity.as_str());
                }
                Dialect::Persistence => {}
            }
        }

        Ok(Self {
            persistence,
            serialization,
            validation,
            orphans: found,
        })
    }

    /// Returns the descriptors of an entity, if it has a persistence descriptor.
    #[must_use]
    pub fn triple(&self, entity: &str) -> Option<DescriptorTriple<'_>> {
        let persistence = self.persistence.get(entity)?;
        Some(DescriptorTriple {
            persistence,
            serialization: self.serialization.get(entity),
            validation: self.validation.get(entity),
        })
    }

    /// Returns the dialect of a skipped orphan descriptor for `entity`.
    #[must_use]
    pub fn orphan_dialect(&self, entity: &str) -> Option<Dialect> {
        self.orphans
            .iter()
            .find(|(name, _)| name == entity)
            .map(|(_, dialect)| *dialect)
    }

    /// Returns every skipped orphan descriptor.
    #[must_use]
    pub fn orphans(&self) -> &[(EntityName, Dialect)] {
        &self.orphans
    }

    /// Iterates resolvable entity names, in persistence discovery order.
    pub fn entity_names(&self) -> impl Iterator<Item = &EntityName> {
        self.persistence.names()
    }

    /// Returns true if the entity has a persistence descriptor.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.persistence.contains(entity)
    }

    /// Returns the persistence descriptors.
    #[must_use]
    pub const fn persistence(&self) -> &DescriptorMap<PersistenceDescriptor> {
        &self.persistence
    }

    /// Returns the serialization descriptors.
    #[must_use]
    pub const fn serialization(&self) -> &DescriptorMap<SerializationDescriptor> {
        &self.serialization
    }

    /// Returns the validation descriptors.
    #[must_use]
    pub const fn validation(&self) -> &DescriptorMap<ValidationDescriptor> {
        &self.validation
    }

    /// Returns the number of resolvable entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.persistence.len()
    }

    /// Returns true if no entity can be resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persistence.is_empty()
    }
}

fn orphans_of<D: Descriptor>(
    persistence: &DescriptorMap<PersistenceDescriptor>,
    other: &DescriptorMap<D>,
) -> Vec<(EntityName, Dialect)> {
    other
        .names()
        .filter(|name| !persistence.contains(name.as_str()))
        .map(|name| (name.clone(), D::DIALECT))
        .collect()
}
