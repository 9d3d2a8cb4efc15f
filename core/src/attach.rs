//! At-most-one icon per entity

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::classify::{IconAssignment, IconVariant};
use crate::config::IconSize;
use crate::entity::{Entity, EntityId};
use crate::host::IconHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    AlreadyAttached,
    ProceedToClassify,
}

/// Marker that an entity already carries an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRecord {
    pub variant: IconVariant,
    pub size: Option<IconSize>,
    /// Drain that attached it
    pub drain_seq: u64,
}

/// Records are only created by [`attach`](Self::attach) and only removed by the
/// host-driven release hooks.
///
/// `world` counts [`release_all`](Self::release_all) calls. Host ids are
/// addresses that get reused after an area change, so an attach carrying the
/// world it was read in is refused once that world is gone.
#[derive(Debug, Default)]
pub struct AttachmentGuard {
    records: HashMap<EntityId, AttachmentRecord>,
    world: u64,
}

impl AttachmentGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_attach(&self, id: EntityId) -> GuardDecision {
        if self.records.contains_key(&id) {
            GuardDecision::AlreadyAttached
        } else {
            GuardDecision::ProceedToClassify
        }
    }

    /// Current world epoch
    #[inline]
    pub fn world(&self) -> u64 {
        self.world
    }

    /// Create the record and hand the assignment to the host.
    ///
    /// Returns false without calling the host when a record already exists,
    /// the assignment carries no icon, or `world` has since been released.
    pub fn attach<H: IconHost>(
        &mut self,
        host: &H,
        entity: &H::Entity,
        assignment: IconAssignment,
        drain_seq: u64,
        world: u64,
    ) -> bool {
        if assignment.variant.is_none() || world != self.world {
            return false;
        }

        match self.records.entry(entity.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(AttachmentRecord {
                    variant: assignment.variant,
                    size: assignment.size,
                    drain_seq,
                });
                host.attach_icon(entity, &assignment);
                true
            }
        }
    }

    pub fn record(&self, id: EntityId) -> Option<&AttachmentRecord> {
        self.records.get(&id)
    }

    /// Host removed the entity
    pub fn release(&mut self, id: EntityId) -> Option<AttachmentRecord> {
        self.records.remove(&id)
    }

    /// Host discarded the whole world. Returns how many records were dropped.
    pub fn release_all(&mut self) -> usize {
        let released = self.records.len();
        self.records.clear();
        self.world += 1;
        released
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &AttachmentRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }
}
