//! Error types for entity inspection

use thiserror::Error;

use super::EntityId;

/// Failures while reading a single entity out of the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("entity {id}: {capability} lookup failed: {reason}")]
    CapabilityLookup {
        id: EntityId,
        capability: String,
        reason: String,
    },
}

impl EntityError {
    /// Entity the failure belongs to
    pub fn entity_id(&self) -> EntityId {
        match self {
            Self::CapabilityLookup { id, .. } => *id,
        }
    }
}
