//! Interface the embedding host provides
//!
//! The host owns entity storage and rendering. The pipeline only reads entities
//! through [`Entity`] and hands finished assignments back through
//! [`IconHost::attach_icon`].

use crate::classify::IconAssignment;
use crate::entity::{Entity, LocalPlayer};

pub trait IconHost: Send + Sync + 'static {
    type Entity: Entity + Send + Sync + 'static;

    /// Player the overlay belongs to, once the host knows it
    fn local_player(&self) -> Option<LocalPlayer>;

    /// Attach a marker to the entity. Called at most once per entity lifetime.
    fn attach_icon(&self, entity: &Self::Entity, assignment: &IconAssignment);
}
