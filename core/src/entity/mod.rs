//! Entity model
//!
//! The host owns every entity; the pipeline only sees it through the
//! [`Entity`] trait. Components are looked up by capability name instead
//! of through a type hierarchy, so a host can expose whatever it has.

mod capability;
mod error;
mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use capability::{Capability, CapabilityView};
pub use error::EntityError;
pub use snapshot::EntitySnapshot;

/// Host identity of an entity (its address in the host's world)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Entity kind as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityType {
    Monster,
    Npc,
    Player,
    Chest,
    SmallChest,
    AreaTransition,
    WorldItem,
    HideoutDecoration,
    Effect,
    Light,
    ServerObject,
    Daemon,
    Error,
    LegionMonolith,
    /// Anything the pipeline has no rule for
    #[default]
    #[serde(other)]
    Other,
}

impl EntityType {
    /// Chests of either size
    #[inline]
    pub fn is_chest(&self) -> bool {
        matches!(self, EntityType::Chest | EntityType::SmallChest)
    }
}

/// League mechanic an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeagueType {
    #[default]
    None,
    Legion,
    Delirium,
    #[serde(other)]
    Other,
}

/// Read access to a host entity.
///
/// Attribute accessors are infallible; component lookups go through the
/// host's component system and may fail on a half-initialized entity.
pub trait Entity {
    fn id(&self) -> EntityId;
    fn entity_type(&self) -> EntityType;
    fn league(&self) -> LeagueType;
    /// Hierarchical metadata path, e.g. `Metadata/Monsters/Goatman/GoatmanShaman`
    fn path(&self) -> &str;
    fn render_name(&self) -> &str;
    fn is_valid(&self) -> bool;
    fn is_alive(&self) -> bool;
    fn is_opened(&self) -> bool;

    /// Look up an attached component by capability.
    fn capability(&self, capability: &Capability) -> Result<Option<CapabilityView>, EntityError>;

    /// Whether the entity carries a component with this capability
    fn has_capability(&self, capability: &Capability) -> Result<bool, EntityError> {
        Ok(self.capability(capability)?.is_some())
    }
}

/// Identity of the player the overlay belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalPlayer {
    pub id: EntityId,
    pub render_name: String,
}

impl LocalPlayer {
    pub fn new(id: EntityId, render_name: impl Into<String>) -> Self {
        Self {
            id,
            render_name: render_name.into(),
        }
    }

    /// True for the local player itself or a copy carrying its render name
    pub fn is_same_as<E: Entity + ?Sized>(&self, entity: &E) -> bool {
        self.id == entity.id() || self.render_name == entity.render_name()
    }
}
