//! Owned entity snapshot
//!
//! A plain-data [`Entity`] used by scenario files and tests. Hosts with a
//! live component system implement [`Entity`] on their own handle instead.

use serde::{Deserialize, Serialize};

use super::{Capability, CapabilityView, Entity, EntityError, EntityId, EntityType, LeagueType};

/// Frozen copy of an entity's attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySnapshot {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub league: LeagueType,
    pub path: String,
    pub render_name: String,
    pub alive: bool,
    pub valid: bool,
    pub opened: bool,
    pub capabilities: Vec<Capability>,
    /// Display name of the `MinimapIcon` component, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimap_icon_name: Option<String>,
}

impl Default for EntitySnapshot {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            entity_type: EntityType::Other,
            league: LeagueType::None,
            path: String::new(),
            render_name: String::new(),
            alive: true,
            valid: true,
            opened: false,
            capabilities: Vec::new(),
            minimap_icon_name: None,
        }
    }
}

impl EntitySnapshot {
    pub fn new(id: u64, entity_type: EntityType) -> Self {
        Self {
            id: EntityId(id),
            entity_type,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_render_name(mut self, name: impl Into<String>) -> Self {
        self.render_name = name.into();
        self
    }

    pub fn with_league(mut self, league: LeagueType) -> Self {
        self.league = league;
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Attach a `MinimapIcon` component with the given display name
    pub fn with_minimap_icon(mut self, name: impl Into<String>) -> Self {
        self.minimap_icon_name = Some(name.into());
        self.with_capability(Capability::MinimapIcon)
    }

    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn opened(mut self) -> Self {
        self.opened = true;
        self
    }
}

impl Entity for EntitySnapshot {
    fn id(&self) -> EntityId {
        self.id
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn league(&self) -> LeagueType {
        self.league
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn render_name(&self) -> &str {
        &self.render_name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_opened(&self) -> bool {
        self.opened
    }

    fn capability(&self, capability: &Capability) -> Result<Option<CapabilityView>, EntityError> {
        if !self.capabilities.contains(capability) {
            return Ok(None);
        }
        let view = match capability {
            Capability::MinimapIcon => CapabilityView {
                display_name: self.minimap_icon_name.clone(),
            },
            _ => CapabilityView::default(),
        };
        Ok(Some(view))
    }
}
