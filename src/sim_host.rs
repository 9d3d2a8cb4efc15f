//! In-process stand-in for the game client

use parking_lot::Mutex;
use waymark_core::{EntityId, EntitySnapshot, IconAssignment, IconHost, LocalPlayer};
use waymark_core::{Entity, IconSize, IconVariant};

/// An icon the simulator has "drawn"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedIcon {
    pub id: EntityId,
    pub path: String,
    pub variant: IconVariant,
    pub size: Option<IconSize>,
}

#[derive(Debug, Default)]
pub struct SimHost {
    local_player: Mutex<Option<LocalPlayer>>,
    icons: Mutex<Vec<AttachedIcon>>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_local_player(&self, player: LocalPlayer) {
        *self.local_player.lock() = Some(player);
    }

    pub fn icons(&self) -> Vec<AttachedIcon> {
        self.icons.lock().clone()
    }

    /// Drop every drawn icon, as the client does when it unloads an area
    pub fn clear_icons(&self) -> usize {
        let mut icons = self.icons.lock();
        let cleared = icons.len();
        icons.clear();
        cleared
    }

    pub fn remove_icon(&self, id: EntityId) -> bool {
        let mut icons = self.icons.lock();
        let before = icons.len();
        icons.retain(|icon| icon.id != id);
        icons.len() != before
    }
}

impl IconHost for SimHost {
    type Entity = EntitySnapshot;

    fn local_player(&self) -> Option<LocalPlayer> {
        self.local_player.lock().clone()
    }

    fn attach_icon(&self, entity: &EntitySnapshot, assignment: &IconAssignment) {
        tracing::debug!(
            entity = %entity.id(),
            variant = ?assignment.variant,
            size = ?assignment.size,
            "Icon attached"
        );
        self.icons.lock().push(AttachedIcon {
            id: entity.id(),
            path: entity.path().to_string(),
            variant: assignment.variant,
            size: assignment.size,
        });
    }
}
