//! Entity classification
//!
//! Maps entity attributes to an [`IconVariant`]. Classification is a pure
//! function of the entity and the local player; alert sizing is looked up
//! afterwards from the rule table.

mod filter;
mod rules;


use crate::config::IconSize;

pub use filter::{SKIPPED_ENTITY_TYPES, SkipReason, should_skip, skip_reason};
pub use rules::{classify, resolve_icon};

/// Kind of overlay marker to attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    Monster,
    LegionMonster,
    DeliriumMonster,
    Npc,
    Player,
    Chest,
    AreaTransition,
    Shrine,
    MissionMarker,
    Misc,
    Portal,
    /// No icon attaches
    None,
}

impl IconVariant {
    /// Variants whose size can be overridden by the alert-rule table
    pub fn uses_alert_size(&self) -> bool {
        matches!(
            self,
            Self::Monster | Self::LegionMonster | Self::DeliriumMonster | Self::Player
        )
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// What gets handed to the host's attach-icon call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconAssignment {
    pub variant: IconVariant,
    /// Size override from the alert-rule table
    pub size: Option<IconSize>,
}

impl IconAssignment {
    pub fn new(variant: IconVariant, size: Option<IconSize>) -> Self {
        Self { variant, size }
    }
}
