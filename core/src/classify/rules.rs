use crate::config::AlertRules;
use crate::entity::{Capability, Entity, EntityError, EntityType, LeagueType, LocalPlayer};

use super::{IconAssignment, IconVariant};

const MISSION_MARKER_PATH: &str = "Metadata/MiscellaneousObjects/MissionMarker";
const MISSION_TARGET_ICON: &str = "MissionTarget";
const AZURITE_ENCOUNTER_CONTROLLER: &str =
    "Metadata/Terrain/Leagues/Delve/Objects/EncounterControlObjects/AzuriteEncounterController";

/// Pick the icon variant for an entity. First matching rule wins.
///
/// Only capability lookups can fail; any such failure aborts classification
/// of this entity without touching anything else.
pub fn classify<E: Entity + ?Sized>(
    entity: &E,
    local_player: Option<&LocalPlayer>,
) -> Result<IconVariant, EntityError> {
    let entity_type = entity.entity_type();

    match entity_type {
        EntityType::Monster => return Ok(monster_variant(entity)),
        EntityType::Npc => return Ok(IconVariant::Npc),
        EntityType::Player => return Ok(player_variant(entity, local_player)),
        _ => {}
    }

    if entity_type.is_chest() && !entity.is_opened() {
        return Ok(IconVariant::Chest);
    }

    if entity_type == EntityType::AreaTransition {
        return Ok(IconVariant::Misc);
    }

    if entity.has_capability(&Capability::Shrine)? {
        return Ok(IconVariant::Shrine);
    }

    if entity.has_capability(&Capability::Transitionable)?
        && let Some(minimap) = entity.capability(&Capability::MinimapIcon)?
    {
        let is_mission = entity.path() == MISSION_MARKER_PATH
            || minimap.display_name() == Some(MISSION_TARGET_ICON);
        return Ok(if is_mission {
            IconVariant::MissionMarker
        } else {
            IconVariant::Misc
        });
    }

    if entity.has_capability(&Capability::MinimapIcon)?
        && entity.has_capability(&Capability::Targetable)?
    {
        return Ok(IconVariant::Misc);
    }

    if entity.path().contains(AZURITE_ENCOUNTER_CONTROLLER) {
        return Ok(IconVariant::Misc);
    }

    if entity_type == EntityType::LegionMonolith {
        return Ok(IconVariant::Misc);
    }

    Ok(IconVariant::None)
}

fn monster_variant<E: Entity + ?Sized>(entity: &E) -> IconVariant {
    if !entity.is_alive() {
        return IconVariant::None;
    }
    match entity.league() {
        LeagueType::Legion => IconVariant::LegionMonster,
        LeagueType::Delirium => IconVariant::DeliriumMonster,
        _ => IconVariant::Monster,
    }
}

fn player_variant<E: Entity + ?Sized>(entity: &E, local_player: Option<&LocalPlayer>) -> IconVariant {
    if local_player.is_some_and(|local| local.is_same_as(entity)) {
        return IconVariant::None;
    }
    if !entity.is_valid() {
        return IconVariant::None;
    }
    IconVariant::Player
}

/// Classify and attach the alert-table size override where the variant takes one.
/// `Ok(None)` means no icon for now.
pub fn resolve_icon<E: Entity + ?Sized>(
    entity: &E,
    alert_rules: &AlertRules,
    local_player: Option<&LocalPlayer>,
) -> Result<Option<IconAssignment>, EntityError> {
    let variant = classify(entity, local_player)?;
    if variant.is_none() {
        return Ok(None);
    }

    let size = if variant.uses_alert_size() {
        alert_rules.size_for(entity.path())
    } else {
        None
    };

    Ok(Some(IconAssignment::new(variant, size)))
}
