use crate::config::IgnoreList;
use crate::entity::{Entity, EntityType};

/// Entity types that never get an icon
pub const SKIPPED_ENTITY_TYPES: &[EntityType] = &[
    EntityType::WorldItem,
    EntityType::HideoutDecoration,
    EntityType::Effect,
    EntityType::Light,
    EntityType::ServerObject,
    EntityType::Daemon,
    EntityType::Error,
];

/// Why an entity was dropped before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Absent,
    Invalid,
    SkippedType(EntityType),
    /// Index into the ignore list of the first matching pattern
    Ignored(usize),
}

pub fn skip_reason<E: Entity + ?Sized>(
    entity: Option<&E>,
    ignore_list: &IgnoreList,
) -> Option<SkipReason> {
    let Some(entity) = entity else {
        return Some(SkipReason::Absent);
    };
    if !entity.is_valid() {
        return Some(SkipReason::Invalid);
    }

    let entity_type = entity.entity_type();
    if SKIPPED_ENTITY_TYPES.contains(&entity_type) {
        return Some(SkipReason::SkippedType(entity_type));
    }

    let path = entity.path();
    ignore_list
        .patterns()
        .iter()
        .position(|pattern| path.contains(pattern.as_str()))
        .map(SkipReason::Ignored)
}

/// Runs before the attachment check and before classification
#[inline]
pub fn should_skip<E: Entity + ?Sized>(entity: Option<&E>, ignore_list: &IgnoreList) -> bool {
    skip_reason(entity, ignore_list).is_some()
}
