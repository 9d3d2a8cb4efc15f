pub mod attach;
pub mod classify;
pub mod config;
pub mod entity;
pub mod host;
pub mod intake;
pub mod plugin;
pub mod scheduler;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use attach::{AttachmentGuard, AttachmentRecord, GuardDecision};
pub use classify::{IconAssignment, IconVariant, classify, resolve_icon, should_skip};
pub use config::{AlertRules, ConfigError, ConfigStore, IconSize, IgnoreList, ReloadReport};
pub use entity::{
    Capability, CapabilityView, Entity, EntityError, EntityId, EntitySnapshot, EntityType,
    LeagueType, LocalPlayer,
};
pub use host::IconHost;
pub use intake::IntakeQueue;
pub use plugin::{IconsPlugin, PluginStats};
pub use scheduler::{
    BackgroundWorker, DrainReport, DrainTotals, RayonWorker, SchedulerState, TickOutcome,
    TickScheduler, WorldReset,
};
pub use waymark_types::IconsSettings;
