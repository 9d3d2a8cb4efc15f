//! Host-facing facade
//!
//! [`IconsPlugin`] wires the config store, intake queue, attachment guard and
//! scheduler together and exposes one method per host callback.

use std::path::Path;
use std::sync::Arc;

use waymark_types::IconsSettings;

use crate::attach::AttachmentRecord;
use crate::config::{ConfigPaths, ConfigSnapshot, ConfigStore, ReloadReport};
use crate::entity::EntityId;
use crate::host::IconHost;
use crate::scheduler::{
    BackgroundWorker, DrainContext, DrainTotals, RayonWorker, SchedulerState, TickOutcome,
    TickScheduler,
};

/// Point-in-time counters for the whole pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginStats {
    pub state: SchedulerState,
    pub pending: usize,
    pub queue_high_water: usize,
    /// Records currently held by the attachment guard
    pub attached_now: usize,
    pub config_generation: u64,
    pub run_counter: u64,
    pub totals: DrainTotals,
}

pub struct IconsPlugin<H: IconHost, W: BackgroundWorker = RayonWorker> {
    settings: IconsSettings,
    context: Arc<DrainContext<H>>,
    scheduler: TickScheduler<H, W>,
}

impl<H: IconHost> IconsPlugin<H, RayonWorker> {
    /// Plugin that offloads large drains to the global rayon pool
    pub fn new(host: Arc<H>, settings: IconsSettings, config_dir: &Path) -> Self {
        Self::with_worker(host, settings, config_dir, RayonWorker::global())
    }
}

impl<H: IconHost, W: BackgroundWorker> IconsPlugin<H, W> {
    pub fn with_worker(host: Arc<H>, settings: IconsSettings, config_dir: &Path, worker: W) -> Self {
        let settings = settings.sanitized();
        let store = Arc::new(ConfigStore::new(ConfigPaths::in_dir(config_dir, &settings)));
        let context = Arc::new(DrainContext::new(host, store, settings.queue_warn_threshold));
        let scheduler = TickScheduler::new(Arc::clone(&context), worker);
        Self {
            settings,
            context,
            scheduler,
        }
    }

    /// Load both config files
    pub fn initialise(&self) -> ReloadReport {
        self.context.config().reload()
    }

    /// The host discarded the old world: drop its queued entities and
    /// attachments, then re-read config
    pub fn on_area_change(&self, area: &str) -> ReloadReport {
        let reset = self.context.reset_world();
        tracing::info!(
            area,
            discarded = reset.discarded,
            released = reset.released,
            "Area changed"
        );
        self.context.config().reload()
    }

    /// Queue a newly discovered entity. Returns false when the plugin is disabled.
    pub fn on_entity_added(&self, entity: Arc<H::Entity>) -> bool {
        if !self.settings.enable {
            return false;
        }
        self.context.queue().push(entity);
        true
    }

    /// Returns true when the entity carried an icon
    pub fn on_entity_removed(&self, id: EntityId) -> bool {
        self.context.release(id).is_some()
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.scheduler.tick(&self.settings)
    }

    /// Apply new options. Config file locations stay as they were at construction.
    pub fn update_settings(&mut self, settings: IconsSettings) {
        let settings = settings.sanitized();
        if settings.alert_file != self.settings.alert_file
            || settings.ignore_file != self.settings.ignore_file
        {
            tracing::warn!("Config file names changed; restart to pick them up");
        }
        self.context
            .queue()
            .set_warn_threshold(settings.queue_warn_threshold);
        tracing::debug!(?settings, "Icon settings updated");
        self.settings = settings;
    }

    pub fn settings(&self) -> &IconsSettings {
        &self.settings
    }

    pub fn host(&self) -> &Arc<H> {
        self.context.host()
    }

    pub fn config(&self) -> Arc<ConfigSnapshot> {
        self.context.config().snapshot()
    }

    pub fn config_paths(&self) -> &ConfigPaths {
        self.context.config().paths()
    }

    pub fn attachment(&self, id: EntityId) -> Option<AttachmentRecord> {
        self.context.attachment(id)
    }

    /// All current attachments ordered by entity id
    pub fn attachments(&self) -> Vec<(EntityId, AttachmentRecord)> {
        self.context.attachments()
    }

    pub fn stats(&self) -> PluginStats {
        let queue = self.context.queue();
        PluginStats {
            state: self.scheduler.state(),
            pending: queue.len(),
            queue_high_water: queue.high_water_mark(),
            attached_now: self.context.attached_count(),
            config_generation: self.context.config().snapshot().generation,
            run_counter: self.scheduler.run_counter(),
            totals: self.context.totals(),
        }
    }
}
