//! Scheduler throttling and drain exclusivity
//!
//! Background drains go through a worker that only runs jobs when the test
//! says so, which makes "drain in flight" observable without timing.

use std::sync::Arc;

use parking_lot::Mutex;
use waymark_types::IconsSettings;

use crate::config::{AlertRules, ConfigPaths, ConfigStore, IconSize, IgnoreList};
use crate::entity::{Capability, EntityId, EntitySnapshot, EntityType};
use crate::test_support::{RecordingHost, ScriptedEntity};

use super::{BackgroundWorker, DrainContext, Job, SchedulerState, TickOutcome, TickScheduler};

#[derive(Clone, Default)]
struct ManualWorker {
    jobs: Arc<Mutex<Vec<Job>>>,
}

impl ManualWorker {
    fn pending(&self) -> usize {
        self.jobs.lock().len()
    }

    fn run_all(&self) {
        let jobs = std::mem::take(&mut *self.jobs.lock());
        for job in jobs {
            job();
        }
    }
}

impl BackgroundWorker for ManualWorker {
    fn submit(&self, job: Job) {
        self.jobs.lock().push(job);
    }
}

fn store() -> Arc<ConfigStore> {
    let store = ConfigStore::new(ConfigPaths {
        alert_file: "missing/mod_alerts.txt".into(),
        ignore_file: "missing/ignored_entities.txt".into(),
    });
    let rules: AlertRules = [("Metadata/Monsters/Goatman".to_string(), IconSize::new(32, 32))]
        .into_iter()
        .collect();
    let ignore: IgnoreList = ["Metadata/Monsters/Ignored"].into_iter().collect();
    store.replace(rules, ignore);
    Arc::new(store)
}

fn setup() -> (Arc<RecordingHost>, TickScheduler<RecordingHost, ManualWorker>, ManualWorker) {
    let host = Arc::new(RecordingHost::new());
    let context = Arc::new(DrainContext::new(Arc::clone(&host), store(), 10_000));
    let worker = ManualWorker::default();
    let scheduler = TickScheduler::new(context, worker.clone());
    (host, scheduler, worker)
}

fn push_monsters(scheduler: &TickScheduler<RecordingHost, ManualWorker>, ids: impl IntoIterator<Item = u64>) {
    for id in ids {
        let entity = EntitySnapshot::new(id, EntityType::Monster).with_path("Metadata/Monsters/Goatman/Goatman");
        scheduler.context().queue().push(Arc::new(entity));
    }
}

fn threaded(threshold: usize) -> IconsSettings {
    IconsSettings {
        multithreading: true,
        multithreading_entity_threshold: threshold,
        ..IconsSettings::default()
    }
}

#[test]
fn disabled_does_nothing() {
    let (host, mut scheduler, _) = setup();
    push_monsters(&scheduler, [1]);

    let settings = IconsSettings {
        enable: false,
        ..IconsSettings::default()
    };
    assert_eq!(scheduler.tick(&settings), TickOutcome::Disabled);
    assert_eq!(scheduler.run_counter(), 0);
    assert_eq!(scheduler.context().queue().len(), 1);
    assert!(host.attached().is_empty());
}

#[test]
fn runs_every_nth_tick() {
    let (_, mut scheduler, _) = setup();
    let settings = IconsSettings {
        run_every_x_ticks: 3,
        ..IconsSettings::default()
    };

    let outcomes: Vec<bool> = (0..6)
        .map(|_| matches!(scheduler.tick(&settings), TickOutcome::Inline(_)))
        .collect();
    assert_eq!(outcomes, vec![false, false, true, false, false, true]);
}

#[test]
fn inline_drain_attaches_with_size() {
    let (host, mut scheduler, _) = setup();
    push_monsters(&scheduler, [1, 2]);

    let TickOutcome::Inline(report) = scheduler.tick(&IconsSettings::default()) else {
        panic!("expected an inline drain");
    };
    assert_eq!(report.taken, 2);
    assert_eq!(report.attached, 2);

    let attached = host.attached();
    assert_eq!(attached.len(), 2);
    assert!(attached.iter().all(|(_, a)| a.size == Some(IconSize::new(32, 32))));
}

#[test]
fn reoffered_entity_gets_one_icon() {
    let (host, mut scheduler, _) = setup();
    push_monsters(&scheduler, [1, 1]);
    scheduler.tick(&IconsSettings::default());
    push_monsters(&scheduler, [1]);

    let TickOutcome::Inline(report) = scheduler.tick(&IconsSettings::default()) else {
        panic!("expected an inline drain");
    };
    assert_eq!(report.already_attached, 1);
    assert_eq!(host.attached().len(), 1);
}

#[test]
fn skip_and_unclassified_are_counted() {
    let (host, mut scheduler, _) = setup();
    let queue = scheduler.context().queue();
    queue.push(Arc::new(
        EntitySnapshot::new(1, EntityType::Monster).with_path("Metadata/Monsters/Ignored/Thing"),
    ));
    queue.push(Arc::new(EntitySnapshot::new(2, EntityType::Effect)));
    queue.push(Arc::new(EntitySnapshot::new(3, EntityType::Chest).opened()));

    let TickOutcome::Inline(report) = scheduler.tick(&IconsSettings::default()) else {
        panic!("expected an inline drain");
    };
    assert_eq!(report.skipped, 2);
    assert_eq!(report.unclassified, 1);
    assert!(host.attached().is_empty());
    assert!(scheduler.context().attachment(EntityId(3)).is_none());
}

#[test]
fn small_backlog_stays_inline_when_threaded() {
    let (_, mut scheduler, worker) = setup();
    push_monsters(&scheduler, 0..5);

    assert!(matches!(scheduler.tick(&threaded(5)), TickOutcome::Inline(_)));
    assert_eq!(worker.pending(), 0);
}

#[test]
fn only_one_drain_in_flight() {
    let (host, mut scheduler, worker) = setup();
    push_monsters(&scheduler, 0..10);
    let settings = threaded(5);

    assert_eq!(scheduler.tick(&settings), TickOutcome::Offloaded { queued: 10 });
    assert_eq!(scheduler.state(), SchedulerState::Draining);

    push_monsters(&scheduler, 10..20);
    assert_eq!(scheduler.tick(&settings), TickOutcome::Busy);
    assert_eq!(scheduler.tick(&IconsSettings::default()), TickOutcome::Busy);
    assert_eq!(worker.pending(), 1);

    worker.run_all();
    assert_eq!(scheduler.state(), SchedulerState::Idle);
    // Job took everything queued by the time it ran
    assert_eq!(host.attached().len(), 20);

    let totals = scheduler.context().totals();
    assert_eq!(totals.drains_offloaded, 1);
    assert_eq!(totals.drains_inline, 0);
    assert_eq!(totals.attached, 20);
}

#[test]
fn pushes_after_drain_wait_for_next_tick() {
    let (host, mut scheduler, worker) = setup();
    push_monsters(&scheduler, 0..10);
    scheduler.tick(&threaded(5));
    worker.run_all();

    push_monsters(&scheduler, [100]);
    assert_eq!(scheduler.context().queue().len(), 1);
    assert!(matches!(scheduler.tick(&threaded(5)), TickOutcome::Inline(_)));
    assert_eq!(host.attached().len(), 11);
}

#[test]
fn offloaded_drain_after_world_reset_only_sees_new_area() {
    let (host, mut scheduler, worker) = setup();
    push_monsters(&scheduler, 0..10);
    assert_eq!(scheduler.tick(&threaded(5)), TickOutcome::Offloaded { queued: 10 });

    let reset = scheduler.context().reset_world();
    assert_eq!(reset.discarded, 10);
    push_monsters(&scheduler, [3]);
    worker.run_all();

    assert_eq!(host.attached().len(), 1);
    assert!(scheduler.context().attachment(EntityId(3)).is_some());
}

// ─── Entities with scripted capability lookups ──────────────────────────────

type ScriptedContext = DrainContext<RecordingHost<ScriptedEntity>>;

fn scripted_context() -> (Arc<RecordingHost<ScriptedEntity>>, Arc<ScriptedContext>) {
    let host = Arc::new(RecordingHost::<ScriptedEntity>::default());
    let context = Arc::new(DrainContext::new(Arc::clone(&host), store(), 10_000));
    (host, context)
}

fn shrine(id: u64) -> EntitySnapshot {
    EntitySnapshot::new(id, EntityType::Other).with_capability(Capability::Shrine)
}

#[test]
fn failing_entity_does_not_stop_the_batch() {
    let (host, context) = scripted_context();
    let mut scheduler = TickScheduler::new(Arc::clone(&context), ManualWorker::default());
    context.queue().push(Arc::new(ScriptedEntity::new(shrine(1))));
    context.queue().push(Arc::new(ScriptedEntity::failing(shrine(2))));
    context.queue().push(Arc::new(ScriptedEntity::new(shrine(3))));

    let TickOutcome::Inline(report) = scheduler.tick(&IconsSettings::default()) else {
        panic!("expected an inline drain");
    };
    assert_eq!(report.taken, 3);
    assert_eq!(report.attached, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entity_id(), EntityId(2));

    assert_eq!(context.totals().failed, 1);
    assert!(context.attachment(EntityId(1)).is_some());
    assert!(context.attachment(EntityId(2)).is_none());
    assert!(context.attachment(EntityId(3)).is_some());
    assert_eq!(host.attached().len(), 2);
}

#[test]
fn world_reset_mid_drain_stops_attaching() {
    let (host, context) = scripted_context();
    let mut scheduler = TickScheduler::new(Arc::clone(&context), ManualWorker::default());
    let weak = Arc::downgrade(&context);

    context.queue().push(Arc::new(ScriptedEntity::new(shrine(1))));
    context.queue().push(Arc::new(ScriptedEntity::on_lookup(shrine(2), move || {
        if let Some(context) = weak.upgrade() {
            context.reset_world();
        }
    })));
    context.queue().push(Arc::new(ScriptedEntity::new(shrine(3))));

    let TickOutcome::Inline(report) = scheduler.tick(&IconsSettings::default()) else {
        panic!("expected an inline drain");
    };
    assert_eq!(report.attached, 1);
    assert_eq!(report.discarded, 2);
    // Entity 1 was drawn before the reset; the host drops it with the old world
    assert_eq!(host.attached().len(), 1);
    assert_eq!(context.attached_count(), 0);
    assert!(context.attachment(EntityId(3)).is_none());
}
