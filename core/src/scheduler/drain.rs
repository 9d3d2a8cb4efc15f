use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::attach::{AttachmentGuard, AttachmentRecord, GuardDecision};
use crate::classify::{resolve_icon, skip_reason};
use crate::config::ConfigStore;
use crate::entity::{Entity, EntityError, EntityId};
use crate::host::IconHost;
use crate::intake::IntakeQueue;

/// Outcome of one drain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub seq: u64,
    pub taken: usize,
    pub skipped: usize,
    pub already_attached: usize,
    /// Classified to no icon; may be offered again later
    pub unclassified: usize,
    pub attached: usize,
    /// Left unprocessed because the host changed area mid-drain
    pub discarded: usize,
    pub failures: Vec<EntityError>,
}

impl DrainReport {
    #[inline]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Running totals across all drains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainTotals {
    pub drains_inline: u64,
    pub drains_offloaded: u64,
    pub skipped: u64,
    pub unclassified: u64,
    pub attached: u64,
    pub failed: u64,
}

/// What an area change threw away
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldReset {
    /// Entities still queued from the old area
    pub discarded: usize,
    /// Attachment records dropped
    pub released: usize,
}

#[derive(Debug, Default)]
struct DrainCounters {
    drains_inline: AtomicU64,
    drains_offloaded: AtomicU64,
    skipped: AtomicU64,
    unclassified: AtomicU64,
    attached: AtomicU64,
    failed: AtomicU64,
}

impl DrainCounters {
    fn record(&self, report: &DrainReport) {
        self.skipped.fetch_add(report.skipped as u64, Ordering::Relaxed);
        self.unclassified
            .fetch_add(report.unclassified as u64, Ordering::Relaxed);
        self.attached
            .fetch_add(report.attached as u64, Ordering::Relaxed);
        self.failed
            .fetch_add(report.failures.len() as u64, Ordering::Relaxed);
    }

    fn totals(&self) -> DrainTotals {
        DrainTotals {
            drains_inline: self.drains_inline.load(Ordering::Relaxed),
            drains_offloaded: self.drains_offloaded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            unclassified: self.unclassified.load(Ordering::Relaxed),
            attached: self.attached.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Everything a drain touches, shared between the host thread and the worker
pub struct DrainContext<H: IconHost> {
    host: Arc<H>,
    config: Arc<ConfigStore>,
    queue: IntakeQueue<H::Entity>,
    guard: Mutex<AttachmentGuard>,
    draining: AtomicBool,
    drain_seq: AtomicU64,
    counters: DrainCounters,
}

impl<H: IconHost> DrainContext<H> {
    pub fn new(host: Arc<H>, config: Arc<ConfigStore>, queue_warn_threshold: usize) -> Self {
        Self {
            host,
            config,
            queue: IntakeQueue::new(queue_warn_threshold),
            guard: Mutex::new(AttachmentGuard::new()),
            draining: AtomicBool::new(false),
            drain_seq: AtomicU64::new(0),
            counters: DrainCounters::default(),
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn queue(&self) -> &IntakeQueue<H::Entity> {
        &self.queue
    }

    #[inline]
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Acquire)
    }

    /// Claim the single drain slot. `None` while another drain holds it.
    pub fn try_claim(self: &Arc<Self>) -> Option<DrainClaim<H>> {
        self.draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DrainClaim {
                context: Arc::clone(self),
            })
    }

    pub fn attachment(&self, id: EntityId) -> Option<AttachmentRecord> {
        self.guard.lock().record(id).copied()
    }

    pub fn attachments(&self) -> Vec<(EntityId, AttachmentRecord)> {
        let guard = self.guard.lock();
        let mut records: Vec<_> = guard.iter().map(|(id, record)| (id, *record)).collect();
        records.sort_by_key(|(id, _)| *id);
        records
    }

    pub fn attached_count(&self) -> usize {
        self.guard.lock().len()
    }

    pub fn release(&self, id: EntityId) -> Option<AttachmentRecord> {
        self.guard.lock().release(id)
    }

    /// Forget the old world: drop everything still queued and every record.
    ///
    /// Runs under the guard lock, the same lock a drain holds while taking its
    /// batch and while attaching, so a drain in flight attaches nothing more
    /// from the old world.
    pub fn reset_world(&self) -> WorldReset {
        let mut guard = self.guard.lock();
        let discarded = self.queue.drain_all().len();
        let released = guard.release_all();
        WorldReset {
            discarded,
            released,
        }
    }

    pub fn totals(&self) -> DrainTotals {
        self.counters.totals()
    }

    pub(super) fn note_inline(&self) {
        self.counters.drains_inline.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn note_offloaded(&self) {
        self.counters.drains_offloaded.fetch_add(1, Ordering::Relaxed);
    }

    fn drain(&self) -> DrainReport {
        let seq = self.drain_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let (world, batch) = {
            let guard = self.guard.lock();
            (guard.world(), self.queue.drain_all())
        };
        let config = self.config.snapshot();
        let local_player = self.host.local_player();

        let mut report = DrainReport {
            seq,
            taken: batch.len(),
            ..DrainReport::default()
        };

        for (index, entity) in batch.iter().enumerate() {
            let entity = entity.as_ref();

            if let Some(reason) = skip_reason(Some(entity), &config.ignore_list) {
                tracing::trace!(entity = %entity.id(), ?reason, "Skipped entity");
                report.skipped += 1;
                continue;
            }

            if self.guard.lock().try_attach(entity.id()) == GuardDecision::AlreadyAttached {
                report.already_attached += 1;
                continue;
            }

            match resolve_icon(entity, &config.alert_rules, local_player.as_ref()) {
                Ok(Some(assignment)) => {
                    let mut guard = self.guard.lock();
                    if guard.world() != world {
                        report.discarded = batch.len() - index;
                        tracing::debug!(seq, discarded = report.discarded, "World reset mid-drain");
                        break;
                    }
                    if guard.attach(self.host.as_ref(), entity, assignment, seq, world) {
                        report.attached += 1;
                    } else {
                        report.already_attached += 1;
                    }
                }
                Ok(None) => report.unclassified += 1,
                Err(err) => {
                    tracing::warn!(
                        entity = %err.entity_id(),
                        path = entity.path(),
                        error = %err,
                        "Failed to classify entity"
                    );
                    report.failures.push(err);
                }
            }
        }

        self.counters.record(&report);
        if report.taken > 0 {
            tracing::debug!(
                seq,
                taken = report.taken,
                skipped = report.skipped,
                already_attached = report.already_attached,
                unclassified = report.unclassified,
                attached = report.attached,
                discarded = report.discarded,
                failed = report.failed(),
                config_generation = config.generation,
                "Drained intake queue"
            );
        }
        report
    }
}

/// Exclusive right to run one drain. Dropping it frees the slot.
pub struct DrainClaim<H: IconHost> {
    context: Arc<DrainContext<H>>,
}

impl<H: IconHost> DrainClaim<H> {
    pub fn run(self) -> DrainReport {
        self.context.drain()
    }
}

impl<H: IconHost> Drop for DrainClaim<H> {
    fn drop(&mut self) {
        self.context.draining.store(false, Ordering::Release);
    }
}
