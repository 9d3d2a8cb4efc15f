//! Tick throttling and drain dispatch
//!
//! Every `run_every_x_ticks` host frames the scheduler drains the intake queue.
//! Small batches drain on the calling thread; when multithreading is enabled and
//! the backlog is over the threshold, the whole drain is handed to a
//! [`BackgroundWorker`] as one job. At most one drain runs at a time.

mod drain;
mod worker;

#[cfg(test)]
mod scheduler_tests;

use std::sync::Arc;

use waymark_types::IconsSettings;

use crate::host::IconHost;

pub use drain::{DrainClaim, DrainContext, DrainReport, DrainTotals, WorldReset};
pub use worker::{BackgroundWorker, Job, RayonWorker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Draining,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// `enable` is off; the run counter does not advance
    Disabled,
    /// Not this tick's turn
    Waiting,
    /// A background drain is still running
    Busy,
    Inline(DrainReport),
    Offloaded { queued: usize },
}

pub struct TickScheduler<H: IconHost, W: BackgroundWorker> {
    context: Arc<DrainContext<H>>,
    worker: W,
    run_counter: u64,
}

impl<H: IconHost, W: BackgroundWorker> TickScheduler<H, W> {
    pub fn new(context: Arc<DrainContext<H>>, worker: W) -> Self {
        Self {
            context,
            worker,
            run_counter: 0,
        }
    }

    pub fn context(&self) -> &Arc<DrainContext<H>> {
        &self.context
    }

    pub fn run_counter(&self) -> u64 {
        self.run_counter
    }

    pub fn state(&self) -> SchedulerState {
        if self.context.is_draining() {
            SchedulerState::Draining
        } else {
            SchedulerState::Idle
        }
    }

    pub fn tick(&mut self, settings: &IconsSettings) -> TickOutcome {
        if !settings.enable {
            return TickOutcome::Disabled;
        }

        self.run_counter += 1;
        if self.run_counter % u64::from(settings.tick_divisor()) != 0 {
            return TickOutcome::Waiting;
        }

        let Some(claim) = self.context.try_claim() else {
            tracing::trace!(run = self.run_counter, "Drain still in flight");
            return TickOutcome::Busy;
        };

        let queued = self.context.queue().len();
        if settings.should_offload(queued) {
            self.context.note_offloaded();
            tracing::debug!(queued, "Offloading drain to background worker");
            self.worker.submit(Box::new(move || {
                claim.run();
            }));
            TickOutcome::Offloaded { queued }
        } else {
            self.context.note_inline();
            TickOutcome::Inline(claim.run())
        }
    }
}
