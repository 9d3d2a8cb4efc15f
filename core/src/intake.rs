//! Buffer between entity discovery and the tick

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

/// FIFO of newly discovered entities. No dedup and no cap; growth is
/// tracked and reported instead.
#[derive(Debug)]
pub struct IntakeQueue<E> {
    pending: Mutex<Vec<Arc<E>>>,
    high_water: AtomicUsize,
    warn_threshold: AtomicUsize,
    warned: AtomicBool,
}

impl<E> IntakeQueue<E> {
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            high_water: AtomicUsize::new(0),
            warn_threshold: AtomicUsize::new(warn_threshold),
            warned: AtomicBool::new(false),
        }
    }

    /// Append and return the new length
    pub fn push(&self, entity: Arc<E>) -> usize {
        let len = {
            let mut pending = self.pending.lock();
            pending.push(entity);
            pending.len()
        };

        self.high_water.fetch_max(len, Ordering::Relaxed);

        let threshold = self.warn_threshold.load(Ordering::Relaxed);
        if len > threshold && !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                pending = len,
                threshold,
                "Intake queue is growing faster than it drains"
            );
        }
        len
    }

    /// Take everything queued so far, in push order. Pushes racing with
    /// this call land in the next drain.
    pub fn drain_all(&self) -> Vec<Arc<E>> {
        let drained = mem::take(&mut *self.pending.lock());
        self.warned.store(false, Ordering::Relaxed);
        drained
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::Relaxed)
    }

    pub fn set_warn_threshold(&self, threshold: usize) {
        self.warn_threshold.store(threshold, Ordering::Relaxed);
    }

    /// Whether the growth warning fired since the last drain
    pub fn growth_warned(&self) -> bool {
        self.warned.load(Ordering::Relaxed)
    }
}
