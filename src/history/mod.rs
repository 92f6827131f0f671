// In-memory sliding window of grouped samples, newest first.
// Single writer (the sampler), many readers (HTTP handlers). Each push builds a new
// window and publishes it with one atomic pointer swap, so readers never block the
// writer and never see a half-applied push.

mod backfill;

pub use backfill::BackfillMode;

use crate::models::GroupedSample;
use arc_swap::ArcSwap;
use chrono::Duration;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::instrument;

pub struct HistoryBuffer {
    window: ArcSwap<Vec<GroupedSample>>,
    capacity: NonZeroUsize,
}

impl HistoryBuffer {
    /// Fill the window with `capacity` copies of `initial`, entry i backdated by
    /// `i * interval`. Only entry 0 is real data.
    #[instrument(skip(initial), fields(repo = "history", operation = "backfill"))]
    pub fn backfill(
        initial: &GroupedSample,
        capacity: NonZeroUsize,
        interval: Duration,
        mode: BackfillMode,
    ) -> Self {
        let window = backfill::synthesize(initial, capacity.get(), interval, mode);
        tracing::debug!(entries = window.len(), "history backfilled");
        Self {
            window: ArcSwap::from_pointee(window),
            capacity,
        }
    }

    /// Make `sample` the newest entry and drop the oldest.
    pub fn push(&self, sample: GroupedSample) {
        let capacity = self.capacity.get();
        self.window.rcu(|current| {
            let mut next = Vec::with_capacity(capacity);
            next.push(sample.clone());
            next.extend(current.iter().take(capacity - 1).cloned());
            next
        });
    }

    /// Immutable point-in-time window; always exactly `capacity` entries.
    pub fn snapshot(&self) -> Arc<Vec<GroupedSample>> {
        self.window.load_full()
    }

    pub fn newest(&self) -> GroupedSample {
        // Window is never empty: capacity is non-zero and push preserves length.
        self.window.load()[0].clone()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}
