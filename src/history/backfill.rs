// Startup pre-history: backdated placeholders until real samples fill the window.

use crate::models::GroupedSample;
use chrono::Duration;

/// What the synthetic (pre-startup) entries carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackfillMode {
    /// Repeat the initial sample's usage values.
    #[default]
    Repeat,
    /// Zero usage values; only the newest entry holds real numbers.
    Zero,
}

impl BackfillMode {
    pub fn from_zero_flag(zero: bool) -> Self {
        if zero {
            BackfillMode::Zero
        } else {
            BackfillMode::Repeat
        }
    }
}

pub(super) fn synthesize(
    initial: &GroupedSample,
    capacity: usize,
    interval: Duration,
    mode: BackfillMode,
) -> Vec<GroupedSample> {
    (0..capacity)
        .map(|i| {
            if i == 0 {
                return initial.clone();
            }
            let offset = interval * i as i32;
            initial.backdated(initial.timestamp - offset, mode == BackfillMode::Zero)
        })
        .collect()
}
