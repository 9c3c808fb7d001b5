//! Pending-seek guard.
//!
//! After a seek the scrub bar shows the requested position straight away.
//! Position reports that were already in flight still describe the old
//! position, so they are discarded until one lands near the target. A guard
//! that never sees agreement gives up after a bounded number of stale
//! reports so the scrub bar cannot freeze.

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingSeek {
    target: f64,
    stale_ticks: u32,
}

/// Decides whether a position report may drive the scrub bar.
#[derive(Debug)]
pub(crate) struct SeekGuard {
    pending: Option<PendingSeek>,
    tolerance: f64,
    max_stale_ticks: u32,
}

impl SeekGuard {
    pub(crate) fn new(tolerance: f64, max_stale_ticks: u32) -> Self {
        let tolerance = if tolerance.is_finite() { tolerance.abs() } else { 0.0 };
        Self {
            pending: None,
            tolerance,
            max_stale_ticks,
        }
    }

    /// Records a new seek target, replacing any earlier one.
    pub(crate) fn begin(&mut self, target: f64) {
        self.pending = Some(PendingSeek {
            target,
            stale_ticks: 0,
        });
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true if a report at `position` should be applied.
    pub(crate) fn admit(&mut self, position: f64) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return true;
        };

        if (position - pending.target).abs() <= self.tolerance {
            trace!(position, target = pending.target, "Seek confirmed");
            self.pending = None;
            return true;
        }

        if pending.stale_ticks >= self.max_stale_ticks {
            debug!(
                position,
                target = pending.target,
                stale_ticks = pending.stale_ticks,
                "Abandoning pending seek"
            );
            self.pending = None;
            return true;
        }

        pending.stale_ticks += 1;
        trace!(position, target = pending.target, "Discarding stale position report");
        false
    }
}
