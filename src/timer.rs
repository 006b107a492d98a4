//! Single-slot auto-hide timer.

use log::debug;
use std::time::{Duration, Instant};

/// Identifies one arming of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A scheduled auto-hide that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHide {
    /// Which arming this is.
    pub id: TimerId,
    /// When it was armed.
    pub armed_at: Instant,
    /// When it fires.
    pub deadline: Instant,
    /// The policy delay it was armed with.
    pub duration: Duration,
}

/// Owns at most one pending auto-hide.
///
/// Arming always cancels the previous slot first, so two hides can never be
/// pending for one logical settle.
#[derive(Debug, Default)]
pub struct AutoHideTimer {
    slot: Option<PendingHide>,
    next_id: u64,
}

impl AutoHideTimer {
    /// Create an empty timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a hide `duration` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, duration: Duration) -> PendingHide {
        if let Some(previous) = self.cancel() {
            debug!("auto-hide {:?} replaced before firing", previous.id);
        }

        let pending = PendingHide {
            id: TimerId(self.next_id),
            armed_at: now,
            deadline: now + duration,
            duration,
        };
        self.next_id += 1;
        self.slot = Some(pending);
        debug!("auto-hide {:?} armed for {:?}", pending.id, duration);
        pending
    }

    /// Drop the pending hide, if any, and return it.
    pub fn cancel(&mut self) -> Option<PendingHide> {
        self.slot.take()
    }

    /// Fire the pending hide if its deadline has passed.
    ///
    /// A fired hide is cleared, so each arming fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<PendingHide> {
        match self.slot {
            Some(pending) if pending.deadline <= now => {
                self.slot = None;
                debug!("auto-hide {:?} fired", pending.id);
                Some(pending)
            }
            _ => None,
        }
    }

    /// The pending hide, if any.
    pub fn pending(&self) -> Option<&PendingHide> {
        self.slot.as_ref()
    }

    /// Time left until the pending hide fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.slot
            .as_ref()
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }
}
