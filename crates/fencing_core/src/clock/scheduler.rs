//! Clock Scheduler
//!
//! Owns the main countdown timer and the pause timer as explicit handles.
//! Arming always cancels the previous handle of the same kind first, and a
//! firing carries the id of the handle that produced it, so a cancelled timer
//! can never be mistaken for a live one.

use std::time::Duration;

use crate::state::MatchState;

/// Which of the two repeating timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Pause,
}

/// Identity of one armed timer. Never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A scheduled repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: TimerId,
    pub kind: TimerKind,
    /// When the next firing is due.
    pub deadline: Duration,
}

/// One due firing, handed to the dispatcher to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFiring {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Scheduled time of this firing (not the poll time).
    pub at: Duration,
}

#[derive(Debug, Clone)]
pub struct ClockScheduler {
    period: Duration,
    countdown: Option<TimerHandle>,
    pause: Option<TimerHandle>,
    next_id: u64,
}

impl ClockScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period, countdown: None, pause: None, next_id: 1 }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn countdown(&self) -> Option<&TimerHandle> {
        self.countdown.as_ref()
    }

    pub fn pause(&self) -> Option<&TimerHandle> {
        self.pause.as_ref()
    }

    /// Whether `id` still names a live timer.
    pub fn is_live(&self, id: TimerId) -> bool {
        self.countdown.iter().chain(self.pause.iter()).any(|h| h.id == id)
    }

    /// Start the countdown timer; first firing one period after `now`.
    pub fn arm_countdown(&mut self, now: Duration) -> TimerId {
        self.cancel_countdown();
        let handle = self.new_handle(TimerKind::Countdown, now);
        self.countdown = Some(handle);
        handle.id
    }

    pub fn cancel_countdown(&mut self) -> Option<TimerId> {
        let cancelled = self.countdown.take().map(|h| h.id);
        if let Some(id) = cancelled {
            log::trace!("countdown timer {:?} cancelled", id);
        }
        cancelled
    }

    /// Start a fresh pause timer, tearing down any pause timer in flight.
    pub fn arm_pause(&mut self, now: Duration) -> TimerId {
        self.cancel_pause();
        let handle = self.new_handle(TimerKind::Pause, now);
        self.pause = Some(handle);
        handle.id
    }

    pub fn cancel_pause(&mut self) -> Option<TimerId> {
        let cancelled = self.pause.take().map(|h| h.id);
        if let Some(id) = cancelled {
            log::trace!("pause timer {:?} cancelled", id);
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        self.cancel_countdown();
        self.cancel_pause();
    }

    /// Bring the timers in line with `state`.
    ///
    /// The countdown runs exactly while [`MatchState::countdown_armed`] holds;
    /// an already-running countdown keeps its phase. The pause timer is dropped
    /// once the state no longer carries a pause, and armed if the state has a
    /// pause without one.
    pub fn sync(&mut self, state: &MatchState, now: Duration) {
        if state.countdown_armed() {
            if self.countdown.is_none() {
                self.arm_countdown(now);
            }
        } else {
            self.cancel_countdown();
        }

        if state.pause_active() {
            if self.pause.is_none() {
                self.arm_pause(now);
            }
        } else {
            self.cancel_pause();
        }
    }

    /// Earliest timer due at or before `now`, rescheduled for its next period.
    ///
    /// Callers apply the firing and call [`ClockScheduler::sync`] before asking
    /// again, so a timer cancelled by an earlier firing is never returned.
    pub fn next_due(&mut self, now: Duration) -> Option<TimerFiring> {
        let pause_first = match (&self.countdown, &self.pause) {
            (Some(c), Some(p)) => (p.deadline, p.id) < (c.deadline, c.id),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => return None,
        };

        let period = self.period;
        let slot = if pause_first { &mut self.pause } else { &mut self.countdown };
        let handle = slot.as_mut()?;
        if handle.deadline > now {
            return None;
        }
        let firing = TimerFiring { id: handle.id, kind: handle.kind, at: handle.deadline };
        handle.deadline += period;
        Some(firing)
    }

    fn new_handle(&mut self, kind: TimerKind, now: Duration) -> TimerHandle {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        log::trace!("{:?} timer {:?} armed at {:?}", kind, id, now);
        TimerHandle { id, kind, deadline: now + self.period }
    }
}
