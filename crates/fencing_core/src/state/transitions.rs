//! Named transitions
//!
//! Every function here is total: it takes the current state by value and returns
//! the next one. Timer bookkeeping (arming, cancelling) is the scheduler's job;
//! these functions only describe what the state looks like afterwards.

use super::{CardColor, MatchState, Priority, Side, MATCH_COUNT_MAX};

impl MatchState {
    /// START/STOP. Either direction also ends a pending pause.
    #[must_use]
    pub fn start_stop(mut self) -> Self {
        self.running = !self.running && self.time_remaining > 0;
        self.clear_pause();
        self
    }

    /// PAUSE 1MIN. Replaces any pause in flight with a fresh one.
    #[must_use]
    pub fn begin_pause(mut self, pause_secs: u32) -> Self {
        self.paused = true;
        self.pause_remaining = Some(pause_secs.max(1));
        self
    }

    #[must_use]
    pub fn add_point(mut self, side: Side) -> Self {
        let score = self.score_mut(side);
        *score = score.saturating_add(1);
        self
    }

    /// Floored at zero.
    #[must_use]
    pub fn remove_point(mut self, side: Side) -> Self {
        let score = self.score_mut(side);
        *score = score.saturating_sub(1);
        self
    }

    /// MISE A ZERO
    #[must_use]
    pub fn reset_scores(mut self) -> Self {
        self.left_score = 0;
        self.right_score = 0;
        self
    }

    /// SET: load the clock, stop it, and drop any pause.
    #[must_use]
    pub fn set_clock(mut self, secs: u32) -> Self {
        self.time_remaining = secs;
        self.running = false;
        self.clear_pause();
        self
    }

    #[must_use]
    pub fn toggle_card(mut self, side: Side, color: CardColor) -> Self {
        self.cards_mut(side).toggle(color);
        self
    }

    /// Manual MATCH COUNT button: 0 -> 1 -> 2 -> 3 -> 0
    #[must_use]
    pub fn cycle_match_count(mut self) -> Self {
        self.match_count = (self.match_count + 1) % (MATCH_COUNT_MAX + 1);
        self
    }

    /// Automatic advance on pause expiry: 1 -> 2 -> 3 -> 1. Never turns the
    /// indicator on or off, so 0 stays 0.
    #[must_use]
    pub fn advance_match_count(mut self) -> Self {
        self.match_count = match self.match_count {
            0 => 0,
            n if n >= MATCH_COUNT_MAX => 1,
            n => n + 1,
        };
        self
    }

    /// P MAN
    #[must_use]
    pub fn cycle_priority(mut self) -> Self {
        self.priority = self.priority.next_manual();
        self
    }

    /// P CAS: assign a side if nobody holds priority, otherwise clear it.
    /// `draw` is only called when a side has to be picked.
    #[must_use]
    pub fn toggle_random_priority<F>(mut self, draw: F) -> Self
    where
        F: FnOnce() -> Side,
    {
        self.priority = match self.priority {
            Priority::None => Priority::from_side(draw()),
            _ => Priority::None,
        };
        self
    }

    /// One second of the main countdown. Reaching zero stops the clock in the
    /// same step.
    #[must_use]
    pub fn countdown_tick(mut self) -> Self {
        if !self.countdown_armed() {
            return self;
        }
        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            self.running = false;
            self.clear_pause();
        }
        self
    }

    /// One second of the pause countdown. On expiry the pause clears, the
    /// clock stops and reloads to `bout_secs`, and the match count advances.
    #[must_use]
    pub fn pause_tick(mut self, bout_secs: u32) -> Self {
        let Some(remaining) = self.pause_remaining else {
            return self;
        };
        if remaining > 1 {
            self.pause_remaining = Some(remaining - 1);
            return self;
        }
        self.clear_pause();
        self.running = false;
        self.time_remaining = bout_secs;
        self.advance_match_count()
    }

    fn clear_pause(&mut self) {
        self.paused = false;
        self.pause_remaining = None;
    }
}
