//! Match State
//!
//! The single authoritative record the remote drives: scores, clock, cards,
//! priority and match count. Fields are private; every change goes through the
//! named transitions in [`transitions`] so the invariants live in one place.

mod transitions;

use serde::{Deserialize, Serialize};

/// Default bout length in seconds (3:00).
pub const BOUT_SECS: u32 = 180;
/// Highest value of the match-count indicator.
pub const MATCH_COUNT_MAX: u8 = 3;

/// Fencer side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Penalty card colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Yellow,
    Red,
}

impl CardColor {
    pub const ALL: [CardColor; 2] = [CardColor::Yellow, CardColor::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            CardColor::Yellow => "yellow",
            CardColor::Red => "red",
        }
    }
}

/// Card indicators for one side. Independent toggles, no escalation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cards {
    #[serde(default)]
    pub yellow: bool,
    #[serde(default)]
    pub red: bool,
}

impl Cards {
    pub fn get(&self, color: CardColor) -> bool {
        match color {
            CardColor::Yellow => self.yellow,
            CardColor::Red => self.red,
        }
    }

    pub fn any(&self) -> bool {
        self.yellow || self.red
    }

    fn toggle(&mut self, color: CardColor) {
        match color {
            CardColor::Yellow => self.yellow = !self.yellow,
            CardColor::Red => self.red = !self.red,
        }
    }
}

/// Priority holder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Left,
    Right,
}

impl Priority {
    pub fn holder(self) -> Option<Side> {
        match self {
            Priority::None => None,
            Priority::Left => Some(Side::Left),
            Priority::Right => Some(Side::Right),
        }
    }

    pub fn from_side(side: Side) -> Self {
        match side {
            Side::Left => Priority::Left,
            Side::Right => Priority::Right,
        }
    }

    /// Manual cycle: none -> left -> right -> none
    pub fn next_manual(self) -> Self {
        match self {
            Priority::None => Priority::Left,
            Priority::Left => Priority::Right,
            Priority::Right => Priority::None,
        }
    }
}

/// Authoritative match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchState {
    left_score: u32,
    right_score: u32,
    time_remaining: u32,
    running: bool,
    paused: bool,
    left_card: Cards,
    right_card: Cards,
    priority: Priority,
    match_count: u8,
    pause_remaining: Option<u32>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(BOUT_SECS)
    }
}

impl MatchState {
    /// Fresh state: clock full, everything else zeroed or off.
    pub fn new(bout_secs: u32) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            time_remaining: bout_secs,
            running: false,
            paused: false,
            left_card: Cards::default(),
            right_card: Cards::default(),
            priority: Priority::None,
            match_count: 0,
            pause_remaining: None,
        }
    }

    /// Default state with the named fields of `overrides` applied on top.
    ///
    /// Out-of-range values are clamped: the clock to `bout_secs`, the match
    /// count to [`MATCH_COUNT_MAX`].
    pub fn with_overrides(bout_secs: u32, overrides: &StateOverride) -> Self {
        let mut state = Self::new(bout_secs);
        if let Some(v) = overrides.left_score {
            state.left_score = v;
        }
        if let Some(v) = overrides.right_score {
            state.right_score = v;
        }
        if let Some(v) = overrides.time_remaining {
            state.time_remaining = v.min(bout_secs);
        }
        if let Some(v) = overrides.running {
            state.running = v && state.time_remaining > 0;
        }
        if let Some(v) = overrides.left_card {
            state.left_card = v;
        }
        if let Some(v) = overrides.right_card {
            state.right_card = v;
        }
        if let Some(v) = overrides.priority {
            state.priority = v;
        }
        if let Some(v) = overrides.match_count {
            state.match_count = v.min(MATCH_COUNT_MAX);
        }
        state
    }

    pub fn left_score(&self) -> u32 {
        self.left_score
    }

    pub fn right_score(&self) -> u32 {
        self.right_score
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn left_card(&self) -> Cards {
        self.left_card
    }

    pub fn right_card(&self) -> Cards {
        self.right_card
    }

    pub fn cards(&self, side: Side) -> Cards {
        match side {
            Side::Left => self.left_card,
            Side::Right => self.right_card,
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn match_count(&self) -> u8 {
        self.match_count
    }

    /// Seconds left on the 1-minute pause, present only while it runs.
    pub fn pause_remaining(&self) -> Option<u32> {
        self.pause_remaining
    }

    pub fn pause_active(&self) -> bool {
        self.pause_remaining.is_some()
    }

    /// Whether the main countdown may consume ticks.
    pub fn countdown_armed(&self) -> bool {
        self.running && !self.paused && self.time_remaining > 0
    }

    /// Seconds shown on the scoreboard: the pause countdown wins while present.
    pub fn displayed_secs(&self) -> u32 {
        self.pause_remaining.unwrap_or(self.time_remaining)
    }

    /// Invariants every reachable state satisfies.
    pub fn is_consistent(&self, bout_secs: u32) -> bool {
        self.time_remaining <= bout_secs
            && self.match_count <= MATCH_COUNT_MAX
            && self.paused == self.pause_remaining.is_some()
            && !(self.running && self.time_remaining == 0)
    }

    fn cards_mut(&mut self, side: Side) -> &mut Cards {
        match side {
            Side::Left => &mut self.left_card,
            Side::Right => &mut self.right_card,
        }
    }

    fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Left => &mut self.left_score,
            Side::Right => &mut self.right_score,
        }
    }
}

/// Partial state used to seed a tutorial scenario. Unset fields keep defaults.
///
/// Pause fields are not overridable: a pause only exists with its timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateOverride {
    pub left_score: Option<u32>,
    pub right_score: Option<u32>,
    pub time_remaining: Option<u32>,
    pub running: Option<bool>,
    pub left_card: Option<Cards>,
    pub right_card: Option<Cards>,
    pub priority: Option<Priority>,
    pub match_count: Option<u8>,
}
