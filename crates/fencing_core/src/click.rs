//! Click Disambiguator
//!
//! Classifies activations of one control as single or double by comparing
//! against the previous activation. The timestamp is updated on every
//! activation, so a rapid burst reads single, double, double, ...

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    Single,
    Double,
}

#[derive(Debug, Clone)]
pub struct ClickDisambiguator {
    window: Duration,
    last: Option<Duration>,
}

impl ClickDisambiguator {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an activation at `now` and classify it. A gap strictly shorter
    /// than the window is a double.
    pub fn classify(&mut self, now: Duration) -> ClickKind {
        let kind = match self.last {
            Some(prev) if now.saturating_sub(prev) < self.window => ClickKind::Double,
            _ => ClickKind::Single,
        };
        self.last = Some(now);
        kind
    }

    /// Forget the previous activation.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
