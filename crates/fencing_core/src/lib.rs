//! # fencing_core - Fencing Scoring-Machine Remote
//!
//! Core of a fencing scoring-machine remote control: the match state, the two
//! repeating timers that drive it, and a tutorial layer that checks the state
//! against scripted practice steps.
//!
//! ## Features
//! - Pure, copyable match state with one transition per panel button
//! - Deterministic timing through a pluggable time source
//! - Seedable random priority
//! - JSON API and a presentation view for front ends
//!
//! ```rust
//! use fencing_core::{Action, ManualClock, Remote, Side};
//!
//! let clock = ManualClock::new();
//! let mut remote = Remote::new(clock.clone());
//! remote.dispatch(Action::AddPoint { side: Side::Left });
//! remote.dispatch(Action::StartStop);
//! clock.advance_secs(10);
//! remote.poll();
//! assert_eq!(remote.view().clock, "2:50");
//! ```

pub mod action;
pub mod api;
pub mod click;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod remote;
pub mod state;
pub mod tutorial;

pub use action::Action;
pub use api::{dispatch_action_json, list_scenarios_json, start_tutorial_json, view_json};
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::RemoteConfig;
pub use display::{Control, RemoteView, RunStatus};
pub use error::{ConfigError, CoreError, Result};
pub use remote::{Remote, SharedRemote, SubscriptionId};
pub use state::{CardColor, Cards, MatchState, Priority, Side, StateOverride};
pub use tutorial::{Scenario, StepCondition, TutorialSession};

/// Crate version, reported by hosts in their about box.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
