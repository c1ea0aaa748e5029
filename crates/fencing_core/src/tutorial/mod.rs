//! Tutorial System
//!
//! Guided practice on top of the live match state. A scenario seeds the state
//! and lists steps; the session re-judges every step whenever the state changes.

pub mod conditions;
pub mod scenarios;
pub mod session;
pub mod types;

pub use conditions::{ConditionEvaluator, CustomCondition};
pub use session::{StepProgress, TutorialSession};
pub use types::{ComparisonOp, Scenario, Step, StepCondition};
