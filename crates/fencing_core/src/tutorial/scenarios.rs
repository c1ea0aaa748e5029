//! Built-in practice scenarios

use once_cell::sync::Lazy;

use super::types::*;
use crate::display::format_clock;
use crate::state::{Cards, Priority, Side, StateOverride, BOUT_SECS};

pub const RESET_FOR_POOL_MATCH: &str = "reset-pool-match";

/// Scenario constructors keyed by id; each takes the configured bout length.
const BUILDERS: &[(&str, fn(u32) -> Scenario)] =
    &[(RESET_FOR_POOL_MATCH, reset_for_pool_match)];

static BUILTIN: Lazy<Vec<Scenario>> =
    Lazy::new(|| BUILDERS.iter().map(|(_, build)| build(BOUT_SECS)).collect());

/// Every scenario shipped with the crate, in menu order, for a standard bout.
pub fn builtin() -> &'static [Scenario] {
    &BUILTIN
}

pub fn find(id: &str) -> Option<&'static Scenario> {
    BUILTIN.iter().find(|s| s.id == id)
}

/// Build the scenario `id` for a bout of `bout_secs`.
pub fn build(id: &str, bout_secs: u32) -> Option<Scenario> {
    BUILDERS.iter().find(|(name, _)| *name == id).map(|(_, build)| build(bout_secs))
}

/// The machine is left over from the previous bout; put it back to a clean
/// pool-bout setup.
pub fn reset_for_pool_match(bout_secs: u32) -> Scenario {
    Scenario {
        id: RESET_FOR_POOL_MATCH.to_string(),
        name: "Reset for Pool Match".to_string(),
        description: "The last bout left the machine with scores, a card, priority and \
                      the match count still showing."
            .to_string(),
        task: "Get the machine ready for the next pool bout.".to_string(),
        initial_state: StateOverride {
            left_score: Some(5),
            right_score: Some(6),
            time_remaining: Some(21.min(bout_secs.saturating_sub(1))),
            priority: Some(Priority::Right),
            match_count: Some(3),
            left_card: Some(Cards { yellow: true, red: false }),
            ..Default::default()
        },
        steps: vec![
            Step::new(
                "reset-time",
                &format!("Reset the time to {}", format_clock(bout_secs)),
                StepCondition::TimeRemaining(ComparisonOp::Equal, bout_secs),
            ),
            Step::new(
                "reset-score",
                "Reset both scores to 0",
                StepCondition::And(vec![
                    StepCondition::Score(Side::Left, ComparisonOp::Equal, 0),
                    StepCondition::Score(Side::Right, ComparisonOp::Equal, 0),
                ]),
            ),
            Step::new("reset-priority", "Clear priority", StepCondition::Priority(Priority::None)),
            Step::new("reset-cards", "Clear all cards", StepCondition::NoCards),
            Step::new(
                "reset-match-count",
                "Turn off the match count",
                StepCondition::MatchCount(ComparisonOp::Equal, 0),
            ),
        ],
    }
}
