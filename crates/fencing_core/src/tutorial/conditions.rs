//! Condition Evaluation
//!
//! Pure evaluation of step conditions against a state snapshot. Nothing here
//! remembers earlier states.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::*;
use crate::state::{CardColor, MatchState, Side};

pub type CustomCondition = Arc<dyn Fn(&MatchState) -> bool + Send + Sync>;

pub struct ConditionEvaluator {
    custom_evaluators: HashMap<String, CustomCondition>,
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConditionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.custom_evaluators.keys().collect();
        names.sort();
        f.debug_struct("ConditionEvaluator").field("custom", &names).finish()
    }
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        let mut evaluator = Self { custom_evaluators: HashMap::new() };
        evaluator.register_default_evaluators();
        evaluator
    }

    fn register_default_evaluators(&mut self) {
        // Scores level (including 0-0)
        self.register_custom_evaluator(
            "scores_level",
            Arc::new(|state: &MatchState| state.left_score() == state.right_score()),
        );

        // Clock loaded and idle, ready for "allez"
        self.register_custom_evaluator(
            "ready_to_fence",
            Arc::new(|state: &MatchState| {
                !state.is_running() && !state.pause_active() && state.time_remaining() > 0
            }),
        );
    }

    pub fn evaluate(&self, condition: &StepCondition, state: &MatchState) -> bool {
        match condition {
            StepCondition::TimeRemaining(op, value) => op.compare(state.time_remaining(), *value),

            StepCondition::Score(side, op, value) => op.compare(state.score(*side), *value),

            StepCondition::Card { side, color, on } => state.cards(*side).get(*color) == *on,

            StepCondition::NoCards => Side::ALL
                .iter()
                .all(|side| CardColor::ALL.iter().all(|color| !state.cards(*side).get(*color))),

            StepCondition::Priority(priority) => state.priority() == *priority,

            StepCondition::MatchCount(op, value) => op.compare(state.match_count(), *value),

            StepCondition::Running(running) => state.is_running() == *running,

            StepCondition::PauseActive(active) => state.pause_active() == *active,

            StepCondition::And(conditions) => self.evaluate_all(conditions, state),

            StepCondition::Or(conditions) => self.evaluate_any(conditions, state),

            StepCondition::Not(condition) => !self.evaluate(condition, state),

            StepCondition::Custom(name) => self.evaluate_custom(name, state),
        }
    }

    pub fn evaluate_all(&self, conditions: &[StepCondition], state: &MatchState) -> bool {
        conditions.iter().all(|c| self.evaluate(c, state))
    }

    pub fn evaluate_any(&self, conditions: &[StepCondition], state: &MatchState) -> bool {
        conditions.iter().any(|c| self.evaluate(c, state))
    }

    pub fn register_custom_evaluator(&mut self, name: &str, evaluator: CustomCondition) {
        self.custom_evaluators.insert(name.to_string(), evaluator);
    }

    pub fn has_custom_evaluator(&self, name: &str) -> bool {
        self.custom_evaluators.contains_key(name)
    }

    /// Unknown names evaluate to false.
    pub fn evaluate_custom(&self, name: &str, state: &MatchState) -> bool {
        match self.custom_evaluators.get(name) {
            Some(evaluator) => evaluator(state),
            None => {
                log::warn!("No custom tutorial condition registered as '{}'", name);
                false
            }
        }
    }
}
