//! Tutorial Session
//!
//! Runtime side of a scenario. The completed-step set is rebuilt from scratch
//! on every state change, so a step that stops holding is un-completed again.

use std::collections::BTreeSet;

use serde::Serialize;

use super::conditions::ConditionEvaluator;
use super::types::Scenario;
use crate::state::MatchState;

/// Step status for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub id: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct TutorialSession {
    scenario: Scenario,
    completed: BTreeSet<String>,
}

impl TutorialSession {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario, completed: BTreeSet::new() }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Re-evaluate every step against `state`, each in isolation.
    pub fn recompute(&mut self, state: &MatchState, evaluator: &ConditionEvaluator) {
        self.completed = self
            .scenario
            .steps
            .iter()
            .filter(|step| evaluator.evaluate(&step.condition, state))
            .map(|step| step.id.clone())
            .collect();
    }

    pub fn is_step_complete(&self, step_id: &str) -> bool {
        self.completed.contains(step_id)
    }

    pub fn completed_steps(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// True when every step currently holds. A scenario without steps is
    /// never complete.
    pub fn is_complete(&self) -> bool {
        !self.scenario.steps.is_empty()
            && self.scenario.steps.iter().all(|s| self.completed.contains(&s.id))
    }

    /// Steps in authoring order with their current status.
    pub fn progress(&self) -> Vec<StepProgress> {
        self.scenario
            .steps
            .iter()
            .map(|step| StepProgress {
                id: step.id.clone(),
                description: step.description.clone(),
                completed: self.completed.contains(&step.id),
            })
            .collect()
    }
}
