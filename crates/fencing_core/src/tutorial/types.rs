//! Tutorial Core Types
//!
//! Scenarios are plain data: a named starting state and an ordered list of
//! steps, each judged by a [`StepCondition`] over the live match state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::state::{CardColor, Priority, Side, StateOverride, MATCH_COUNT_MAX};

/// Guided practice scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// What the user is asked to do, shown above the steps
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub initial_state: StateOverride,
    pub steps: Vec<Step>,
}

/// One checklist item of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub description: String,
    pub condition: StepCondition,
}

impl Step {
    pub fn new(id: &str, description: &str, condition: StepCondition) -> Self {
        Self { id: id.to_string(), description: description.to_string(), condition }
    }
}

/// Predicate over a match-state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCondition {
    TimeRemaining(ComparisonOp, u32),
    Score(Side, ComparisonOp, u32),
    Card { side: Side, color: CardColor, on: bool },
    /// No card shown on either side
    NoCards,
    Priority(Priority),
    MatchCount(ComparisonOp, u8),
    Running(bool),
    PauseActive(bool),
    And(Vec<StepCondition>),
    Or(Vec<StepCondition>),
    Not(Box<StepCondition>),
    /// Named predicate registered on the evaluator
    Custom(String),
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl ComparisonOp {
    pub fn compare<T: PartialOrd>(self, left: T, right: T) -> bool {
        match self {
            ComparisonOp::Equal => left == right,
            ComparisonOp::NotEqual => left != right,
            ComparisonOp::Greater => left > right,
            ComparisonOp::GreaterEqual => left >= right,
            ComparisonOp::Less => left < right,
            ComparisonOp::LessEqual => left <= right,
        }
    }
}

impl StepCondition {
    /// Collect the names of every `Custom` node in the tree.
    pub fn custom_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            StepCondition::Custom(name) => out.push(name),
            StepCondition::And(items) | StepCondition::Or(items) => {
                for item in items {
                    item.custom_names(out);
                }
            }
            StepCondition::Not(inner) => inner.custom_names(out),
            _ => {}
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let scenario: Self = serde_json::from_str(json)?;
        Ok(scenario)
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Structural checks that do not depend on the evaluator.
    pub fn validate(&self, bout_secs: u32) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidScenario("scenario id is empty".into()));
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.id.trim().is_empty() {
                return Err(CoreError::InvalidScenario(format!(
                    "scenario {} has a step with an empty id",
                    self.id
                )));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(CoreError::InvalidScenario(format!(
                    "scenario {} repeats step id {}",
                    self.id, step.id
                )));
            }
        }

        if let Some(t) = self.initial_state.time_remaining {
            if t > bout_secs {
                return Err(CoreError::InvalidScenario(format!(
                    "scenario {} starts with {}s on the clock, more than {}s",
                    self.id, t, bout_secs
                )));
            }
        }
        if let Some(m) = self.initial_state.match_count {
            if m > MATCH_COUNT_MAX {
                return Err(CoreError::InvalidScenario(format!(
                    "scenario {} starts with match count {}",
                    self.id, m
                )));
            }
        }
        Ok(())
    }
}
