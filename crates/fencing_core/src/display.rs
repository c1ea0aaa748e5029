//! Presentation View
//!
//! Everything a front end needs to draw the remote: formatted clock, run
//! status, indicator labels and the control panel with accessible names.
//! Derived from [`MatchState`] only; nothing here mutates.

use serde::Serialize;

use crate::action::Action;
use crate::clock::TimeSource;
use crate::remote::Remote;
use crate::state::{CardColor, MatchState, Priority, Side};
use crate::tutorial::{StepProgress, TutorialSession};

/// `M:SS`, minutes unpadded.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// Pause countdown with the main clock stopped
    Pause,
    /// Pause countdown on top of a running main clock
    Paused,
    Running,
    Stopped,
}

impl RunStatus {
    pub fn of(state: &MatchState) -> Self {
        match (state.pause_active(), state.is_running()) {
            (true, false) => RunStatus::Pause,
            (true, true) => RunStatus::Paused,
            (false, true) => RunStatus::Running,
            (false, false) => RunStatus::Stopped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Pause => "PAUSE",
            RunStatus::Paused => "PAUSED",
            RunStatus::Running => "RUNNING",
            RunStatus::Stopped => "STOPPED",
        }
    }
}

pub fn card_label(side: Side, color: CardColor, on: bool) -> String {
    let state = if on { "on" } else { "off" };
    format!("{} {} card {}", side.as_str(), color.as_str(), state)
}

/// Label of the priority lamp, present only while a side holds priority.
pub fn priority_label(priority: Priority) -> Option<String> {
    priority.holder().map(|side| format!("priority {}", side.as_str()))
}

/// A button on the remote panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    StartStop,
    Pause,
    ResetScores,
    Set,
    MatchCount,
    PriorityManual,
    PriorityRandom,
    Card { side: Side, color: CardColor },
    AddPoint { side: Side },
    RemovePoint { side: Side },
}

impl Control {
    /// Panel order: clock controls, match controls, then per-side buttons.
    pub fn all() -> Vec<Control> {
        let mut controls = vec![
            Control::StartStop,
            Control::Pause,
            Control::ResetScores,
            Control::Set,
            Control::MatchCount,
            Control::PriorityManual,
            Control::PriorityRandom,
        ];
        for side in Side::ALL {
            controls.extend(CardColor::ALL.iter().map(|&color| Control::Card { side, color }));
            controls.push(Control::AddPoint { side });
            controls.push(Control::RemovePoint { side });
        }
        controls
    }

    pub fn accessible_name(&self) -> String {
        match self {
            Control::StartStop => "START STOP".to_string(),
            Control::Pause => "PAUSE 1MIN".to_string(),
            Control::ResetScores => "MISE A ZERO".to_string(),
            Control::Set => "SET".to_string(),
            Control::MatchCount => "MATCH COUNT".to_string(),
            Control::PriorityManual => "P MAN".to_string(),
            Control::PriorityRandom => "P CAS".to_string(),
            Control::Card { side, color } => format!("{} {} card", side.as_str(), color.as_str()),
            Control::AddPoint { side } => format!("{} add point", side.as_str()),
            Control::RemovePoint { side } => format!("{} remove point", side.as_str()),
        }
    }

    pub fn from_accessible_name(name: &str) -> Option<Control> {
        Control::all().into_iter().find(|c| c.accessible_name() == name)
    }

    pub fn action(&self) -> Action {
        match *self {
            Control::StartStop => Action::StartStop,
            Control::Pause => Action::Pause,
            Control::ResetScores => Action::ResetScores,
            Control::Set => Action::Set,
            Control::MatchCount => Action::CycleMatchCount,
            Control::PriorityManual => Action::PriorityManual,
            Control::PriorityRandom => Action::PriorityRandom,
            Control::Card { side, color } => Action::ToggleCard { side, color },
            Control::AddPoint { side } => Action::AddPoint { side },
            Control::RemovePoint { side } => Action::RemovePoint { side },
        }
    }

    /// Toggle controls report whether they read as pressed; momentary ones
    /// return `None`.
    pub fn pressed(&self, state: &MatchState) -> Option<bool> {
        match *self {
            Control::StartStop => Some(state.is_running()),
            Control::PriorityRandom => Some(state.priority() != Priority::None),
            Control::Card { side, color } => Some(state.cards(side).get(color)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub label: String,
    pub on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialView {
    pub id: String,
    pub name: String,
    pub task: String,
    pub steps: Vec<StepProgress>,
    pub complete: bool,
}

impl From<&TutorialSession> for TutorialView {
    fn from(session: &TutorialSession) -> Self {
        let scenario = session.scenario();
        Self {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            task: scenario.task.clone(),
            steps: session.progress(),
            complete: session.is_complete(),
        }
    }
}

/// Snapshot of the whole panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteView {
    pub clock: String,
    pub status: RunStatus,
    pub left_score: u32,
    pub right_score: u32,
    pub match_count: u8,
    pub cards: Vec<Indicator>,
    pub priority: Option<String>,
    pub controls: Vec<ControlView>,
    pub tutorial: Option<TutorialView>,
}

impl RemoteView {
    pub fn new(state: &MatchState, tutorial: Option<&TutorialSession>) -> Self {
        let cards = Side::ALL
            .iter()
            .flat_map(|&side| {
                CardColor::ALL.iter().map(move |&color| {
                    let on = state.cards(side).get(color);
                    Indicator { label: card_label(side, color, on), on }
                })
            })
            .collect();

        let controls = Control::all()
            .iter()
            .map(|c| ControlView { name: c.accessible_name(), pressed: c.pressed(state) })
            .collect();

        Self {
            clock: format_clock(state.displayed_secs()),
            status: RunStatus::of(state),
            left_score: state.left_score(),
            right_score: state.right_score(),
            match_count: state.match_count(),
            cards,
            priority: priority_label(state.priority()),
            controls,
            tutorial: tutorial.map(TutorialView::from),
        }
    }

    pub fn control(&self, name: &str) -> Option<&ControlView> {
        self.controls.iter().find(|c| c.name == name)
    }
}

impl<C: TimeSource> Remote<C> {
    pub fn view(&self) -> RemoteView {
        RemoteView::new(self.state(), self.tutorial())
    }

    /// Press a control by accessible name. Unknown names are ignored.
    pub fn press(&mut self, name: &str) -> Option<&MatchState> {
        let Some(control) = Control::from_accessible_name(name) else {
            log::warn!("No control named '{}'", name);
            return None;
        };
        Some(self.dispatch(control.action()))
    }
}
