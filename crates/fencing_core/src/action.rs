//! Remote actions
//!
//! One variant per button on the panel. The JSON form is internally tagged:
//! `{"action": "add_point", "side": "left"}`.

use serde::{Deserialize, Serialize};

use crate::state::{CardColor, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Toggle the main clock
    StartStop,
    /// Start (or restart) the fixed 1-minute pause
    Pause,
    AddPoint { side: Side },
    RemovePoint { side: Side },
    /// MISE A ZERO
    ResetScores,
    /// Single activation loads the bout time, a double loads the short time
    Set,
    ToggleCard { side: Side, color: CardColor },
    /// Manual 0 -> 1 -> 2 -> 3 -> 0 cycle
    CycleMatchCount,
    /// P MAN
    PriorityManual,
    /// P CAS
    PriorityRandom,
}

impl Action {
    /// Stable snake_case name, matching the JSON tag.
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartStop => "start_stop",
            Action::Pause => "pause",
            Action::AddPoint { .. } => "add_point",
            Action::RemovePoint { .. } => "remove_point",
            Action::ResetScores => "reset_scores",
            Action::Set => "set",
            Action::ToggleCard { .. } => "toggle_card",
            Action::CycleMatchCount => "cycle_match_count",
            Action::PriorityManual => "priority_manual",
            Action::PriorityRandom => "priority_random",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{"action": "toggle_card", "side": "right", "color": "red"}"#)
                .unwrap();
        assert_eq!(action, Action::ToggleCard { side: Side::Right, color: CardColor::Red });

        let json = serde_json::to_value(Action::AddPoint { side: Side::Left }).unwrap();
        assert_eq!(json["action"], "add_point");
        assert_eq!(json["side"], "left");
    }

    #[test]
    fn test_name_matches_tag() {
        let actions = [
            Action::StartStop,
            Action::Pause,
            Action::RemovePoint { side: Side::Left },
            Action::Set,
            Action::CycleMatchCount,
            Action::PriorityRandom,
        ];
        for action in actions {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json["action"], action.name());
        }
    }

    #[test]
    fn test_rejects_unknown_action() {
        assert!(serde_json::from_str::<Action>(r#"{"action": "rearm"}"#).is_err());
        assert!(serde_json::from_str::<Action>(r#"{"action": "add_point"}"#).is_err());
    }
}
