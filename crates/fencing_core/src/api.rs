//! JSON API
//!
//! String-in, string-out entry points for front ends that talk JSON. Every
//! call answers with the current [`crate::display::RemoteView`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::clock::TimeSource;
use crate::error::Result;
use crate::remote::Remote;
use crate::tutorial::{scenarios, Scenario};

/// Catalogue entry for the tutorial menu
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: usize,
}

/// Apply one action given as `{"action": "add_point", "side": "left"}`.
pub fn dispatch_action_json<C: TimeSource>(remote: &mut Remote<C>, json: &str) -> Result<String> {
    let action: Action = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "rejected action payload");
        e
    })?;
    debug!(action = action.name(), "dispatching");
    remote.dispatch(action);
    view_json(remote)
}

/// Start a tutorial from a full scenario document.
pub fn start_tutorial_json<C: TimeSource>(remote: &mut Remote<C>, json: &str) -> Result<String> {
    let scenario = Scenario::from_json(json)?;
    info!(scenario = %scenario.id, "starting tutorial from payload");
    remote.start_tutorial(scenario)?;
    view_json(remote)
}

pub fn start_builtin_tutorial_json<C: TimeSource>(
    remote: &mut Remote<C>,
    id: &str,
) -> Result<String> {
    info!(scenario = id, "starting built-in tutorial");
    remote.start_tutorial_by_id(id)?;
    view_json(remote)
}

pub fn exit_tutorial_json<C: TimeSource>(remote: &mut Remote<C>) -> Result<String> {
    remote.exit_tutorial();
    view_json(remote)
}

/// Fire due timers, then report the view.
pub fn poll_json<C: TimeSource>(remote: &mut Remote<C>) -> Result<String> {
    let fired = remote.poll();
    if fired > 0 {
        debug!(fired, "timers fired");
    }
    view_json(remote)
}

pub fn view_json<C: TimeSource>(remote: &Remote<C>) -> Result<String> {
    Ok(serde_json::to_string(&remote.view())?)
}

pub fn list_scenarios_json() -> Result<String> {
    let summaries: Vec<ScenarioSummary> = scenarios::builtin()
        .iter()
        .map(|s| ScenarioSummary {
            id: s.id.clone(),
            name: s.name.clone(),
            description: s.description.clone(),
            steps: s.steps.len(),
        })
        .collect();
    Ok(serde_json::to_string(&summaries)?)
}
