//! Scene communication contract between the host application and the
//! renderer. The host OWNS state; the renderer displays state and emits
//! user actions. The renderer never mutates `node_states` itself.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::error::{WaymarkError, WaymarkResult};

/// Which granularity of the journey a scene shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    /// One node per week; no mobile avatar, tap pans the camera.
    Monthly,
    /// Seven day nodes for one week; avatar walks between nodes.
    Weekly,
    /// The five daily task nodes; avatar walks between nodes.
    Daily,
}

impl SceneType {
    /// Whether this scene carries a walking avatar.
    pub fn has_avatar(self) -> bool {
        matches!(self, Self::Weekly | Self::Daily)
    }
}

/// Per-node progress state, owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Not yet reachable.
    Locked,
    /// Reachable but not started.
    Unlocked,
    /// Started.
    InProgress,
    /// Done. Terminal.
    Completed,
    /// Skipped. Terminal.
    Skipped,
}

impl NodeState {
    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// What a node on the path represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A week milestone on the monthly path.
    Week,
    /// A day on a weekly path.
    Day,
    /// A daily task.
    Task,
}

/// Visual/thematic environment, mapped to journey quarters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Quarter 1.
    Wilderness,
    /// Quarter 2.
    Town,
    /// Quarter 3.
    Suburbs,
    /// Quarter 4.
    City,
}

/// Seasonal tint applied over the biome palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Greener, cooler.
    Spring,
    /// Warmer.
    Summer,
    /// Warm and muted.
    Fall,
    /// Cold and blue.
    Winter,
}

/// Category of a daily task node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Medication adherence.
    Medication,
    /// Nutrition logging.
    Nutrition,
    /// Movement / exercise.
    Movement,
    /// Wellness practice.
    Wellness,
    /// Daily check-in.
    Checkin,
}

/// One tappable point on the journey graph.
///
/// Positions are absolute world-space pixels; nodes are immutable once
/// generated for a given path configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathNode {
    /// Unique, stable id (e.g. `w3`, `w3-d2`, `movement`).
    pub id: String,
    /// World-space x.
    pub x: f64,
    /// World-space y.
    pub y: f64,
    /// What the node represents.
    pub kind: NodeKind,
    /// Short display label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Task category, for task nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

/// Host → renderer props: a full snapshot of what to display.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneProps {
    /// Which scene granularity to render.
    pub scene_type: SceneType,
    /// Stable journey id; seeds the decorative prop scatter.
    pub journey_id: String,
    /// Current quarter, 1..=4.
    pub current_quarter: u8,
    /// Current week number within the journey.
    pub current_week: u32,
    /// Current day number within the week.
    pub current_day: u32,
    /// The node graph to display.
    pub path_nodes: Vec<PathNode>,
    /// Per-node state, keyed by node id. Nodes absent from the map
    /// render as [`NodeState::Locked`].
    pub node_states: BTreeMap<String, NodeState>,
    /// Environment to draw.
    pub biome: Biome,
    /// Seasonal tint.
    pub season: Season,
    /// Node id the avatar currently stands on.
    pub avatar_position: String,
}

impl SceneProps {
    /// Validate the snapshot before mounting a scene.
    pub fn validate(&self) -> WaymarkResult<()> {
        if !(1..=4).contains(&self.current_quarter) {
            return Err(WaymarkError::validation("current_quarter must be 1..=4"));
        }
        let mut seen = std::collections::BTreeSet::new();
        for node in &self.path_nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(WaymarkError::validation(format!(
                    "node '{}' has a non-finite coordinate",
                    node.id
                )));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(WaymarkError::validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&PathNode> {
        self.path_nodes.iter().find(|n| n.id == id)
    }

    /// State of a node, defaulting to [`NodeState::Locked`] when absent.
    pub fn state_of(&self, id: &str) -> NodeState {
        self.node_states.get(id).copied().unwrap_or(NodeState::Locked)
    }
}

/// Renderer → host callbacks.
///
/// All fields are required; partially-populated callback bags are not
/// representable. The renderer reports every tap — deciding whether a tap
/// on a locked node means anything is host logic.
pub struct SceneCallbacks {
    /// A node was tapped (or, with an avatar, arrived at after a tap).
    pub on_node_tapped: Box<dyn FnMut(&str, NodeKind)>,
    /// The host-level back gesture was pressed.
    pub on_back_pressed: Box<dyn FnMut()>,
    /// The scene finished mounting and drew its first frame of state.
    pub on_scene_ready: Box<dyn FnMut()>,
    /// The avatar finished walking to a node.
    pub on_avatar_arrived: Box<dyn FnMut(&str)>,
    /// A celebration effect ran to completion.
    pub on_celebration_complete: Box<dyn FnMut()>,
}

impl SceneCallbacks {
    /// Callbacks that do nothing; useful for tests and offline rendering.
    pub fn noop() -> Self {
        Self {
            on_node_tapped: Box::new(|_, _| {}),
            on_back_pressed: Box::new(|| {}),
            on_scene_ready: Box::new(|| {}),
            on_avatar_arrived: Box::new(|_| {}),
            on_celebration_complete: Box::new(|| {}),
        }
    }
}

impl fmt::Debug for SceneCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SceneCallbacks { .. }")
    }
}

/// Legal transitions out of each state.
pub fn valid_transitions(from: NodeState) -> &'static [NodeState] {
    match from {
        NodeState::Locked => &[NodeState::Unlocked],
        NodeState::Unlocked => &[NodeState::InProgress, NodeState::Skipped],
        NodeState::InProgress => &[NodeState::Completed, NodeState::Skipped],
        NodeState::Completed => &[],
        NodeState::Skipped => &[],
    }
}

/// Whether `from -> to` is a legal node-state transition.
pub fn can_transition(from: NodeState, to: NodeState) -> bool {
    valid_transitions(from).contains(&to)
}

/// Apply a transition, returning `target` if legal and `current`
/// unchanged otherwise.
///
/// Illegal transitions are a silent no-op, not an error: user-driven taps
/// on a stale view must never take the session down.
pub fn transition_node(current: NodeState, target: NodeState) -> NodeState {
    if can_transition(current, target) {
        target
    } else {
        current
    }
}

/// Biome for a journey quarter (1..=4).
pub fn quarter_biome(quarter: u8) -> Biome {
    match quarter {
        1 => Biome::Wilderness,
        2 => Biome::Town,
        3 => Biome::Suburbs,
        _ => Biome::City,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/contract.rs"]
mod tests;
