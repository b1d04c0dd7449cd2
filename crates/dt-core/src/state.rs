use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DialogueGraph, NodeId, QuestId, Rewards, VarName};
use crate::value::VariableValue;

pub const PLAYER_SPEAKER: &str = "Player";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub speaker: String,
    pub text: String,
    /// Node id for NPC lines, response id for player lines.
    pub source_id: String,
    pub is_player: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    pub current_stage: i64,
    pub completed: bool,
}

impl QuestProgress {
    pub fn started() -> Self {
        Self {
            current_stage: 1,
            completed: false,
        }
    }
}

/// Mutable state of one playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeState {
    pub current_node_id: NodeId,
    pub history: Vec<HistoryEntry>,
    pub quest_state: BTreeMap<QuestId, QuestProgress>,
    pub variables: BTreeMap<VarName, VariableValue>,
}

impl RuntimeState {
    /// Fresh state seeded from the graph's declared variables.
    pub fn seeded_from(graph: &DialogueGraph) -> Self {
        Self {
            current_node_id: graph.starting_node_id.clone(),
            history: Vec::new(),
            quest_state: BTreeMap::new(),
            variables: graph.variables().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuestEvent {
    #[serde(rename_all = "camelCase")]
    Started {
        quest_id: QuestId,
        title: String,
        journal_entry: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    StageChanged {
        quest_id: QuestId,
        title: String,
        stage: i64,
        journal_entry: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Completed {
        quest_id: QuestId,
        title: String,
        rewards: Option<Rewards>,
    },
}

pub const QUEST_COMPLETED_TEXT: &str = "completed";

/// One line of the quest log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSummary {
    pub quest_id: QuestId,
    pub title: String,
    /// Journal entry of the current stage, or `"completed"`.
    pub stage_text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub schema_version: String,
    pub state: RuntimeState,
    pub terminated: bool,
}

/// `"50 XP, Items: key, map"`; empty parts are left out.
pub fn format_rewards(rewards: &Rewards) -> String {
    let mut parts = Vec::new();
    if rewards.xp != 0 {
        parts.push(format!("{} XP", rewards.xp));
    }
    if !rewards.items.is_empty() {
        parts.push(format!("Items: {}", rewards.items.join(", ")));
    }
    parts.join(", ")
}
