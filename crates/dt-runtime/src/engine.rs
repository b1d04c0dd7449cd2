use std::sync::Arc;

use dt_core::{
    format_rewards, ConditionExpr, DialogueError, DialogueGraph, DialogueNode, EngineSnapshot,
    HistoryEntry, QuestEvent, QuestProgress, QuestSummary, Response, RuntimeState, ScriptCommand,
    VariableValue, PLAYER_SPEAKER, QUEST_COMPLETED_TEXT,
};

mod eval;
mod lifecycle;
mod quest_log;
mod snapshot;
mod step;

pub use eval::{evaluate_condition, execute_command};
pub use lifecycle::{DialogueEngine, EngineStatus, SNAPSHOT_SCHEMA};
