use std::path::{Path, PathBuf};

use dt_core::{DialogueError, EngineSnapshot, HistoryEntry, QuestEvent, QuestSummary};
use serde::{Deserialize, Serialize};

pub(crate) const PLAYER_STATE_SCHEMA: &str = "player-state.v1";

#[derive(Debug, Clone)]
pub(crate) struct LoadedDialogue {
    pub(crate) path: PathBuf,
    pub(crate) dialogue_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerState {
    pub(crate) schema_version: String,
    /// Absolute path of the dialogue document the snapshot belongs to.
    pub(crate) dialogue_path: String,
    pub(crate) snapshot: EngineSnapshot,
}

impl PlayerState {
    pub(crate) fn new(dialogue_path: &Path, snapshot: EngineSnapshot) -> Self {
        Self {
            schema_version: PLAYER_STATE_SCHEMA.to_string(),
            dialogue_path: dialogue_path.to_string_lossy().to_string(),
            snapshot,
        }
    }

    pub(crate) fn check_schema(&self) -> Result<(), DialogueError> {
        if self.schema_version == PLAYER_STATE_SCHEMA {
            return Ok(());
        }
        Err(DialogueError::new(
            "CLI_STATE_SCHEMA",
            format!(
                "Unsupported player state schema: {} (expected {})",
                self.schema_version, PLAYER_STATE_SCHEMA
            ),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundaryEvent {
    Responses,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NodeView {
    pub(crate) id: String,
    pub(crate) speaker: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone)]
pub(crate) struct BoundaryResult {
    pub(crate) event: BoundaryEvent,
    pub(crate) node: Option<NodeView>,
    pub(crate) lines: Vec<HistoryEntry>,
    pub(crate) quest_events: Vec<QuestEvent>,
    pub(crate) quest_log: Vec<QuestSummary>,
    pub(crate) responses: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputLevel {
    Quiet,
    Normal,
    Verbose,
}

impl OutputLevel {
    pub(crate) fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    pub(crate) fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
        }
    }
}
