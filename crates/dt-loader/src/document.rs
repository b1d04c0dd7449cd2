use std::collections::BTreeMap;

use dt_core::{DialogueError, DialogueGraph, DialogueNode, Metadata, Quest, VariableValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";

/// On-disk shape of a dialogue file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueDocument {
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    pub starting_dialogue: String,
    pub dialogues: Vec<DialogueNode>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub variables: Option<BTreeMap<String, VariableValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<BTreeMap<String, JsonValue>>,
}

impl DialogueDocument {
    pub fn into_graph(self) -> Result<DialogueGraph, DialogueError> {
        let mut graph = DialogueGraph::new(self.starting_dialogue, self.dialogues, self.quests)?;
        if let Some(variables) = self.variables {
            graph = graph.with_variables(variables);
        }
        graph.schema_version = self.schema_version;
        graph.metadata = self.metadata;
        graph.characters = self.characters;
        Ok(graph)
    }

    pub fn from_graph(graph: &DialogueGraph) -> Self {
        Self {
            schema_version: graph.schema_version.clone(),
            metadata: graph.metadata.clone(),
            starting_dialogue: graph.starting_node_id.clone(),
            dialogues: graph.nodes().to_vec(),
            quests: graph.quests().to_vec(),
            variables: graph.variables_declared().then(|| graph.variables().clone()),
            characters: graph.characters.clone(),
        }
    }
}

pub fn load_graph_from_str(source: &str) -> Result<DialogueGraph, DialogueError> {
    let value = serde_json::from_str::<JsonValue>(source).map_err(|error| {
        DialogueError::new(
            "LOAD_JSON_INVALID",
            format!("Failed to parse dialogue JSON: {}", error),
        )
    })?;
    load_graph_from_value(&value)
}

pub fn load_graph_from_value(value: &JsonValue) -> Result<DialogueGraph, DialogueError> {
    let document = DialogueDocument::deserialize(value).map_err(|error| {
        DialogueError::new(
            "LOAD_DOCUMENT_INVALID",
            format!("Dialogue document has an invalid shape: {}", error),
        )
    })?;
    document.into_graph()
}

pub fn graph_to_value(graph: &DialogueGraph) -> Result<JsonValue, DialogueError> {
    serde_json::to_value(DialogueDocument::from_graph(graph)).map_err(|error| {
        DialogueError::new(
            "LOAD_SERIALIZE_FAILED",
            format!("Failed to serialize dialogue graph: {}", error),
        )
    })
}

/// Pretty-printed JSON that loads back into an equal graph.
pub fn serialize_graph(graph: &DialogueGraph) -> Result<String, DialogueError> {
    serde_json::to_string_pretty(&DialogueDocument::from_graph(graph)).map_err(|error| {
        DialogueError::new(
            "LOAD_SERIALIZE_FAILED",
            format!("Failed to serialize dialogue graph: {}", error),
        )
    })
}
