use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DialogueError;
use crate::script::{
    deserialize_optional_command, deserialize_optional_condition, ConditionExpr, ScriptCommand,
};
use crate::value::VariableValue;

pub type NodeId = String;
pub type ResponseId = String;
pub type QuestId = String;
pub type VarName = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub creation_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub text: String,
    #[serde(
        rename = "next_dialogue",
        deserialize_with = "deserialize_node_ref"
    )]
    pub next_node: Option<NodeId>,
    #[serde(default, deserialize_with = "deserialize_optional_command")]
    pub script: Option<ScriptCommand>,
    #[serde(default, deserialize_with = "deserialize_optional_condition")]
    pub condition: Option<ConditionExpr>,
}

impl Response {
    /// Response that ends the conversation without side effects.
    pub fn terminal(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_node: None,
            script: None,
            condition: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: NodeId,
    #[serde(rename = "npc")]
    pub speaker: String,
    pub text: String,
    pub responses: Vec<Response>,
    #[serde(default, deserialize_with = "deserialize_optional_command")]
    pub on_entry: Option<ScriptCommand>,
    /// Presentation-only portrait reference, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl DialogueNode {
    pub fn response(&self, response_id: &str) -> Option<&Response> {
        self.responses
            .iter()
            .find(|response| response.id == response_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: i64,
    pub description: String,
    pub journal_entry: String,
    #[serde(default, deserialize_with = "deserialize_optional_command")]
    pub on_complete: Option<ScriptCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub rewards: Option<Rewards>,
}

impl Quest {
    pub fn stage(&self, stage_id: i64) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id == stage_id)
    }

    pub fn stage_ids(&self) -> Vec<i64> {
        self.stages.iter().map(|stage| stage.id).collect()
    }
}

/// Root aggregate of an authored dialogue document.
///
/// Nodes and quests keep authoring order; lookups go through an id index
/// built at construction, which is why ids are only reachable immutably.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueGraph {
    pub schema_version: Option<String>,
    pub metadata: Option<Metadata>,
    pub starting_node_id: NodeId,
    variables: BTreeMap<VarName, VariableValue>,
    variables_declared: bool,
    pub characters: Option<BTreeMap<String, JsonValue>>,
    nodes: Vec<DialogueNode>,
    node_index: HashMap<NodeId, usize>,
    quests: Vec<Quest>,
    quest_index: HashMap<QuestId, usize>,
}

impl DialogueGraph {
    /// Builds a graph, rejecting duplicate node, quest and per-node response
    /// ids. Dangling references are left for the validator.
    pub fn new(
        starting_node_id: impl Into<NodeId>,
        nodes: Vec<DialogueNode>,
        quests: Vec<Quest>,
    ) -> Result<Self, DialogueError> {
        let mut node_index = HashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id.clone(), index).is_some() {
                return Err(DialogueError::new(
                    "LOAD_DUPLICATE_NODE_ID",
                    format!("Dialogue id \"{}\" is declared more than once.", node.id),
                ));
            }
            let mut seen = Vec::with_capacity(node.responses.len());
            for response in &node.responses {
                if seen.contains(&response.id.as_str()) {
                    return Err(DialogueError::new(
                        "LOAD_DUPLICATE_RESPONSE_ID",
                        format!(
                            "Response id \"{}\" is declared more than once in dialogue \"{}\".",
                            response.id, node.id
                        ),
                    ));
                }
                seen.push(response.id.as_str());
            }
        }

        let mut quest_index = HashMap::new();
        for (index, quest) in quests.iter().enumerate() {
            if quest_index.insert(quest.id.clone(), index).is_some() {
                return Err(DialogueError::new(
                    "LOAD_DUPLICATE_QUEST_ID",
                    format!("Quest id \"{}\" is declared more than once.", quest.id),
                ));
            }
        }

        Ok(Self {
            schema_version: None,
            metadata: None,
            starting_node_id: starting_node_id.into(),
            variables: BTreeMap::new(),
            variables_declared: false,
            characters: None,
            nodes,
            node_index,
            quests,
            quest_index,
        })
    }

    pub fn with_variables(mut self, variables: BTreeMap<VarName, VariableValue>) -> Self {
        self.variables = variables;
        self.variables_declared = true;
        self
    }

    pub fn variables(&self) -> &BTreeMap<VarName, VariableValue> {
        &self.variables
    }

    /// Whether the document carries a `variables` object. Setting any
    /// variable declares it.
    pub fn variables_declared(&self) -> bool {
        self.variables_declared
    }

    pub fn set_variable(&mut self, name: impl Into<VarName>, value: VariableValue) {
        self.variables.insert(name.into(), value);
        self.variables_declared = true;
    }

    pub fn declare_variables(&mut self) {
        self.variables_declared = true;
    }

    pub fn nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }

    /// Mutable access for in-place transforms. Node ids must not change.
    pub fn nodes_mut(&mut self) -> &mut [DialogueNode] {
        &mut self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&DialogueNode> {
        self.node_index
            .get(node_id)
            .and_then(|index| self.nodes.get(*index))
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Mutable access for in-place transforms. Quest ids must not change.
    pub fn quests_mut(&mut self) -> &mut [Quest] {
        &mut self.quests
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quest_index
            .get(quest_id)
            .and_then(|index| self.quests.get(*index))
    }

    pub fn contains_quest(&self, quest_id: &str) -> bool {
        self.quest_index.contains_key(quest_id)
    }

    /// Every script command in the graph with a human-readable location.
    pub fn script_sites(&self) -> Vec<ScriptSite<'_>> {
        let mut sites = Vec::new();
        for node in &self.nodes {
            if let Some(command) = &node.on_entry {
                sites.push(ScriptSite {
                    location: format!("In dialogue '{}', on_entry", node.id),
                    command,
                });
            }
            for response in &node.responses {
                if let Some(command) = &response.script {
                    sites.push(ScriptSite {
                        location: format!(
                            "In dialogue '{}', response '{}' script",
                            node.id, response.id
                        ),
                        command,
                    });
                }
            }
        }
        for quest in &self.quests {
            for stage in &quest.stages {
                if let Some(command) = &stage.on_complete {
                    sites.push(ScriptSite {
                        location: format!(
                            "In quest '{}', stage {} on_complete",
                            quest.id, stage.id
                        ),
                        command,
                    });
                }
            }
        }
        sites
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSite<'a> {
    pub location: String,
    pub command: &'a ScriptCommand,
}

fn deserialize_node_ref<'de, D>(deserializer: D) -> Result<Option<NodeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|node_id| !node_id.is_empty()))
}
