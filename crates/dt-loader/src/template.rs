use std::collections::BTreeMap;

use dt_core::{DialogueNode, Metadata, Response};

use crate::document::{DialogueDocument, DEFAULT_SCHEMA_VERSION};

pub const TEMPLATE_START_NODE: &str = "dialogue_start";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub title: String,
    pub author: String,
    pub description: String,
    pub creation_date: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            title: "New Dialogue".to_string(),
            author: "Dialogue Tree Creator".to_string(),
            description: "A new dialogue created with dialogue-tree".to_string(),
            creation_date: String::new(),
        }
    }
}

/// One node, one ending response, no quests.
pub fn new_document_template(options: TemplateOptions) -> DialogueDocument {
    DialogueDocument {
        schema_version: Some(DEFAULT_SCHEMA_VERSION.to_string()),
        metadata: Some(Metadata {
            title: options.title,
            author: options.author,
            creation_date: options.creation_date,
            description: options.description,
        }),
        starting_dialogue: TEMPLATE_START_NODE.to_string(),
        dialogues: vec![DialogueNode {
            id: TEMPLATE_START_NODE.to_string(),
            speaker: "System".to_string(),
            text: "This is a new dialogue. Edit this text to begin.".to_string(),
            responses: vec![Response::terminal("response_end", "> End conversation")],
            on_entry: None,
            image_url: None,
        }],
        quests: Vec::new(),
        variables: Some(BTreeMap::new()),
        characters: None,
    }
}
