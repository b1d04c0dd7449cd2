use std::sync::Arc;

use dt_core::{DialogueError, DialogueGraph, EngineSnapshot};
use dt_loader::load_graph_from_str;
use dt_runtime::DialogueEngine;
use dt_validator::{validate_document, ValidationReport, ValidatorConfig};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone)]
pub struct ResumeEngineFromJsonOptions {
    pub dialogue_json: String,
    pub snapshot: EngineSnapshot,
}

pub fn load_graph(dialogue_json: &str) -> Result<DialogueGraph, DialogueError> {
    load_graph_from_str(dialogue_json)
}

/// Loads a document and starts a conversation at its starting node.
pub fn create_engine_from_json(dialogue_json: &str) -> Result<DialogueEngine, DialogueError> {
    create_engine(Arc::new(load_graph(dialogue_json)?))
}

pub fn create_engine(graph: Arc<DialogueGraph>) -> Result<DialogueEngine, DialogueError> {
    let mut engine = DialogueEngine::new(graph);
    engine.reset()?;
    Ok(engine)
}

pub fn resume_engine_from_json(
    options: ResumeEngineFromJsonOptions,
) -> Result<DialogueEngine, DialogueError> {
    let graph = load_graph(&options.dialogue_json)?;
    DialogueEngine::resume(Arc::new(graph), options.snapshot)
}

/// Validates document text. Only unparseable JSON is an `Err`; everything
/// else is reported as diagnostics.
pub fn validate_json(
    dialogue_json: &str,
    config: &ValidatorConfig,
) -> Result<ValidationReport, DialogueError> {
    let document = serde_json::from_str::<JsonValue>(dialogue_json).map_err(|error| {
        DialogueError::new(
            "API_JSON_INVALID",
            format!("Dialogue text is not valid JSON: {}", error),
        )
    })?;
    Ok(validate_document(&document, config))
}
