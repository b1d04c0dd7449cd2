use dt_core::{DialogueError, DialogueGraph, Metadata, Response, Rewards};
use dt_loader::{graph_to_value, load_graph_from_value, DEFAULT_SCHEMA_VERSION};
use serde_json::Value as JsonValue;

use crate::config::ValidatorConfig;
use crate::document::suggest_fixes;
use crate::report::ValidationReport;
use crate::validate_document;

pub const END_RESPONSE_TEXT: &str = "> [End Conversation]";

/// Fills every representable gap with its default. Applying it twice gives
/// the same graph as applying it once.
pub fn upgrade(graph: &DialogueGraph) -> DialogueGraph {
    let mut upgraded = graph.clone();

    if upgraded.schema_version.is_none() {
        upgraded.schema_version = Some(DEFAULT_SCHEMA_VERSION.to_string());
    }
    if upgraded.metadata.is_none() {
        upgraded.metadata = Some(Metadata {
            title: "Auto-upgraded Dialogue".to_string(),
            author: "Dialogue Validator".to_string(),
            creation_date: String::new(),
            description: "Automatically upgraded from legacy format".to_string(),
        });
    }
    upgraded.declare_variables();

    for node in upgraded.nodes_mut() {
        if node.responses.is_empty() {
            let end_id = format!("end_{}", node.id);
            node.responses.push(Response::terminal(end_id, END_RESPONSE_TEXT));
        }
    }
    for quest in upgraded.quests_mut() {
        quest.rewards.get_or_insert_with(Rewards::default);
    }

    upgraded
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    pub suggestions: Vec<String>,
    pub document: JsonValue,
    /// Validation of the upgraded document.
    pub report: ValidationReport,
}

impl FixOutcome {
    pub fn is_schema_valid(&self) -> bool {
        !self.report.has_error_code("SCHEMA") && !self.report.has_error_code("LOAD")
    }
}

/// Upgrades a raw document and validates the result. Documents that cannot
/// be loaded at all cannot be fixed.
pub fn fix_document(
    document: &JsonValue,
    config: &ValidatorConfig,
) -> Result<FixOutcome, DialogueError> {
    let suggestions = suggest_fixes(document, &config.expected_schema_version);
    let graph = load_graph_from_value(document)?;
    let fixed = graph_to_value(&upgrade(&graph))?;
    let report = validate_document(&fixed, config);
    log::debug!(
        "upgraded document re-validated with {} error(s)",
        report.errors.len()
    );

    Ok(FixOutcome {
        suggestions,
        document: fixed,
        report,
    })
}
