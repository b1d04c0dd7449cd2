mod config;
mod conventions;
mod directory;
mod document;
mod graph;
mod quests;
mod report;
mod schema;
mod upgrade;

use dt_core::DialogueGraph;
use dt_loader::load_graph_from_value;
use serde_json::Value as JsonValue;

pub use config::{ValidatorConfig, DEFAULT_PATTERN};
pub use conventions::{
    is_conventional_node_id, is_conventional_quest_id, is_conventional_response_id,
    is_player_line,
};
pub use directory::{glob_to_regex, read_document, validate_directory, validate_file};
pub use document::suggest_fixes;
pub use graph::{collect_reachable_nodes, find_cycles};
pub use report::{Diagnostic, FileReport, ValidationReport, ValidationSummary};
pub use schema::{AdditionalProperties, Schema, SchemaPattern, TypeSpec};
pub use upgrade::{fix_document, upgrade, FixOutcome, END_RESPONSE_TEXT};

/// Runs every graph-level check. Never fails; all findings are collected.
pub fn validate(graph: &DialogueGraph) -> ValidationReport {
    let mut report = ValidationReport::default();
    graph::check_references(graph, &mut report);
    graph::check_reachability(graph, &mut report);
    graph::check_cycles(graph, &mut report);
    quests::check_script_references(graph, &mut report);
    quests::check_conditions(graph, &mut report);
    quests::check_unused_quests(graph, &mut report);
    quests::check_stage_sequence(graph, &mut report);
    conventions::check_naming(graph, &mut report);
    conventions::check_response_prefix(graph, &mut report);
    report
}

/// Schema conformance and document-level checks, then [`validate`] on the
/// loaded graph. A document that cannot be loaded gets one `LOAD` error and
/// no graph checks.
pub fn validate_document(document: &JsonValue, config: &ValidatorConfig) -> ValidationReport {
    let mut report = config.schema.check(document);
    document::check_missing_fields(document, &mut report);
    document::check_schema_version(document, &config.expected_schema_version, &mut report);

    match load_graph_from_value(document) {
        Ok(graph) => report.merge(validate(&graph)),
        Err(error) => report.error("LOAD", error.to_string()),
    }
    report
}

#[cfg(test)]
mod tests;
