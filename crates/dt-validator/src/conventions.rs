use dt_core::DialogueGraph;

use crate::report::ValidationReport;

pub(crate) fn check_naming(graph: &DialogueGraph, report: &mut ValidationReport) {
    for node in graph.nodes() {
        if !is_conventional_node_id(&node.id) {
            report.warning(
                "NAMING_NODE_ID",
                format!(
                    "Dialogue ID '{}' doesn't follow the recommended naming convention",
                    node.id
                ),
            );
        }
        for response in &node.responses {
            if !is_conventional_response_id(&response.id) {
                report.warning(
                    "NAMING_RESPONSE_ID",
                    format!(
                        "Response ID '{}' in dialogue '{}' doesn't follow the recommended naming convention",
                        response.id, node.id
                    ),
                );
            }
        }
    }

    for quest in graph.quests() {
        if !is_conventional_quest_id(&quest.id) {
            report.warning(
                "NAMING_QUEST_ID",
                format!(
                    "Quest ID '{}' doesn't follow the recommended naming convention",
                    quest.id
                ),
            );
        }
    }
}

pub(crate) fn check_response_prefix(graph: &DialogueGraph, report: &mut ValidationReport) {
    for node in graph.nodes() {
        for response in &node.responses {
            if !is_player_line(&response.text) {
                report.warning(
                    "RESPONSE_PREFIX",
                    format!(
                        "Response '{}' in dialogue '{}' doesn't start with '> ' prefix",
                        response.id, node.id
                    ),
                );
            }
        }
    }
}

/// `character_purpose_state` style: lowercase, underscored, longer than 5.
pub fn is_conventional_node_id(id: &str) -> bool {
    id.contains('_') && id.chars().count() > 5 && is_lowercase(id)
}

pub fn is_conventional_response_id(id: &str) -> bool {
    id.contains('_') && id.chars().count() > 3 && is_lowercase(id)
}

pub fn is_conventional_quest_id(id: &str) -> bool {
    id.contains('_') || (id.chars().count() > 3 && is_lowercase(id))
}

pub fn is_player_line(text: &str) -> bool {
    text.starts_with("> ") || text.starts_with(">[")
}

// At least one cased character and none uppercase.
fn is_lowercase(id: &str) -> bool {
    id.chars().any(char::is_lowercase) && !id.chars().any(char::is_uppercase)
}
