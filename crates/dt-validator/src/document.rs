//! Checks that need the raw JSON rather than the typed graph: whether an
//! optional key was written at all, and the declared schema version.

use serde_json::Value as JsonValue;

use crate::report::ValidationReport;

pub(crate) fn check_missing_fields(document: &JsonValue, report: &mut ValidationReport) {
    if document.get("schema_version").is_none() {
        report.warning(
            "MISSING_FIELD",
            "Missing 'schema_version' field at the root level",
        );
    }
    if document.get("metadata").is_none() {
        report.warning("MISSING_FIELD", "Missing 'metadata' object at the root level");
    }

    for dialogue in array_at(document, "dialogues") {
        let dialogue_id = id_of(dialogue);
        if dialogue.get("on_entry").is_none() {
            report.warning(
                "MISSING_FIELD",
                format!("Dialogue '{}' is missing 'on_entry' field", dialogue_id),
            );
        }
        for response in array_at(dialogue, "responses") {
            for key in ["script", "condition"] {
                if response.get(key).is_none() {
                    report.warning(
                        "MISSING_FIELD",
                        format!(
                            "Response '{}' in dialogue '{}' is missing '{}' field",
                            id_of(response),
                            dialogue_id,
                            key
                        ),
                    );
                }
            }
        }
    }

    if document.get("variables").is_none() {
        report.warning("MISSING_FIELD", "Missing 'variables' object at the root level");
    }

    for quest in array_at(document, "quests") {
        let quest_id = id_of(quest);
        if quest.get("rewards").is_none() {
            report.warning(
                "MISSING_FIELD",
                format!("Quest '{}' is missing 'rewards' object", quest_id),
            );
        }
        for stage in array_at(quest, "stages") {
            if stage.get("on_complete").is_none() {
                report.warning(
                    "MISSING_FIELD",
                    format!(
                        "Stage {} in quest '{}' is missing 'on_complete' field",
                        id_of(stage),
                        quest_id
                    ),
                );
            }
        }
    }

    let uses_images = array_at(document, "dialogues")
        .iter()
        .any(|dialogue| dialogue.get("image_url").is_some());
    if uses_images && document.get("characters").is_none() {
        report.warning(
            "MISSING_FIELD",
            "Dialogues use 'image_url' but there's no 'characters' section defined",
        );
    }
}

pub(crate) fn check_schema_version(
    document: &JsonValue,
    expected: &str,
    report: &mut ValidationReport,
) {
    let Some(version) = document.get("schema_version").and_then(JsonValue::as_str) else {
        return;
    };
    if version != expected {
        report.warning(
            "SCHEMA_VERSION_MISMATCH",
            format!(
                "Schema version '{}' differs from the expected version '{}'",
                version, expected
            ),
        );
    }
}

/// Human-readable fixes for the gaps [`check_missing_fields`] reports.
pub fn suggest_fixes(document: &JsonValue, expected_version: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    if document.get("schema_version").is_none() {
        suggestions.push(format!("Add schema_version: \"{}\"", expected_version));
    }
    if document.get("metadata").is_none() {
        suggestions.push(
            "Add a metadata object with title, author, creation_date, and description".to_string(),
        );
    }

    for dialogue in array_at(document, "dialogues") {
        let dialogue_id = id_of(dialogue);
        for response in array_at(dialogue, "responses") {
            for key in ["script", "condition"] {
                if response.get(key).is_none() {
                    suggestions.push(format!(
                        "Add \"{}\": null to response {} in dialogue {}",
                        key,
                        id_of(response),
                        dialogue_id
                    ));
                }
            }
        }
        if array_at(dialogue, "responses").is_empty() {
            suggestions.push(format!(
                "Add an ending response to dialogue {} (e.g. \"> [End Conversation]\")",
                dialogue_id
            ));
        }
    }
    for dialogue in array_at(document, "dialogues") {
        if dialogue.get("on_entry").is_none() {
            suggestions.push(format!(
                "Add \"on_entry\": null to dialogue {}",
                id_of(dialogue)
            ));
        }
    }

    if document.get("variables").is_none() {
        suggestions
            .push("Add a variables object to track global state (can be empty: {})".to_string());
    }

    for quest in array_at(document, "quests") {
        let quest_id = id_of(quest);
        if quest.get("rewards").is_none() {
            suggestions.push(format!("Add a rewards object to quest {}", quest_id));
        }
        for stage in array_at(quest, "stages") {
            if stage.get("on_complete").is_none() {
                suggestions.push(format!(
                    "Add \"on_complete\": null to stage {} in quest {}",
                    id_of(stage),
                    quest_id
                ));
            }
        }
    }

    suggestions
}

fn array_at<'a>(value: &'a JsonValue, key: &str) -> &'a [JsonValue] {
    value
        .get(key)
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn id_of(value: &JsonValue) -> String {
    match value.get("id") {
        Some(JsonValue::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => "<no id>".to_string(),
    }
}
