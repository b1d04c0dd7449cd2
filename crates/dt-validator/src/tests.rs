use super::*;
use dt_loader::{load_graph_from_str, serialize_graph};
use serde_json::json;

fn config() -> ValidatorConfig {
    ValidatorConfig::bundled().expect("bundled config should load")
}

fn clean_document() -> JsonValue {
    json!({
        "schema_version": "1.0",
        "metadata": {"title": "Vault", "author": "a", "creation_date": "2025-01-01", "description": "d"},
        "starting_dialogue": "guard_intro",
        "dialogues": [
            {"id": "guard_intro", "npc": "Guard", "text": "Halt.", "on_entry": "StartQuest_open_vault",
             "responses": [
                {"id": "ask_in", "text": "> Let me in", "next_dialogue": "guard_outro",
                 "script": "CompleteQuest_open_vault", "condition": null}
             ]},
            {"id": "guard_outro", "npc": "Guard", "text": "Go.", "on_entry": null,
             "responses": [
                {"id": "say_bye", "text": "> Bye", "next_dialogue": null, "script": null,
                 "condition": "QuestCompleted_open_vault"}
             ]}
        ],
        "quests": [
            {"id": "open_vault", "title": "Open", "description": "d",
             "stages": [{"id": 1, "description": "d", "journal_entry": "j", "on_complete": null}],
             "rewards": {"xp": 5, "items": []}}
        ],
        "variables": {}
    })
}

#[test]
fn clean_document_has_no_findings() {
    let report = validate_document(&clean_document(), &config());
    assert_eq!(report, ValidationReport::default());
}

#[test]
fn unloadable_document_gets_schema_and_load_errors_only() {
    let document = json!({
        "starting_dialogue": "guard_intro",
        "dialogues": [{"id": "guard_intro", "npc": "G", "text": "t", "responses": [
            {"id": "say_bye", "text": "> Bye"}
        ]}]
    });
    let report = validate_document(&document, &config());
    assert!(report.has_error_code("SCHEMA"));
    assert!(report.has_error_code("LOAD"));
    assert!(!report.has_warning_code("UNREACHABLE_NODE"));
}

#[test]
fn duplicate_ids_surface_as_load_error() {
    let mut document = clean_document();
    let copy = document["dialogues"][1].clone();
    document["dialogues"]
        .as_array_mut()
        .expect("dialogues array")
        .push(copy);
    let report = validate_document(&document, &config());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("LOAD_DUPLICATE_NODE_ID"));
}

#[test]
fn broken_graph_reports_every_category() {
    let graph = load_graph_from_str(
        r#"{
            "starting_dialogue": "Start",
            "dialogues": [
                {"id": "Start", "npc": "n", "text": "t", "on_entry": "StartQuest_q",
                 "responses": [
                    {"id": "a", "text": "no marker", "next_dialogue": "loop_node"},
                    {"id": "lost_way", "text": "> Lost", "next_dialogue": "missing_node",
                     "condition": "HasItem_key"}
                 ]},
                {"id": "loop_node", "npc": "n", "text": "t",
                 "responses": [{"id": "again", "text": "> Again", "next_dialogue": "loop_node",
                                "script": "UpdateQuest_q_7"}]},
                {"id": "island_node", "npc": "n", "text": "t", "responses": []}
            ],
            "quests": [
                {"id": "q", "title": "t", "description": "d",
                 "stages": [{"id": 2, "description": "d", "journal_entry": "j"}]}
            ]
        }"#,
    )
    .expect("graph should load");
    let report = validate(&graph);

    for code in ["DANGLING_REFERENCE", "QUEST_STAGE_MISSING"] {
        assert!(report.has_error_code(code), "missing error {}", code);
    }
    for code in [
        "UNREACHABLE_NODE",
        "CYCLE",
        "CONDITION_UNKNOWN",
        "QUEST_STAGE_SEQUENCE",
        "NAMING_NODE_ID",
        "NAMING_RESPONSE_ID",
        "NAMING_QUEST_ID",
        "RESPONSE_PREFIX",
    ] {
        assert!(report.has_warning_code(code), "missing warning {}", code);
    }
    assert!(report
        .warnings
        .iter()
        .any(|w| w.message.ends_with("loop_node -> loop_node")));
}

#[test]
fn upgraded_graph_round_trips_and_stays_upgraded() {
    let graph = load_graph_from_str(
        r#"{"starting_dialogue": "guard_intro", "dialogues": [
            {"id": "guard_intro", "npc": "G", "text": "t", "responses": []}
        ]}"#,
    )
    .expect("graph should load");
    let upgraded = upgrade(&graph);
    let text = serialize_graph(&upgraded).expect("graph should serialize");
    let reloaded = load_graph_from_str(&text).expect("upgraded graph should load");
    assert_eq!(reloaded, upgraded);
    assert_eq!(upgrade(&reloaded), reloaded);

    let document: JsonValue = serde_json::from_str(&text).expect("json");
    let report = validate_document(&document, &config());
    assert!(report.is_valid());
    assert!(!report.has_warning_code("MISSING_FIELD"));
}
