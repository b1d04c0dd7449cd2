use dt_core::DialogueError;
use dt_runtime::DialogueEngine;
use serde::Serialize;

use crate::{BoundaryEvent, BoundaryResult, CliFailure, NodeView};

/// Collects everything that happened since `seen_history` lines were shown,
/// and what the player can do next.
pub(crate) fn run_to_boundary(engine: &mut DialogueEngine, seen_history: usize) -> BoundaryResult {
    let lines = engine
        .history()
        .get(seen_history..)
        .map(|lines| lines.to_vec())
        .unwrap_or_default();
    let quest_events = engine.take_quest_events();
    let quest_log = engine.active_quest_summaries();
    let responses = engine
        .available_responses()
        .into_iter()
        .map(|response| (response.id.clone(), response.text.clone()))
        .collect::<Vec<_>>();

    if responses.is_empty() {
        return BoundaryResult {
            event: BoundaryEvent::End,
            node: None,
            lines,
            quest_events,
            quest_log,
            responses,
        };
    }

    let node = engine.current_node().map(|node| NodeView {
        id: node.id.clone(),
        speaker: node.speaker.clone(),
        text: node.text.clone(),
    });
    BoundaryResult {
        event: BoundaryEvent::Responses,
        node,
        lines,
        quest_events,
        quest_log,
        responses,
    }
}

fn to_json(value: &impl Serialize) -> Result<String, DialogueError> {
    serde_json::to_string(value).map_err(|error| CliFailure::OutputSerialize.wrap(error))
}

pub(crate) fn render_boundary(
    boundary: &BoundaryResult,
    state_out: Option<&str>,
) -> Result<Vec<String>, DialogueError> {
    let mut out = vec!["RESULT:OK".to_string()];
    out.push(match boundary.event {
        BoundaryEvent::Responses => "EVENT:RESPONSES".to_string(),
        BoundaryEvent::End => "EVENT:END".to_string(),
    });

    if let Some(node) = &boundary.node {
        out.push(format!("NODE_JSON:{}", to_json(node)?));
    }
    for line in &boundary.lines {
        out.push(format!("TEXT_JSON:{}", to_json(line)?));
    }
    for event in &boundary.quest_events {
        out.push(format!("QUEST_JSON:{}", to_json(event)?));
    }
    for summary in &boundary.quest_log {
        out.push(format!("QUEST_LOG_JSON:{}", to_json(summary)?));
    }
    for (id, text) in &boundary.responses {
        out.push(format!("RESPONSE:{}|{}", id, to_json(text)?));
    }
    out.push(format!("STATE_OUT:{}", state_out.unwrap_or("NONE")));
    Ok(out)
}

pub(crate) fn emit_boundary(
    boundary: &BoundaryResult,
    state_out: Option<&str>,
) -> Result<(), DialogueError> {
    for line in render_boundary(boundary, state_out)? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod boundary_runner_tests {
    use super::*;
    use dt_api::create_engine_from_json;

    const SHORT: &str = r#"{
        "starting_dialogue": "guard_intro",
        "dialogues": [
            {"id": "guard_intro", "npc": "Guard", "text": "Halt.", "on_entry": "StartQuest_find_key",
             "responses": [{"id": "say_bye", "text": "> Bye", "next_dialogue": null}]}
        ],
        "quests": [{"id": "find_key", "title": "Find the key", "description": "d",
                    "stages": [{"id": 1, "description": "d", "journal_entry": "Look around."}]}]
    }"#;

    #[test]
    fn boundary_renders_node_lines_quests_and_responses() {
        let mut engine = create_engine_from_json(SHORT).expect("engine should build");
        let boundary = run_to_boundary(&mut engine, 0);
        assert_eq!(boundary.event, BoundaryEvent::Responses);

        let lines = render_boundary(&boundary, Some("/tmp/state.json")).expect("render");
        assert_eq!(lines[0], "RESULT:OK");
        assert_eq!(lines[1], "EVENT:RESPONSES");
        assert_eq!(
            lines[2],
            r#"NODE_JSON:{"id":"guard_intro","speaker":"Guard","text":"Halt."}"#
        );
        assert!(lines[3].starts_with("TEXT_JSON:") && lines[3].contains("\"Halt.\""));
        assert!(lines[4].starts_with("QUEST_JSON:") && lines[4].contains("\"started\""));
        assert!(lines[5].starts_with("QUEST_LOG_JSON:") && lines[5].contains("Look around."));
        assert_eq!(lines[6], r#"RESPONSE:say_bye|"> Bye""#);
        assert_eq!(lines[7], "STATE_OUT:/tmp/state.json");
    }

    #[test]
    fn boundary_after_last_response_is_end_without_node() {
        let mut engine = create_engine_from_json(SHORT).expect("engine should build");
        let _ = engine.take_quest_events();
        let seen = engine.history().len();
        engine.select_response("say_bye").expect("select should pass");

        let boundary = run_to_boundary(&mut engine, seen);
        assert_eq!(boundary.event, BoundaryEvent::End);
        assert!(boundary.node.is_none());
        assert_eq!(boundary.lines.len(), 1);
        assert!(boundary.lines[0].is_player);

        let lines = render_boundary(&boundary, None).expect("render");
        assert_eq!(lines[1], "EVENT:END");
        assert_eq!(lines.last().map(String::as_str), Some("STATE_OUT:NONE"));
    }
}
