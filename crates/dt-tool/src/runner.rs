use std::path::Path;

use dt_api::create_engine_from_json;
use dt_runtime::DialogueEngine;

use crate::source::{read_dialogue_json, read_test_case};
use crate::{DtToolError, ExpectedEvent, TestCase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub observed_events: Vec<ExpectedEvent>,
    pub consumed_actions: usize,
}

/// Plays `case` against the demo's dialogue and records what the player
/// would see after the start and after every selection.
pub fn run_case(demo_dir: &Path, case: &TestCase) -> Result<RunReport, DtToolError> {
    let dialogue_json = read_dialogue_json(demo_dir)?;
    let mut engine = create_engine_from_json(&dialogue_json)?;

    let mut observed_events = Vec::new();
    let mut seen_history = 0usize;
    let mut action_index = 0usize;

    loop {
        seen_history = record_progress(&mut engine, seen_history, &mut observed_events);

        let available = engine
            .available_responses()
            .into_iter()
            .map(|response| response.id.clone())
            .collect::<Vec<_>>();
        if available.is_empty() {
            observed_events.push(ExpectedEvent::End);
            break;
        }

        observed_events.push(ExpectedEvent::Responses {
            response_ids: available.clone(),
        });
        let event_index = observed_events.len() - 1;
        let action = case
            .actions
            .get(action_index)
            .ok_or(DtToolError::MissingAction {
                event_index,
                available,
            })?;
        engine.select_response(action.response_id())?;
        action_index += 1;
    }

    if action_index != case.actions.len() {
        return Err(DtToolError::UnusedActions {
            used: action_index,
            total: case.actions.len(),
        });
    }

    Ok(RunReport {
        observed_events,
        consumed_actions: action_index,
    })
}

fn record_progress(
    engine: &mut DialogueEngine,
    seen_history: usize,
    observed_events: &mut Vec<ExpectedEvent>,
) -> usize {
    let history = engine.history();
    for entry in &history[seen_history..] {
        observed_events.push(ExpectedEvent::Line {
            speaker: entry.speaker.clone(),
            text: entry.text.clone(),
        });
    }
    let seen = history.len();
    observed_events.extend(
        engine
            .take_quest_events()
            .into_iter()
            .map(|event| ExpectedEvent::Quest { event }),
    );
    seen
}

pub fn assert_case(demo_dir: &Path, case_path: &Path) -> Result<(), DtToolError> {
    let case = read_test_case(case_path)?;
    let report = run_case(demo_dir, &case)?;

    if report.observed_events.len() != case.expected_events.len() {
        let observed = serde_json::to_string_pretty(&report.observed_events)
            .map_err(DtToolError::EventSerialize)?;
        return Err(DtToolError::EventCountMismatch {
            expected: case.expected_events.len(),
            actual: report.observed_events.len(),
            observed,
        });
    }

    for (index, (expected, actual)) in case
        .expected_events
        .iter()
        .zip(report.observed_events.iter())
        .enumerate()
    {
        if expected != actual {
            let expected = serde_json::to_string(expected).map_err(DtToolError::EventSerialize)?;
            let actual = serde_json::to_string(actual).map_err(DtToolError::EventSerialize)?;
            return Err(DtToolError::EventMismatch {
                index,
                expected,
                actual,
            });
        }
    }

    Ok(())
}
