use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use dt_api::{create_engine_from_json, resume_engine_from_json, ResumeEngineFromJsonOptions};
use dt_core::DialogueError;
use dt_runtime::DialogueEngine;

use crate::{
    emit_boundary, load_dialogue_source, BoundaryEvent, BoundaryResult, CliFailure,
    LoadedDialogue, PlayerState,
};

pub(crate) fn create_engine_for_dialogue(
    dialogue: &LoadedDialogue,
) -> Result<DialogueEngine, DialogueError> {
    create_engine_from_json(&dialogue.dialogue_json)
}

pub(crate) fn save_engine_state(
    path: &Path,
    engine: &DialogueEngine,
    dialogue_path: &Path,
) -> Result<(), DialogueError> {
    write_player_state(path, &PlayerState::new(dialogue_path, engine.snapshot()))
}

fn write_player_state(path: &Path, state: &PlayerState) -> Result<(), DialogueError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| CliFailure::StateWrite.at(parent, error))?;
    }
    let payload = serde_json::to_string_pretty(state)
        .map_err(|error| CliFailure::StateInvalid.at(path, error))?;
    fs::write(path, payload).map_err(|error| CliFailure::StateWrite.at(path, error))
}

/// Reads a state file written by [`write_player_state`], rejecting other
/// schema versions.
pub(crate) fn read_player_state(path: &Path) -> Result<PlayerState, DialogueError> {
    let raw = fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => DialogueError::new(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ),
        _ => CliFailure::StateRead.at(path, error),
    })?;
    let state: PlayerState =
        serde_json::from_str(&raw).map_err(|error| CliFailure::StateInvalid.at(path, error))?;
    state.check_schema()?;
    Ok(state)
}

pub(crate) fn load_engine_from_state(
    path: &Path,
) -> Result<(LoadedDialogue, DialogueEngine), DialogueError> {
    let state = read_player_state(path)?;
    let dialogue = load_dialogue_source(&state.dialogue_path)?;
    let engine = resume_engine_from_json(ResumeEngineFromJsonOptions {
        dialogue_json: dialogue.dialogue_json.clone(),
        snapshot: state.snapshot,
    })?;
    log::debug!(
        "resumed {} at {}",
        dialogue.path.display(),
        engine.state().current_node_id
    );
    Ok((dialogue, engine))
}

/// Saves the state only while the conversation can continue.
pub(crate) fn emit_boundary_with_saved_state(
    engine: &DialogueEngine,
    boundary: BoundaryResult,
    state_out: &str,
    dialogue_path: &Path,
) -> Result<i32, DialogueError> {
    if boundary.event == BoundaryEvent::Responses {
        save_engine_state(Path::new(state_out), engine, dialogue_path)?;
        emit_boundary(&boundary, Some(state_out))?;
        return Ok(0);
    }

    emit_boundary(&boundary, None)?;
    Ok(0)
}
