use std::fs;
use std::path::PathBuf;

use dt_core::DialogueError;

use crate::{CliFailure, LoadedDialogue};

pub(crate) fn load_dialogue_source(dialogue: &str) -> Result<LoadedDialogue, DialogueError> {
    let path = resolve_dialogue_path(dialogue)?;
    let dialogue_json =
        fs::read_to_string(&path).map_err(|error| CliFailure::SourceRead.at(&path, error))?;
    log::debug!("loaded dialogue source {}", path.display());
    Ok(LoadedDialogue {
        path,
        dialogue_json,
    })
}

pub(crate) fn resolve_dialogue_path(dialogue: &str) -> Result<PathBuf, DialogueError> {
    let path = PathBuf::from(dialogue);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|error| CliFailure::SourcePath.at(&path, error))?
            .join(path)
    };

    if !absolute.exists() {
        return Err(DialogueError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("dialogue file does not exist: {}", absolute.display()),
        ));
    }
    if !absolute.is_file() {
        return Err(DialogueError::new(
            "CLI_SOURCE_NOT_FILE",
            format!("dialogue path is not a file: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}
