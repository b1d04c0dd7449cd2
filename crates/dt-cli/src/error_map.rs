use std::fmt::Display;
use std::path::Path;

use dt_core::DialogueError;
use serde_json::Value as JsonValue;

/// What the CLI was doing when an io or serde error surfaced. Each kind owns
/// one `CLI_*` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliFailure {
    SourcePath,
    SourceRead,
    StateRead,
    StateWrite,
    StateInvalid,
    OutputWrite,
    OutputSerialize,
}

impl CliFailure {
    pub(crate) fn code(self) -> &'static str {
        match self {
            Self::SourcePath => "CLI_SOURCE_PATH",
            Self::SourceRead => "CLI_SOURCE_READ",
            Self::StateRead => "CLI_STATE_READ",
            Self::StateWrite => "CLI_STATE_WRITE",
            Self::StateInvalid => "CLI_STATE_INVALID",
            Self::OutputWrite => "CLI_OUTPUT_WRITE",
            Self::OutputSerialize => "CLI_OUTPUT_SERIALIZE",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::SourcePath => "resolve dialogue path",
            Self::SourceRead => "read dialogue",
            Self::StateRead => "read player state",
            Self::StateWrite => "write player state",
            Self::StateInvalid => "decode player state",
            Self::OutputWrite => "write",
            Self::OutputSerialize => "encode output",
        }
    }

    /// Error for a failure tied to a file.
    pub(crate) fn at(self, path: &Path, error: impl Display) -> DialogueError {
        DialogueError::new(
            self.code(),
            format!("Failed to {} {}: {}", self.action(), path.display(), error),
        )
    }

    pub(crate) fn wrap(self, error: impl Display) -> DialogueError {
        DialogueError::new(self.code(), format!("Failed to {}: {}", self.action(), error))
    }
}

pub(crate) fn render_error(error: &DialogueError) -> Vec<String> {
    let message = JsonValue::String(error.message.clone());
    vec![
        "RESULT:ERROR".to_string(),
        format!("ERROR_CODE:{}", error.code),
        format!("ERROR_MSG_JSON:{}", message),
    ]
}

pub(crate) fn emit_error(error: DialogueError) -> i32 {
    log::debug!("command failed: {}", error);
    for line in render_error(&error) {
        println!("{}", line);
    }
    1
}
