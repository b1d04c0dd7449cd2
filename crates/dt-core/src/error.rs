use thiserror::Error;

/// Error raised by loading, the engine, and the outer surfaces.
///
/// `code` is a stable machine-readable identifier whose prefix names the
/// layer that produced it: `LOAD_*` for documents that cannot become a
/// graph, `ENGINE_*` for runtime requests the engine refuses, `API_*` and
/// `CLI_*` for the outer surfaces.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct DialogueError {
    pub code: String,
    pub message: String,
}

impl DialogueError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_load_error(&self) -> bool {
        self.code.starts_with("LOAD_")
    }

    pub fn is_runtime_error(&self) -> bool {
        self.code.starts_with("ENGINE_")
    }

    pub fn is_dangling_reference(&self) -> bool {
        self.code == "ENGINE_DANGLING_REFERENCE"
    }
}
