use std::path::Path;

use dt_core::DialogueError;
use dt_loader::DEFAULT_SCHEMA_VERSION;

use crate::schema::Schema;

pub const DEFAULT_PATTERN: &str = "*.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub expected_schema_version: String,
    pub schema: Schema,
    /// Glob over file names used by directory validation.
    pub pattern: String,
}

impl ValidatorConfig {
    pub fn new(schema: Schema) -> Self {
        Self {
            expected_schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            schema,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    pub fn bundled() -> Result<Self, DialogueError> {
        Ok(Self::new(Schema::bundled()?))
    }

    /// Uses the schema at `path`, or the bundled one when `None`.
    pub fn load(schema_path: Option<&Path>) -> Result<Self, DialogueError> {
        match schema_path {
            Some(path) => Ok(Self::new(Schema::from_file(path)?)),
            None => Self::bundled(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_expected_schema_version(mut self, version: impl Into<String>) -> Self {
        self.expected_schema_version = version.into();
        self
    }
}
