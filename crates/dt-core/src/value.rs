use std::fmt;

use serde::{Deserialize, Serialize};

/// Value stored in a dialogue variable.
///
/// Documents may only carry booleans, integers and strings; anything else is
/// rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl VariableValue {
    /// Coerces a script argument the way `SetVariable` and `VariableEquals`
    /// read it: `true`/`false` in any case become booleans, a run of ASCII
    /// digits becomes an integer, everything else stays a string.
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(value) = raw.parse::<i64>() {
                return Self::Int(value);
            }
        }
        Self::String(raw.to_string())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::String(value) => f.write_str(value),
        }
    }
}
