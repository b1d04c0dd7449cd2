//! A declarative subset of JSON Schema.
//!
//! Supported keywords: `type` (single or list), `required`, `properties`,
//! `additionalProperties`, `items`, `enum`, `minimum`, `maximum`,
//! `minItems`, `minLength`, `maxLength`, `pattern`. The annotations `$schema`,
//! `$id`, `$comment`, `title`, `description` and `default` are accepted and
//! ignored. Any other keyword makes the schema invalid, so a document is
//! never reported valid against a constraint that was not checked.
//!
//! Unlike a first-error validator, [`Schema::check`] walks the whole
//! document and reports every violation with its path.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dt_core::DialogueError;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::report::ValidationReport;

const BUNDLED_SCHEMA: &str = include_str!("../schema/dialogue.schema.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    One(String),
    Many(Vec<String>),
}

impl TypeSpec {
    fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// `additionalProperties`: a flag, or a schema every extra property must meet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A `pattern` compiled once at schema load. Matching is unanchored.
#[derive(Debug, Clone)]
pub struct SchemaPattern(Regex);

impl SchemaPattern {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for SchemaPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<'de> Deserialize<'de> for SchemaPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Regex::new(&source).map(Self).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default, rename = "type")]
    pub kind: Option<TypeSpec>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(default)]
    pub items: Option<Box<Schema>>,
    #[serde(default, rename = "enum")]
    pub allowed: Option<Vec<JsonValue>>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default, rename = "minItems")]
    pub min_items: Option<usize>,
    #[serde(default, rename = "minLength")]
    pub min_length: Option<usize>,
    #[serde(default, rename = "maxLength")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<SchemaPattern>,

    #[serde(default, rename = "$schema")]
    pub dialect: Option<String>,
    #[serde(default, rename = "$id")]
    pub id: Option<String>,
    #[serde(default, rename = "$comment")]
    pub comment: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<JsonValue>,
}

impl Schema {
    pub fn bundled() -> Result<Self, DialogueError> {
        Self::parse_str(BUNDLED_SCHEMA)
    }

    pub fn parse_str(source: &str) -> Result<Self, DialogueError> {
        serde_json::from_str(source).map_err(|error| {
            DialogueError::new(
                "VALIDATOR_SCHEMA_INVALID",
                format!(
                    "Schema is not valid or uses an unsupported keyword: {}",
                    error
                ),
            )
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, DialogueError> {
        let source = fs::read_to_string(path).map_err(|error| {
            DialogueError::new(
                "VALIDATOR_SCHEMA_READ",
                format!("Failed to read schema {}: {}", path.display(), error),
            )
        })?;
        Self::parse_str(&source)
    }

    /// Collects every violation of `value` as a `SCHEMA` error.
    pub fn check(&self, value: &JsonValue) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_at(value, "", &mut report);
        report
    }

    fn check_at(&self, value: &JsonValue, path: &str, report: &mut ValidationReport) {
        if let Some(kind) = &self.kind {
            let names = kind.names();
            if !names.iter().any(|name| matches_type(value, name)) {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: expected {}, found {}",
                        display_path(path),
                        names.join(" or "),
                        type_of(value)
                    ),
                );
                return;
            }
        }

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(value) {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: {} is not one of the allowed values",
                        display_path(path),
                        value
                    ),
                );
            }
        }

        if let (Some(minimum), Some(number)) = (self.minimum, value.as_f64()) {
            if number < minimum {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: {} is less than the minimum of {}",
                        display_path(path),
                        value,
                        minimum
                    ),
                );
            }
        }

        if let (Some(maximum), Some(number)) = (self.maximum, value.as_f64()) {
            if number > maximum {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: {} is greater than the maximum of {}",
                        display_path(path),
                        value,
                        maximum
                    ),
                );
            }
        }

        match value {
            JsonValue::String(text) => self.check_string(text, path, report),
            JsonValue::Object(object) => {
                for key in &self.required {
                    if !object.contains_key(key) {
                        report.error(
                            "SCHEMA",
                            format!(
                                "Schema error at {}: '{}' is a required property",
                                display_path(path),
                                key
                            ),
                        );
                    }
                }
                for (key, child) in object {
                    let child_path = join_key(path, key);
                    if let Some(schema) = self.properties.get(key) {
                        schema.check_at(child, &child_path, report);
                        continue;
                    }
                    match &self.additional_properties {
                        Some(AdditionalProperties::Allowed(false)) => report.error(
                            "SCHEMA",
                            format!(
                                "Schema error at {}: additional property '{}' is not allowed",
                                display_path(path),
                                key
                            ),
                        ),
                        Some(AdditionalProperties::Schema(schema)) => {
                            schema.check_at(child, &child_path, report)
                        }
                        Some(AdditionalProperties::Allowed(true)) | None => {}
                    }
                }
            }
            JsonValue::Array(items) => {
                if let Some(min_items) = self.min_items {
                    if items.len() < min_items {
                        report.error(
                            "SCHEMA",
                            format!(
                                "Schema error at {}: expected at least {} item(s), found {}",
                                display_path(path),
                                min_items,
                                items.len()
                            ),
                        );
                    }
                }
                if let Some(schema) = &self.items {
                    for (index, item) in items.iter().enumerate() {
                        schema.check_at(item, &format!("{}[{}]", path, index), report);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_string(&self, text: &str, path: &str, report: &mut ValidationReport) {
        let length = text.chars().count();
        if let Some(min_length) = self.min_length {
            if length < min_length {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: expected at least {} character(s), found {}",
                        display_path(path),
                        min_length,
                        length
                    ),
                );
            }
        }
        if let Some(max_length) = self.max_length {
            if length > max_length {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: expected at most {} character(s), found {}",
                        display_path(path),
                        max_length,
                        length
                    ),
                );
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                report.error(
                    "SCHEMA",
                    format!(
                        "Schema error at {}: {:?} does not match pattern {:?}",
                        display_path(path),
                        text,
                        pattern.as_str()
                    ),
                );
            }
        }
    }
}

fn matches_type(value: &JsonValue, name: &str) -> bool {
    match name {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => false,
    }
}

fn type_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(number) if number.is_f64() => "number",
        JsonValue::Number(_) => "integer",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}
