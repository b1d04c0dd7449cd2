use std::fs;
use std::path::Path;

use dt_core::DialogueError;
use regex::Regex;
use serde_json::Value as JsonValue;
use walkdir::WalkDir;

use crate::config::ValidatorConfig;
use crate::report::{FileReport, ValidationReport};
use crate::validate_document;

pub fn read_document(path: &Path) -> Result<JsonValue, DialogueError> {
    let source = fs::read_to_string(path).map_err(|error| {
        DialogueError::new(
            "VALIDATOR_FILE_READ",
            format!("Failed to read {}: {}", path.display(), error),
        )
    })?;
    serde_json::from_str(&source).map_err(|error| {
        DialogueError::new(
            "LOAD_JSON_INVALID",
            format!("Invalid JSON in {}: {}", path.display(), error),
        )
    })
}

/// Validates one file. Read and parse failures become a single error.
pub fn validate_file(path: &Path, config: &ValidatorConfig) -> FileReport {
    log::info!("validating {}", path.display());
    let display = path.display().to_string();
    match read_document(path) {
        Ok(document) => FileReport::new(display, validate_document(&document, config)),
        Err(error) => {
            let mut report = ValidationReport::default();
            report.error(
                if error.is_load_error() { "JSON" } else { "IO" },
                error.message,
            );
            FileReport::new(display, report)
        }
    }
}

/// Validates every file directly inside `dir` whose name matches the
/// configured pattern, in path order.
pub fn validate_directory(
    dir: &Path,
    config: &ValidatorConfig,
) -> Result<Vec<FileReport>, DialogueError> {
    if !dir.is_dir() {
        return Err(DialogueError::new(
            "VALIDATOR_DIR_NOT_FOUND",
            format!("Not a directory: {}", dir.display()),
        ));
    }
    let pattern = glob_to_regex(&config.pattern)?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry = entry.map_err(|error| {
            DialogueError::new(
                "VALIDATOR_DIR_SCAN",
                format!("Failed to scan {}: {}", dir.display(), error),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| pattern.is_match(name));
        if matches {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    if paths.is_empty() {
        log::warn!(
            "no files matching pattern '{}' found in '{}'",
            config.pattern,
            dir.display()
        );
    } else {
        log::info!("found {} file(s) to validate", paths.len());
    }

    Ok(paths
        .iter()
        .map(|path| validate_file(path, config))
        .collect())
}

/// Translates a file-name glob (`*`, `?`) into an anchored regex.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, DialogueError> {
    let mut translated = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    Regex::new(&translated).map_err(|error| {
        DialogueError::new(
            "VALIDATOR_PATTERN_INVALID",
            format!("Invalid file pattern '{}': {}", pattern, error),
        )
    })
}

#[cfg(test)]
mod directory_tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("dt-validator-{}-{}", name, nanos));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        dir
    }

    const VALID: &str = r#"{
        "schema_version": "1.0",
        "starting_dialogue": "guard_intro",
        "dialogues": [{"id": "guard_intro", "npc": "G", "text": "t", "on_entry": null,
            "responses": [{"id": "say_bye", "text": "> Bye", "next_dialogue": null,
                           "script": null, "condition": null}]}],
        "variables": {}
    }"#;

    #[test]
    fn glob_translation_matches_file_names() {
        let regex = glob_to_regex("*.json").expect("pattern should compile");
        assert!(regex.is_match("intro.json"));
        assert!(!regex.is_match("intro.json.bak"));
        let regex = glob_to_regex("act?_*.json").expect("pattern should compile");
        assert!(regex.is_match("act1_intro.json"));
        assert!(!regex.is_match("act10_intro.json"));
    }

    #[test]
    fn directory_validation_reports_each_matching_file() {
        let dir = temp_dir("dir");
        fs::write(dir.join("a_valid.json"), VALID).expect("write valid");
        fs::write(dir.join("b_broken.json"), "{ nope").expect("write broken");
        fs::write(dir.join("notes.txt"), "ignored").expect("write notes");

        let config = ValidatorConfig::bundled().expect("bundled config");
        let reports = validate_directory(&dir, &config).expect("directory should validate");
        assert_eq!(reports.len(), 2);
        assert!(reports[0].path.ends_with("a_valid.json"));
        assert!(reports[0].is_valid());
        assert_eq!(reports[1].errors.len(), 1);
        assert_eq!(reports[1].errors[0].code, "JSON");

        let only_valid = config.with_pattern("a_*.json");
        let reports = validate_directory(&dir, &only_valid).expect("directory should validate");
        assert_eq!(reports.len(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_directory_and_file_are_reported() {
        let config = ValidatorConfig::bundled().expect("bundled config");
        let missing = std::env::temp_dir().join("dt-validator-definitely-missing-dir");
        let error = validate_directory(&missing, &config).expect_err("missing dir should fail");
        assert_eq!(error.code, "VALIDATOR_DIR_NOT_FOUND");

        let report = validate_file(&missing.join("x.json"), &config);
        assert_eq!(report.errors[0].code, "IO");
    }
}
