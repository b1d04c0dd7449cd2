use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{DtToolError, TestCase, TESTCASE_SCHEMA_V1};

const DIALOGUE_FILE: &str = "dialogue.json";
const TESTCASE_FILE: &str = "testcase.json";

/// A demo directory that carries a golden playthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCase {
    pub name: String,
    pub dir: PathBuf,
    pub case_path: PathBuf,
}

pub fn read_dialogue_json(demo_dir: &Path) -> Result<String, DtToolError> {
    let path = demo_dir.join(DIALOGUE_FILE);
    fs::read_to_string(&path).map_err(|source| DtToolError::ReadFile { path, source })
}

pub fn read_test_case(case_path: &Path) -> Result<TestCase, DtToolError> {
    let raw = fs::read_to_string(case_path).map_err(|source| DtToolError::ReadFile {
        path: case_path.to_path_buf(),
        source,
    })?;
    let parsed: TestCase = serde_json::from_str(&raw).map_err(|source| DtToolError::ParseCase {
        path: case_path.to_path_buf(),
        source,
    })?;

    if parsed.schema_version != TESTCASE_SCHEMA_V1 {
        return Err(DtToolError::InvalidSchemaVersion {
            expected: TESTCASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}

/// Every `<root>/<name>/testcase.json`, ordered by demo name.
pub fn discover_cases(root: &Path) -> Result<Vec<DemoCase>, DtToolError> {
    let mut cases = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DtToolError::Scan {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || entry.file_name() != TESTCASE_FILE {
            continue;
        }
        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        cases.push(DemoCase {
            name,
            dir: dir.to_path_buf(),
            case_path: entry.path().to_path_buf(),
        });
    }

    Ok(cases)
}

#[cfg(test)]
mod source_tests {
    use super::*;

    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("dt-tool-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("path should have parent");
        fs::create_dir_all(parent).expect("parent dir should be created");
        fs::write(path, content).expect("file should be written");
    }

    #[test]
    fn discover_cases_finds_demo_testcases_in_name_order() {
        let root = temp_dir("discover");
        write_file(&root.join("b-second").join(TESTCASE_FILE), "{}");
        write_file(&root.join("a-first").join(TESTCASE_FILE), "{}");
        write_file(&root.join("c-no-case").join(DIALOGUE_FILE), "{}");
        write_file(&root.join("stray.json"), "{}");

        let cases = discover_cases(&root).expect("scan should pass");
        let names = cases.iter().map(|case| case.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a-first", "b-second"]);
        assert!(cases[0].case_path.ends_with("a-first/testcase.json"));
    }

    #[test]
    fn discover_cases_reports_missing_root() {
        let error = discover_cases(&temp_dir("missing-root")).expect_err("missing root should fail");
        assert!(matches!(error, DtToolError::Scan { .. }));
    }

    #[test]
    fn read_dialogue_json_reports_missing_file() {
        let root = temp_dir("no-dialogue");
        fs::create_dir_all(&root).expect("root should be created");
        let error = read_dialogue_json(&root).expect_err("missing dialogue should fail");
        assert!(matches!(error, DtToolError::ReadFile { .. }));
    }

    #[test]
    fn read_test_case_parses_valid_json() {
        let root = temp_dir("case-ok");
        let case_path = root.join(TESTCASE_FILE);
        write_file(
            &case_path,
            r#"{
  "schemaVersion":"dt-tool-case.v1",
  "actions":[{"kind":"select","responseId":"say_bye"}],
  "expectedEvents":[{"kind":"end"}]
}"#,
        );

        let parsed = read_test_case(&case_path).expect("case should parse");
        assert_eq!(parsed.schema_version, TESTCASE_SCHEMA_V1);
        assert_eq!(parsed.actions.len(), 1);
        assert_eq!(parsed.expected_events.len(), 1);
    }

    #[test]
    fn read_test_case_reports_read_parse_and_schema_errors() {
        let root = temp_dir("case-errors");
        fs::create_dir_all(&root).expect("root should be created");

        let missing = read_test_case(&root.join("missing.json")).expect_err("missing should fail");
        assert!(matches!(missing, DtToolError::ReadFile { .. }));

        let bad_json_path = root.join("bad.json");
        write_file(&bad_json_path, "{");
        let parse_error = read_test_case(&bad_json_path).expect_err("parse should fail");
        assert!(matches!(parse_error, DtToolError::ParseCase { .. }));

        let bad_schema_path = root.join("bad-schema.json");
        write_file(&bad_schema_path, r#"{"schemaVersion":"v0"}"#);
        let schema_error = read_test_case(&bad_schema_path).expect_err("schema should fail");
        assert!(matches!(
            schema_error,
            DtToolError::InvalidSchemaVersion { .. }
        ));
    }
}
