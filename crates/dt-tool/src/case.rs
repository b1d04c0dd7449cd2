use dt_core::QuestEvent;
use serde::{Deserialize, Serialize};

pub const TESTCASE_SCHEMA_V1: &str = "dt-tool-case.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub schema_version: String,
    #[serde(default)]
    pub actions: Vec<TestAction>,
    #[serde(default)]
    pub expected_events: Vec<ExpectedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TestAction {
    Select {
        #[serde(rename = "responseId")]
        response_id: String,
    },
}

impl TestAction {
    pub fn response_id(&self) -> &str {
        match self {
            Self::Select { response_id } => response_id,
        }
    }
}

/// One observable step of a playthrough, in the order the engine produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExpectedEvent {
    Line {
        speaker: String,
        text: String,
    },
    Quest {
        event: QuestEvent,
    },
    Responses {
        #[serde(rename = "responseIds")]
        response_ids: Vec<String>,
    },
    End,
}

#[cfg(test)]
mod case_tests {
    use super::*;

    #[test]
    fn test_action_exposes_response_id() {
        let action = TestAction::Select {
            response_id: "say_bye".to_string(),
        };
        assert_eq!(action.response_id(), "say_bye");
    }

    #[test]
    fn testcase_deserialize_applies_defaults() {
        let parsed: TestCase = serde_json::from_str(r#"{"schemaVersion": "dt-tool-case.v1"}"#)
            .expect("testcase should deserialize");

        assert_eq!(parsed.schema_version, TESTCASE_SCHEMA_V1);
        assert!(parsed.actions.is_empty());
        assert!(parsed.expected_events.is_empty());
    }

    #[test]
    fn expected_event_deserialize_supports_all_variants() {
        let parsed: Vec<ExpectedEvent> = serde_json::from_str(
            r#"[
  {"kind":"line","speaker":"Guard","text":"Halt."},
  {"kind":"quest","event":{"kind":"started","questId":"find_key","title":"Find","journalEntry":null}},
  {"kind":"responses","responseIds":["say_hi"]},
  {"kind":"end"}
]"#,
        )
        .expect("events should deserialize");

        assert_eq!(parsed.len(), 4);
        assert!(matches!(parsed[0], ExpectedEvent::Line { .. }));
        assert!(matches!(
            &parsed[1],
            ExpectedEvent::Quest {
                event: QuestEvent::Started { quest_id, .. }
            } if quest_id == "find_key"
        ));
        assert!(matches!(parsed[2], ExpectedEvent::Responses { .. }));
        assert!(matches!(parsed[3], ExpectedEvent::End));
    }
}
