//! The `Verb_arg_arg` mini-languages embedded in dialogue documents.
//!
//! Commands and conditions are parsed once, at load time, into closed sum
//! types. Parsing never fails: a recognised verb with unusable arguments
//! becomes `Malformed`, anything else becomes `Unknown`. `Display` renders
//! the canonical source string, so a parsed value survives a
//! serialize/parse round trip unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::VariableValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVerb {
    StartQuest,
    UpdateQuest,
    CompleteQuest,
    SetVariable,
}

impl CommandVerb {
    pub const ALL: [CommandVerb; 4] = [
        CommandVerb::StartQuest,
        CommandVerb::UpdateQuest,
        CommandVerb::CompleteQuest,
        CommandVerb::SetVariable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::StartQuest => "StartQuest",
            Self::UpdateQuest => "UpdateQuest",
            Self::CompleteQuest => "CompleteQuest",
            Self::SetVariable => "SetVariable",
        }
    }

    pub fn is_quest_verb(self) -> bool {
        !matches!(self, Self::SetVariable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionVerb {
    QuestActive,
    QuestCompleted,
    QuestStage,
    VariableEquals,
}

impl ConditionVerb {
    pub const ALL: [ConditionVerb; 4] = [
        ConditionVerb::QuestActive,
        ConditionVerb::QuestCompleted,
        ConditionVerb::QuestStage,
        ConditionVerb::VariableEquals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::QuestActive => "QuestActive",
            Self::QuestCompleted => "QuestCompleted",
            Self::QuestStage => "QuestStage",
            Self::VariableEquals => "VariableEquals",
        }
    }

    pub fn is_quest_verb(self) -> bool {
        !matches!(self, Self::VariableEquals)
    }
}

/// A mutating instruction attached to a node entry, a response or a quest
/// stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ScriptCommand {
    StartQuest { quest_id: String },
    UpdateQuest { quest_id: String, stage: i64 },
    CompleteQuest { quest_id: String },
    SetVariable { name: String, value: VariableValue },
    Malformed { verb: CommandVerb, raw: String },
    Unknown { raw: String },
}

impl ScriptCommand {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let Some((verb, args)) = match_verb(raw, &CommandVerb::ALL, |verb| verb.name()) else {
            return Self::Unknown {
                raw: raw.to_string(),
            };
        };
        let malformed = || Self::Malformed {
            verb,
            raw: raw.to_string(),
        };

        match verb {
            CommandVerb::StartQuest => single_id(args)
                .map(|quest_id| Self::StartQuest { quest_id })
                .unwrap_or_else(malformed),
            CommandVerb::CompleteQuest => single_id(args)
                .map(|quest_id| Self::CompleteQuest { quest_id })
                .unwrap_or_else(malformed),
            CommandVerb::UpdateQuest => id_and_stage(args)
                .map(|(quest_id, stage)| Self::UpdateQuest { quest_id, stage })
                .unwrap_or_else(malformed),
            CommandVerb::SetVariable => name_and_value(args)
                .map(|(name, value)| Self::SetVariable { name, value })
                .unwrap_or_else(malformed),
        }
    }

    /// Quest id named by a quest command, including malformed ones whose
    /// first positional argument is still readable.
    pub fn quest_id(&self) -> Option<&str> {
        match self {
            Self::StartQuest { quest_id }
            | Self::UpdateQuest { quest_id, .. }
            | Self::CompleteQuest { quest_id } => Some(quest_id.as_str()),
            Self::Malformed { verb, raw } if verb.is_quest_verb() => {
                leading_quest_id(raw, verb.name())
            }
            _ => None,
        }
    }

    pub fn verb(&self) -> Option<CommandVerb> {
        match self {
            Self::StartQuest { .. } => Some(CommandVerb::StartQuest),
            Self::UpdateQuest { .. } => Some(CommandVerb::UpdateQuest),
            Self::CompleteQuest { .. } => Some(CommandVerb::CompleteQuest),
            Self::SetVariable { .. } => Some(CommandVerb::SetVariable),
            Self::Malformed { verb, .. } => Some(*verb),
            Self::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartQuest { quest_id } => write!(f, "StartQuest_{}", quest_id),
            Self::UpdateQuest { quest_id, stage } => {
                write!(f, "UpdateQuest_{}_{}", quest_id, stage)
            }
            Self::CompleteQuest { quest_id } => write!(f, "CompleteQuest_{}", quest_id),
            Self::SetVariable { name, value } => write!(f, "SetVariable_{}_{}", name, value),
            Self::Malformed { raw, .. } | Self::Unknown { raw } => f.write_str(raw),
        }
    }
}

impl From<String> for ScriptCommand {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ScriptCommand> for String {
    fn from(command: ScriptCommand) -> Self {
        command.to_string()
    }
}

/// A pure predicate over runtime state gating response visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConditionExpr {
    QuestActive { quest_id: String },
    QuestCompleted { quest_id: String },
    QuestStage { quest_id: String, stage: i64 },
    VariableEquals { name: String, value: VariableValue },
    Malformed { verb: ConditionVerb, raw: String },
    Unknown { raw: String },
}

impl ConditionExpr {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let Some((verb, args)) = match_verb(raw, &ConditionVerb::ALL, |verb| verb.name()) else {
            return Self::Unknown {
                raw: raw.to_string(),
            };
        };
        let malformed = || Self::Malformed {
            verb,
            raw: raw.to_string(),
        };

        match verb {
            ConditionVerb::QuestActive => single_id(args)
                .map(|quest_id| Self::QuestActive { quest_id })
                .unwrap_or_else(malformed),
            ConditionVerb::QuestCompleted => single_id(args)
                .map(|quest_id| Self::QuestCompleted { quest_id })
                .unwrap_or_else(malformed),
            ConditionVerb::QuestStage => id_and_stage(args)
                .map(|(quest_id, stage)| Self::QuestStage { quest_id, stage })
                .unwrap_or_else(malformed),
            ConditionVerb::VariableEquals => name_and_value(args)
                .map(|(name, value)| Self::VariableEquals { name, value })
                .unwrap_or_else(malformed),
        }
    }

    pub fn quest_id(&self) -> Option<&str> {
        match self {
            Self::QuestActive { quest_id }
            | Self::QuestCompleted { quest_id }
            | Self::QuestStage { quest_id, .. } => Some(quest_id.as_str()),
            Self::Malformed { verb, raw } if verb.is_quest_verb() => {
                leading_quest_id(raw, verb.name())
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConditionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestActive { quest_id } => write!(f, "QuestActive_{}", quest_id),
            Self::QuestCompleted { quest_id } => write!(f, "QuestCompleted_{}", quest_id),
            Self::QuestStage { quest_id, stage } => {
                write!(f, "QuestStage_{}_{}", quest_id, stage)
            }
            Self::VariableEquals { name, value } => {
                write!(f, "VariableEquals_{}_{}", name, value)
            }
            Self::Malformed { raw, .. } | Self::Unknown { raw } => f.write_str(raw),
        }
    }
}

impl From<String> for ConditionExpr {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ConditionExpr> for String {
    fn from(condition: ConditionExpr) -> Self {
        condition.to_string()
    }
}

/// Parses an optional command slot; blank strings count as absent.
pub fn parse_optional_command(raw: Option<&str>) -> Option<ScriptCommand> {
    raw.filter(|raw| !raw.trim().is_empty())
        .map(ScriptCommand::parse)
}

/// Parses an optional condition slot; blank strings count as absent.
pub fn parse_optional_condition(raw: Option<&str>) -> Option<ConditionExpr> {
    raw.filter(|raw| !raw.trim().is_empty())
        .map(ConditionExpr::parse)
}

pub fn deserialize_optional_command<'de, D>(
    deserializer: D,
) -> Result<Option<ScriptCommand>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(parse_optional_command(raw.as_deref()))
}

pub fn deserialize_optional_condition<'de, D>(
    deserializer: D,
) -> Result<Option<ConditionExpr>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(parse_optional_condition(raw.as_deref()))
}

fn match_verb<'a, V: Copy>(
    raw: &'a str,
    verbs: &[V],
    name: impl Fn(V) -> &'static str,
) -> Option<(V, &'a str)> {
    verbs
        .iter()
        .copied()
        .filter_map(|verb| {
            raw.strip_prefix(name(verb))
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|args| (verb, args, name(verb).len()))
        })
        .max_by_key(|(_, _, prefix_len)| *prefix_len)
        .map(|(verb, args, _)| (verb, args))
}

fn single_id(args: &str) -> Option<String> {
    if args.is_empty() {
        return None;
    }
    Some(args.to_string())
}

fn id_and_stage(args: &str) -> Option<(String, i64)> {
    let (quest_id, stage) = args.rsplit_once('_')?;
    if quest_id.is_empty() {
        return None;
    }
    let stage = stage.parse::<i64>().ok()?;
    Some((quest_id.to_string(), stage))
}

fn name_and_value(args: &str) -> Option<(String, VariableValue)> {
    let (name, value) = args.split_once('_')?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), VariableValue::coerce(value)))
}

fn leading_quest_id<'a>(raw: &'a str, verb_name: &str) -> Option<&'a str> {
    let args = raw.strip_prefix(verb_name)?.strip_prefix('_')?;
    let quest_id = args.rsplit_once('_').map_or(args, |(head, _)| head);
    (!quest_id.is_empty()).then_some(quest_id)
}
