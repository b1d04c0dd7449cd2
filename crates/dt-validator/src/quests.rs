use std::collections::BTreeSet;

use dt_core::{CommandVerb, ConditionExpr, DialogueGraph, ScriptCommand};

use crate::report::ValidationReport;

/// Quest commands must name declared quests and stages.
pub(crate) fn check_script_references(graph: &DialogueGraph, report: &mut ValidationReport) {
    for site in graph.script_sites() {
        let location = site.location.as_str();
        match site.command {
            ScriptCommand::StartQuest { quest_id } | ScriptCommand::CompleteQuest { quest_id } => {
                if !graph.contains_quest(quest_id) {
                    report.error(
                        "QUEST_MISSING",
                        format!("{} references non-existent quest '{}'", location, quest_id),
                    );
                }
            }
            ScriptCommand::UpdateQuest { quest_id, stage } => match graph.quest(quest_id) {
                None => report.error(
                    "QUEST_MISSING",
                    format!("{} references non-existent quest '{}'", location, quest_id),
                ),
                Some(quest) if quest.stage(*stage).is_none() => report.error(
                    "QUEST_STAGE_MISSING",
                    format!(
                        "{} references non-existent stage {} for quest '{}'",
                        location, stage, quest_id
                    ),
                ),
                Some(_) => {}
            },
            ScriptCommand::Malformed {
                verb: CommandVerb::UpdateQuest,
                raw,
            } => report.error(
                "QUEST_STAGE_FORMAT",
                format!(
                    "{} has invalid stage format in UpdateQuest command '{}'",
                    location, raw
                ),
            ),
            ScriptCommand::Malformed { raw, .. } => report.warning(
                "SCRIPT_MALFORMED",
                format!("{} has malformed script command '{}'", location, raw),
            ),
            ScriptCommand::Unknown { raw } => report.warning(
                "SCRIPT_UNKNOWN",
                format!("{} has unknown script command '{}'", location, raw),
            ),
            ScriptCommand::SetVariable { .. } => {}
        }
    }
}

pub(crate) fn check_conditions(graph: &DialogueGraph, report: &mut ValidationReport) {
    for node in graph.nodes() {
        for response in &node.responses {
            let Some(condition) = &response.condition else {
                continue;
            };
            let location = format!(
                "In dialogue '{}', response '{}' condition",
                node.id, response.id
            );
            match condition {
                ConditionExpr::QuestActive { quest_id }
                | ConditionExpr::QuestCompleted { quest_id } => {
                    if !graph.contains_quest(quest_id) {
                        report.warning(
                            "CONDITION_QUEST_MISSING",
                            format!("{} checks non-existent quest '{}'", location, quest_id),
                        );
                    }
                }
                ConditionExpr::QuestStage { quest_id, stage } => match graph.quest(quest_id) {
                    None => report.warning(
                        "CONDITION_QUEST_MISSING",
                        format!("{} checks non-existent quest '{}'", location, quest_id),
                    ),
                    Some(quest) if quest.stage(*stage).is_none() => report.warning(
                        "CONDITION_STAGE_MISSING",
                        format!(
                            "{} checks non-existent stage {} for quest '{}'",
                            location, stage, quest_id
                        ),
                    ),
                    Some(_) => {}
                },
                ConditionExpr::Malformed { raw, .. } => report.warning(
                    "CONDITION_MALFORMED",
                    format!("{} is malformed: '{}'", location, raw),
                ),
                ConditionExpr::Unknown { raw } => report.warning(
                    "CONDITION_UNKNOWN",
                    format!(
                        "{} uses unknown condition '{}', which always evaluates to false",
                        location, raw
                    ),
                ),
                ConditionExpr::VariableEquals { .. } => {}
            }
        }
    }
}

/// Quests no script command ever names.
pub(crate) fn check_unused_quests(graph: &DialogueGraph, report: &mut ValidationReport) {
    let sites = graph.script_sites();
    let referenced = sites
        .iter()
        .filter_map(|site| site.command.quest_id())
        .collect::<BTreeSet<_>>();

    for quest in graph.quests() {
        if !referenced.contains(quest.id.as_str()) {
            report.warning(
                "QUEST_UNUSED",
                format!(
                    "Quest '{}' is defined but never referenced in any dialogue script",
                    quest.id
                ),
            );
        }
    }
}

/// Sorted stage ids should read `1..=N`.
pub(crate) fn check_stage_sequence(graph: &DialogueGraph, report: &mut ValidationReport) {
    for quest in graph.quests() {
        let stage_ids = quest.stage_ids();
        let mut sorted = stage_ids.clone();
        sorted.sort_unstable();
        let expected = (1..=stage_ids.len() as i64).collect::<Vec<_>>();
        if sorted != expected {
            report.warning(
                "QUEST_STAGE_SEQUENCE",
                format!(
                    "Quest '{}' has non-sequential stage IDs: {:?}. Expected: {:?}",
                    quest.id, stage_ids, expected
                ),
            );
        }
    }
}
