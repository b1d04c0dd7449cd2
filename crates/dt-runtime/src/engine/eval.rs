use super::*;

/// Applies one script command to `state`.
///
/// Quest commands that take effect return the notification to surface.
/// Commands naming unknown or inactive quests change nothing.
pub fn execute_command(
    graph: &DialogueGraph,
    state: &mut RuntimeState,
    command: &ScriptCommand,
) -> Option<QuestEvent> {
    match command {
        ScriptCommand::StartQuest { quest_id } => {
            let Some(quest) = graph.quest(quest_id) else {
                log::debug!("StartQuest names unknown quest \"{}\"", quest_id);
                return None;
            };
            state
                .quest_state
                .insert(quest_id.clone(), QuestProgress::started());
            Some(QuestEvent::Started {
                quest_id: quest_id.clone(),
                title: quest.title.clone(),
                journal_entry: quest.stage(1).map(|stage| stage.journal_entry.clone()),
            })
        }
        ScriptCommand::UpdateQuest { quest_id, stage } => {
            let progress = state.quest_state.get_mut(quest_id)?;
            progress.current_stage = *stage;
            let quest = graph.quest(quest_id)?;
            Some(QuestEvent::StageChanged {
                quest_id: quest_id.clone(),
                title: quest.title.clone(),
                stage: *stage,
                journal_entry: quest.stage(*stage).map(|stage| stage.journal_entry.clone()),
            })
        }
        ScriptCommand::CompleteQuest { quest_id } => {
            let progress = state.quest_state.get_mut(quest_id)?;
            progress.completed = true;
            let quest = graph.quest(quest_id)?;
            if let Some(rewards) = &quest.rewards {
                log::debug!(
                    "quest \"{}\" completed with rewards: {}",
                    quest_id,
                    format_rewards(rewards)
                );
            }
            Some(QuestEvent::Completed {
                quest_id: quest_id.clone(),
                title: quest.title.clone(),
                rewards: quest.rewards.clone(),
            })
        }
        ScriptCommand::SetVariable { name, value } => {
            state.variables.insert(name.clone(), value.clone());
            None
        }
        ScriptCommand::Malformed { raw, .. } => {
            log::warn!("ignoring malformed script command \"{}\"", raw);
            None
        }
        ScriptCommand::Unknown { raw } => {
            log::warn!("ignoring unknown script command \"{}\"", raw);
            None
        }
    }
}

/// Pure predicate over runtime state. Unrecognised conditions are false.
pub fn evaluate_condition(state: &RuntimeState, condition: &ConditionExpr) -> bool {
    match condition {
        ConditionExpr::QuestActive { quest_id } => state.quest_state.contains_key(quest_id),
        ConditionExpr::QuestCompleted { quest_id } => state
            .quest_state
            .get(quest_id)
            .is_some_and(|progress| progress.completed),
        ConditionExpr::QuestStage { quest_id, stage } => state
            .quest_state
            .get(quest_id)
            .is_some_and(|progress| progress.current_stage == *stage),
        ConditionExpr::VariableEquals { name, value } => {
            state.variables.get(name) == Some(value)
        }
        ConditionExpr::Malformed { raw, .. } => {
            log::warn!("malformed condition \"{}\" evaluates to false", raw);
            false
        }
        ConditionExpr::Unknown { raw } => {
            log::warn!("unknown condition \"{}\" evaluates to false", raw);
            false
        }
    }
}
