use super::*;

impl DialogueEngine {
    /// Started quests ordered by id, with the journal entry of their current
    /// stage. Quests missing from the graph or sitting on an undeclared stage
    /// are left out.
    pub fn active_quest_summaries(&self) -> Vec<QuestSummary> {
        self.state
            .quest_state
            .iter()
            .filter_map(|(quest_id, progress)| {
                let quest = self.graph.quest(quest_id)?;
                let stage_text = if progress.completed {
                    QUEST_COMPLETED_TEXT.to_string()
                } else {
                    quest.stage(progress.current_stage)?.journal_entry.clone()
                };
                Some(QuestSummary {
                    quest_id: quest_id.clone(),
                    title: quest.title.clone(),
                    stage_text,
                    completed: progress.completed,
                })
            })
            .collect()
    }
}
