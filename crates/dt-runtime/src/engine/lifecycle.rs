use super::*;

pub const SNAPSHOT_SCHEMA: &str = "dialogue-snapshot.v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Active(String),
    Terminated,
}

/// One playthrough over a shared, read-only graph.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    pub(super) graph: Arc<DialogueGraph>,
    pub(super) state: RuntimeState,
    pub(super) terminated: bool,
    pub(super) quest_events: Vec<QuestEvent>,
}

impl DialogueEngine {
    /// Creates an engine that has not entered any node yet; call
    /// [`DialogueEngine::reset`] to start the conversation.
    pub fn new(graph: Arc<DialogueGraph>) -> Self {
        let state = RuntimeState::seeded_from(&graph);
        Self {
            graph,
            state,
            terminated: true,
            quest_events: Vec::new(),
        }
    }

    pub fn reset(&mut self) -> Result<(), DialogueError> {
        self.state = RuntimeState::seeded_from(&self.graph);
        self.quest_events.clear();
        self.terminated = false;

        let start = self.graph.starting_node_id.clone();
        if !self.graph.contains_node(&start) {
            self.terminated = true;
            return Err(DialogueError::new(
                "ENGINE_DANGLING_REFERENCE",
                format!("Starting dialogue \"{}\" does not exist.", start),
            ));
        }

        log::debug!("resetting dialogue at \"{}\"", start);
        self.enter(&start)
    }

    pub fn graph(&self) -> &Arc<DialogueGraph> {
        &self.graph
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.graph.node(&self.state.current_node_id)
    }

    pub fn status(&self) -> EngineStatus {
        if self.terminated || self.available_responses().is_empty() {
            return EngineStatus::Terminated;
        }
        EngineStatus::Active(self.state.current_node_id.clone())
    }

    pub fn is_terminated(&self) -> bool {
        self.status() == EngineStatus::Terminated
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn variables(&self) -> &std::collections::BTreeMap<String, VariableValue> {
        &self.state.variables
    }

    /// Drains the quest notifications queued since the last call.
    pub fn take_quest_events(&mut self) -> Vec<QuestEvent> {
        std::mem::take(&mut self.quest_events)
    }
}
