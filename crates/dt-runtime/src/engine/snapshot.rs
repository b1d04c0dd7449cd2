use super::*;

impl DialogueEngine {
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            schema_version: SNAPSHOT_SCHEMA.to_string(),
            state: self.state.clone(),
            terminated: self.terminated,
        }
    }

    /// Rebuilds an engine from a snapshot taken against the same graph.
    /// Queued quest notifications are not part of a snapshot.
    pub fn resume(
        graph: Arc<DialogueGraph>,
        snapshot: EngineSnapshot,
    ) -> Result<Self, DialogueError> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA {
            return Err(DialogueError::new(
                "ENGINE_SNAPSHOT_SCHEMA",
                format!(
                    "Unsupported snapshot schema \"{}\", expected \"{}\".",
                    snapshot.schema_version, SNAPSHOT_SCHEMA
                ),
            ));
        }
        if !graph.contains_node(&snapshot.state.current_node_id) {
            return Err(DialogueError::new(
                "ENGINE_SNAPSHOT_NODE_MISSING",
                format!(
                    "Snapshot points at dialogue \"{}\" which is not in the graph.",
                    snapshot.state.current_node_id
                ),
            ));
        }

        Ok(Self {
            graph,
            state: snapshot.state,
            terminated: snapshot.terminated,
            quest_events: Vec::new(),
        })
    }
}
