use super::*;

impl DialogueEngine {
    /// Responses whose condition holds, in authoring order. Empty once the
    /// conversation has ended.
    pub fn available_responses(&self) -> Vec<&Response> {
        if self.terminated {
            return Vec::new();
        }
        let Some(node) = self.current_node() else {
            return Vec::new();
        };
        node.responses
            .iter()
            .filter(|response| {
                response
                    .condition
                    .as_ref()
                    .map_or(true, |condition| evaluate_condition(&self.state, condition))
            })
            .collect()
    }

    pub fn select_response(&mut self, response_id: &str) -> Result<(), DialogueError> {
        if self.terminated {
            return Err(DialogueError::new(
                "ENGINE_TERMINATED",
                "The conversation has already ended.",
            ));
        }

        let Some(response) = self
            .available_responses()
            .into_iter()
            .find(|response| response.id == response_id)
            .cloned()
        else {
            return Err(DialogueError::new(
                "ENGINE_RESPONSE_UNAVAILABLE",
                format!(
                    "Response \"{}\" is not available in dialogue \"{}\".",
                    response_id, self.state.current_node_id
                ),
            ));
        };

        if let Some(next_node) = &response.next_node {
            if !self.graph.contains_node(next_node) {
                self.terminated = true;
                return Err(DialogueError::new(
                    "ENGINE_DANGLING_REFERENCE",
                    format!(
                        "Response \"{}\" leads to missing dialogue \"{}\".",
                        response.id, next_node
                    ),
                ));
            }
        }

        log::debug!(
            "selected response \"{}\" in \"{}\"",
            response.id,
            self.state.current_node_id
        );
        self.state.history.push(HistoryEntry {
            speaker: PLAYER_SPEAKER.to_string(),
            text: response.text.clone(),
            source_id: response.id.clone(),
            is_player: true,
        });
        if let Some(command) = &response.script {
            self.run_command(command);
        }

        match &response.next_node {
            Some(next_node) => self.enter(next_node),
            None => {
                log::debug!("conversation ended by \"{}\"", response.id);
                self.terminated = true;
                Ok(())
            }
        }
    }

    pub(super) fn enter(&mut self, node_id: &str) -> Result<(), DialogueError> {
        let graph = Arc::clone(&self.graph);
        let Some(node) = graph.node(node_id) else {
            self.terminated = true;
            return Err(DialogueError::new(
                "ENGINE_DANGLING_REFERENCE",
                format!("Dialogue \"{}\" does not exist.", node_id),
            ));
        };

        log::debug!("entering dialogue \"{}\"", node.id);
        self.state.current_node_id = node.id.clone();
        if let Some(command) = &node.on_entry {
            self.run_command(command);
        }
        self.state.history.push(HistoryEntry {
            speaker: node.speaker.clone(),
            text: node.text.clone(),
            source_id: node.id.clone(),
            is_player: false,
        });
        Ok(())
    }

    fn run_command(&mut self, command: &ScriptCommand) {
        if let Some(event) = execute_command(&self.graph, &mut self.state, command) {
            self.quest_events.push(event);
        }
    }
}
