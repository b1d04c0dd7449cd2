use std::collections::{BTreeSet, HashMap, HashSet};

use dt_core::{DialogueGraph, DialogueNode};

use crate::report::ValidationReport;

pub(crate) fn check_references(graph: &DialogueGraph, report: &mut ValidationReport) {
    if !graph.contains_node(&graph.starting_node_id) {
        report.error(
            "START_NODE_MISSING",
            format!(
                "Starting dialogue '{}' doesn't exist in dialogues array",
                graph.starting_node_id
            ),
        );
    }

    for node in graph.nodes() {
        for response in &node.responses {
            let Some(next_node) = &response.next_node else {
                continue;
            };
            if !graph.contains_node(next_node) {
                report.error(
                    "DANGLING_REFERENCE",
                    format!(
                        "In dialogue '{}', response '{}' references non-existent dialogue '{}'",
                        node.id, response.id, next_node
                    ),
                );
            }
        }
    }
}

pub(crate) fn check_reachability(graph: &DialogueGraph, report: &mut ValidationReport) {
    let reachable = collect_reachable_nodes(graph, &graph.starting_node_id);
    for node in graph.nodes() {
        if !reachable.contains(node.id.as_str()) {
            report.warning(
                "UNREACHABLE_NODE",
                format!(
                    "Dialogue '{}' is unreachable from the starting dialogue",
                    node.id
                ),
            );
        }
    }
}

pub(crate) fn check_cycles(graph: &DialogueGraph, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for cycle in find_cycles(graph) {
        if seen.insert(canonical_rotation(&cycle)) {
            let mut path = cycle.clone();
            path.push(cycle[0].clone());
            report.warning(
                "CYCLE",
                format!("Circular dialogue reference detected: {}", path.join(" -> ")),
            );
        }
    }
}

/// Node ids reachable from `start` along `next_dialogue` edges. Dangling
/// targets are skipped.
pub fn collect_reachable_nodes<'a>(graph: &'a DialogueGraph, start: &str) -> BTreeSet<&'a str> {
    let mut visited = BTreeSet::new();
    let Some(start) = graph.node(start) else {
        return visited;
    };
    let mut stack = vec![start.id.as_str()];

    while let Some(node_id) = stack.pop() {
        if !visited.insert(node_id) {
            continue;
        }
        if let Some(node) = graph.node(node_id) {
            for response in &node.responses {
                if let Some(next) = response.next_node.as_deref().and_then(|id| graph.node(id)) {
                    stack.push(next.id.as_str());
                }
            }
        }
    }

    visited
}

/// Cycles found by a depth-first search from every node, each as the node
/// sequence without the closing repeat. Rotations of the same cycle may
/// appear more than once.
///
/// The search keeps its own frame stack, so path length is bounded by the
/// heap rather than the thread stack.
pub fn find_cycles(graph: &DialogueGraph) -> Vec<Vec<String>> {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum State {
        Visiting,
        Done,
    }

    let mut cycles = Vec::new();
    for root in graph.nodes() {
        let mut states: HashMap<&str, State> = HashMap::new();
        // (node, next response index); parallel to `path`.
        let mut frames: Vec<(&DialogueNode, usize)> = vec![(root, 0)];
        let mut path: Vec<&str> = vec![root.id.as_str()];
        states.insert(root.id.as_str(), State::Visiting);

        while let Some(frame) = frames.last_mut() {
            let (node, next_index) = (frame.0, frame.1);
            let Some(response) = node.responses.get(next_index) else {
                frames.pop();
                path.pop();
                states.insert(node.id.as_str(), State::Done);
                continue;
            };
            frame.1 += 1;

            let Some(next) = response.next_node.as_deref().and_then(|id| graph.node(id)) else {
                continue;
            };
            let next_id = next.id.as_str();
            match states.get(next_id) {
                Some(State::Visiting) => {
                    if let Some(position) = path.iter().position(|id| *id == next_id) {
                        cycles.push(path[position..].iter().map(|id| id.to_string()).collect());
                    }
                }
                Some(State::Done) => {}
                None => {
                    states.insert(next_id, State::Visiting);
                    frames.push((next, 0));
                    path.push(next_id);
                }
            }
        }
    }
    cycles
}

fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by(|left, right| left.1.cmp(right.1))
        .map_or(0, |(index, _)| index);
    cycle[start..]
        .iter()
        .chain(cycle[..start].iter())
        .cloned()
        .collect()
}
