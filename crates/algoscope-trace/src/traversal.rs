//! Graph traversal recorders: BFS and DFS.
//!
//! Both need a designated start node and visit every reachable node exactly
//! once. BFS walks in level order from a FIFO frontier; DFS recurses through
//! neighbors in id order.

use std::collections::VecDeque;

use algoscope_dataset::{Graph, NodeId};

use crate::error::{RecorderError, Result};
use crate::event::{NodeRef, StepEvent, Trace};

/// Breadth-first traversal from the selected start node.
pub fn bfs(graph: &Graph) -> Result<Trace> {
    if graph.node_count() == 0 {
        return Ok(Trace::default());
    }
    let start = graph.start().ok_or(RecorderError::NoStartSelected)?;

    let mut discovered = vec![false; graph.node_count()];
    let mut events = Vec::new();
    let mut frontier = VecDeque::new();

    discovered[start.0] = true;
    frontier.push_back(start);
    events.push(StepEvent::Enqueue {
        node: NodeRef::Vertex(start),
    });

    while let Some(node) = frontier.pop_front() {
        events.push(StepEvent::Visit {
            node: NodeRef::Vertex(node),
        });
        for &next in graph.neighbors(node) {
            if !discovered[next.0] {
                discovered[next.0] = true;
                frontier.push_back(next);
                events.push(StepEvent::Enqueue {
                    node: NodeRef::Vertex(next),
                });
            }
        }
    }

    Ok(Trace::from_events(events))
}

/// Depth-first traversal from the selected start node.
pub fn dfs(graph: &Graph) -> Result<Trace> {
    if graph.node_count() == 0 {
        return Ok(Trace::default());
    }
    let start = graph.start().ok_or(RecorderError::NoStartSelected)?;

    let mut visited = vec![false; graph.node_count()];
    let mut events = Vec::new();
    walk(graph, start, &mut visited, &mut events);
    Ok(Trace::from_events(events))
}

fn walk(graph: &Graph, node: NodeId, visited: &mut [bool], events: &mut Vec<StepEvent>) {
    visited[node.0] = true;
    events.push(StepEvent::Visit {
        node: NodeRef::Vertex(node),
    });
    for &next in graph.neighbors(node) {
        if !visited[next.0] {
            walk(graph, next, visited, events);
        }
    }
}
