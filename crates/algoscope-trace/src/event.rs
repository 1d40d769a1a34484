//! Step events for the visualizer timeline.

use algoscope_dataset::{GridPos, NodeId};
use serde::{Deserialize, Serialize};

/// The subject of a search event: a grid cell or a graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum NodeRef {
    Cell(GridPos),
    Vertex(NodeId),
}

/// One atomic, replayable state change produced by an algorithm run.
///
/// Events are recorded in the exact temporal order the algorithm touches the
/// data. Replaying every `Swap`/`Overwrite` onto a copy of the initial
/// sequence reproduces the directly-computed result; the remaining variants
/// only drive highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepEvent {
    /// Two positions were compared
    Compare { a: usize, b: usize },

    /// The values at two positions were exchanged
    Swap { a: usize, b: usize },

    /// A position was assigned a new value
    Overwrite { index: usize, value: u32 },

    /// Positions reached their final sorted place
    MarkSorted { indices: Vec<usize> },

    /// A position became the active pivot
    MarkPivot { index: usize },

    /// The pivot highlight at a position was removed
    ClearPivot { index: usize },

    /// Comparison highlights at positions were removed
    ClearHighlight { indices: Vec<usize> },

    /// A cell or vertex was settled by a search
    Visit { node: NodeRef },

    /// A cell or vertex entered the search frontier
    Enqueue { node: NodeRef },
}

/// A full recorded run: the primary event list, plus the shortest-path node
/// list that pathfinding replays as a second animation phase.
///
/// `path` is empty for sorting and traversal runs, and for pathfinding runs
/// whose target turned out to be unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub events: Vec<StepEvent>,
    pub path: Vec<NodeRef>,
}

impl Trace {
    /// A trace with no path phase.
    pub fn from_events(events: Vec<StepEvent>) -> Self {
        Self {
            events,
            path: Vec::new(),
        }
    }

    /// Total number of playback steps across both phases.
    pub fn total_steps(&self) -> usize {
        self.events.len() + self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_is_tagged() {
        let event = StepEvent::Visit {
            node: NodeRef::Cell(GridPos::new(3, 4)),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Visit\""));
        assert!(json.contains("cell"));

        let parsed: StepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn total_steps_spans_phases() {
        let trace = Trace {
            events: vec![StepEvent::Compare { a: 0, b: 1 }],
            path: vec![NodeRef::Cell(GridPos::new(0, 0))],
        };
        assert_eq!(trace.total_steps(), 2);
        assert!(!trace.is_empty());
        assert!(Trace::default().is_empty());
    }
}
