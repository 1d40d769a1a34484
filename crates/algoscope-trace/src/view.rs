//! Visual state that step events are replayed into.
//!
//! A `View` is the renderer-facing projection of a dataset plus the
//! highlights accumulated so far. `apply` is exhaustive over `StepEvent`, so
//! adding an event variant forces every view to decide how to draw it.
//! `View::replay` rebuilds the view at any step count from scratch, the same
//! way a snapshot is rebuilt from an event log.

use algoscope_dataset::{CellKind, Dataset, Graph, Grid, GridPos, NodeId, Sequence};
use serde::{Deserialize, Serialize};

use crate::event::{NodeRef, StepEvent, Trace};

/// Highlight state of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMark {
    #[default]
    Idle,
    Comparing,
    Pivot,
    Sorted,
}

/// Bars for a sorting visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarView {
    pub values: Vec<u32>,
    pub marks: Vec<BarMark>,
}

/// One grid cell with its highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub kind: CellKind,
    pub is_start: bool,
    pub is_end: bool,
    pub visited: bool,
    pub enqueued: bool,
    pub on_path: bool,
}

/// Cells for a pathfinding visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,
}

/// One graph vertex with its highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexView {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub is_start: bool,
    pub visited: bool,
    pub enqueued: bool,
}

/// Vertices and edges for a traversal visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub vertices: Vec<VertexView>,
    pub edges: Vec<(NodeId, NodeId)>,
}

/// The mutable visual state of one visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Bars(BarView),
    Grid(GridView),
    Graph(GraphView),
}

impl View {
    /// The initial view of a dataset, with no highlights.
    pub fn of(dataset: &Dataset) -> Self {
        match dataset {
            Dataset::Sequence(seq) => View::Bars(BarView::of(seq)),
            Dataset::Grid(grid) => View::Grid(GridView::of(grid)),
            Dataset::Graph(graph) => View::Graph(GraphView::of(graph)),
        }
    }

    /// Apply one event. Events from another domain are ignored.
    pub fn apply(&mut self, event: &StepEvent) {
        match self {
            View::Bars(bars) => bars.apply(event),
            View::Grid(grid) => grid.apply(event),
            View::Graph(graph) => graph.apply(event),
        }
    }

    /// Mark one path node during the second pathfinding phase.
    pub fn mark_path(&mut self, node: NodeRef) {
        if let (View::Grid(grid), NodeRef::Cell(pos)) = (self, node) {
            if let Some(cell) = grid.cell_mut(pos) {
                cell.on_path = true;
            }
        }
    }

    /// Rebuild the view after the first `steps` playback steps of a trace
    /// (events first, then path nodes).
    pub fn replay(dataset: &Dataset, trace: &Trace, steps: usize) -> Self {
        let mut view = View::of(dataset);
        let event_steps = steps.min(trace.events.len());
        for event in &trace.events[..event_steps] {
            view.apply(event);
        }
        let path_steps = (steps - event_steps).min(trace.path.len());
        for &node in &trace.path[..path_steps] {
            view.mark_path(node);
        }
        view
    }
}

impl BarView {
    fn of(seq: &Sequence) -> Self {
        Self {
            values: seq.values().to_vec(),
            marks: vec![BarMark::Idle; seq.len()],
        }
    }

    fn apply(&mut self, event: &StepEvent) {
        match event {
            StepEvent::Compare { a, b } => {
                self.mark_if_idle(*a, BarMark::Comparing);
                self.mark_if_idle(*b, BarMark::Comparing);
            }
            StepEvent::Swap { a, b } => {
                if *a < self.values.len() && *b < self.values.len() {
                    self.values.swap(*a, *b);
                }
            }
            StepEvent::Overwrite { index, value } => {
                if let Some(slot) = self.values.get_mut(*index) {
                    *slot = *value;
                }
            }
            StepEvent::MarkSorted { indices } => {
                for &i in indices {
                    if let Some(mark) = self.marks.get_mut(i) {
                        *mark = BarMark::Sorted;
                    }
                }
            }
            StepEvent::MarkPivot { index } => {
                if let Some(mark) = self.marks.get_mut(*index) {
                    *mark = BarMark::Pivot;
                }
            }
            StepEvent::ClearPivot { index } => self.clear_if(*index, BarMark::Pivot),
            StepEvent::ClearHighlight { indices } => {
                for &i in indices {
                    self.clear_if(i, BarMark::Comparing);
                }
            }
            StepEvent::Visit { .. } | StepEvent::Enqueue { .. } => {}
        }
    }

    fn mark_if_idle(&mut self, index: usize, mark: BarMark) {
        if let Some(slot) = self.marks.get_mut(index) {
            if *slot == BarMark::Idle {
                *slot = mark;
            }
        }
    }

    fn clear_if(&mut self, index: usize, expected: BarMark) {
        if let Some(slot) = self.marks.get_mut(index) {
            if *slot == expected {
                *slot = BarMark::Idle;
            }
        }
    }
}

impl GridView {
    fn of(grid: &Grid) -> Self {
        let cells = (0..grid.cell_count())
            .map(|i| {
                let pos = GridPos::new(i / grid.cols().max(1), i % grid.cols().max(1));
                CellView {
                    kind: grid.kind(pos).unwrap_or_default(),
                    is_start: pos == grid.start(),
                    is_end: pos == grid.end(),
                    visited: false,
                    enqueued: false,
                    on_path: false,
                }
            })
            .collect();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
        }
    }

    fn cell_mut(&mut self, pos: GridPos) -> Option<&mut CellView> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get_mut(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    fn apply(&mut self, event: &StepEvent) {
        match event {
            StepEvent::Visit {
                node: NodeRef::Cell(pos),
            } => {
                if let Some(cell) = self.cell_mut(*pos) {
                    cell.visited = true;
                }
            }
            StepEvent::Enqueue {
                node: NodeRef::Cell(pos),
            } => {
                if let Some(cell) = self.cell_mut(*pos) {
                    cell.enqueued = true;
                }
            }
            _ => {}
        }
    }
}

impl GraphView {
    fn of(graph: &Graph) -> Self {
        let vertices = graph
            .nodes()
            .iter()
            .map(|node| VertexView {
                id: node.id,
                x: node.x,
                y: node.y,
                is_start: Some(node.id) == graph.start(),
                visited: false,
                enqueued: false,
            })
            .collect();
        Self {
            vertices,
            edges: graph.edges(),
        }
    }

    fn apply(&mut self, event: &StepEvent) {
        match event {
            StepEvent::Visit {
                node: NodeRef::Vertex(id),
            } => {
                if let Some(vertex) = self.vertices.get_mut(id.0) {
                    vertex.visited = true;
                }
            }
            StepEvent::Enqueue {
                node: NodeRef::Vertex(id),
            } => {
                if let Some(vertex) = self.vertices.get_mut(id.0) {
                    vertex.enqueued = true;
                }
            }
            _ => {}
        }
    }
}

/// Replay only the value mutations of an event list onto a copy of a
/// sequence's values. Used to check that a recorded sort actually sorts.
pub fn replay_sequence(seq: &Sequence, events: &[StepEvent]) -> Vec<u32> {
    let mut values = seq.values().to_vec();
    for event in events {
        match event {
            StepEvent::Swap { a, b } => {
                if *a < values.len() && *b < values.len() {
                    values.swap(*a, *b);
                }
            }
            StepEvent::Overwrite { index, value } => {
                if let Some(slot) = values.get_mut(*index) {
                    *slot = *value;
                }
            }
            _ => {}
        }
    }
    values
}
