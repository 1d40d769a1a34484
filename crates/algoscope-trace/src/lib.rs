//! Algoscope Trace
//!
//! Pure algorithm recorders and the step-event timeline they produce.
//!
//! # Architecture
//!
//! - **Recorders**: run a textbook algorithm over a private copy of a dataset
//!   and record every state change as a `StepEvent`
//! - **Trace**: the full ordered event list, plus the shortest-path list that
//!   pathfinding replays as a second phase
//! - **View**: mutable visual state with an exhaustive apply function;
//!   replaying a trace into a view at any speed yields the same states
//!
//! Recorders are pure functions of the dataset (and its start/end
//! references): no clock, no randomness, no UI state. The whole trace is
//! computed eagerly before any animation begins.

mod error;
mod event;
mod pathfinding;
mod sorting;
mod traversal;
mod view;

pub use error::{RecorderError, Result};
pub use event::{NodeRef, StepEvent, Trace};
pub use view::{
    replay_sequence, BarMark, BarView, CellView, GraphView, GridView, VertexView, View,
};

use algoscope_dataset::{Dataset, DatasetKind};
use serde::{Deserialize, Serialize};

/// The eight supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    BubbleSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 8] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::MergeSort,
        AlgorithmId::QuickSort,
        AlgorithmId::Dijkstra,
        AlgorithmId::AStar,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
    ];

    /// The dataset shape this algorithm runs over.
    pub fn dataset_kind(&self) -> DatasetKind {
        match self {
            AlgorithmId::BubbleSort
            | AlgorithmId::InsertionSort
            | AlgorithmId::MergeSort
            | AlgorithmId::QuickSort => DatasetKind::Sequence,
            AlgorithmId::Dijkstra | AlgorithmId::AStar => DatasetKind::Grid,
            AlgorithmId::Bfs | AlgorithmId::Dfs => DatasetKind::Graph,
        }
    }

    /// Human-readable name for UI and logs.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "Bubble Sort",
            AlgorithmId::InsertionSort => "Insertion Sort",
            AlgorithmId::MergeSort => "Merge Sort",
            AlgorithmId::QuickSort => "Quick Sort",
            AlgorithmId::Dijkstra => "Dijkstra",
            AlgorithmId::AStar => "A*",
            AlgorithmId::Bfs => "Breadth-First Search",
            AlgorithmId::Dfs => "Depth-First Search",
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Record the full trace of an algorithm over a dataset.
pub fn record(dataset: &Dataset, algorithm: AlgorithmId) -> Result<Trace> {
    match (algorithm, dataset) {
        (AlgorithmId::BubbleSort, Dataset::Sequence(seq)) => Ok(sorting::bubble_sort(seq)),
        (AlgorithmId::InsertionSort, Dataset::Sequence(seq)) => Ok(sorting::insertion_sort(seq)),
        (AlgorithmId::MergeSort, Dataset::Sequence(seq)) => Ok(sorting::merge_sort(seq)),
        (AlgorithmId::QuickSort, Dataset::Sequence(seq)) => Ok(sorting::quick_sort(seq)),
        (AlgorithmId::Dijkstra, Dataset::Grid(grid)) => Ok(pathfinding::dijkstra(grid)),
        (AlgorithmId::AStar, Dataset::Grid(grid)) => Ok(pathfinding::a_star(grid)),
        (AlgorithmId::Bfs, Dataset::Graph(graph)) => traversal::bfs(graph),
        (AlgorithmId::Dfs, Dataset::Graph(graph)) => traversal::dfs(graph),
        (algorithm, _) => Err(RecorderError::WrongDataset {
            algorithm,
            expected: algorithm.dataset_kind(),
        }),
    }
}
