//! Algoscope Datasets
//!
//! The three subjects a visualizer can animate:
//!
//! - **Sequence**: an ordered list of bar values (sorting)
//! - **Grid**: a 2-D matrix of empty/wall cells with start and end positions
//!   (pathfinding)
//! - **Graph**: nodes with 2-D positions and a symmetric adjacency relation
//!   (traversal)
//!
//! Generation is seeded and deterministic so a run can be reproduced exactly.
//! Editing operations (wall toggling, endpoint moves, node drags) live here
//! too; whether an edit is *allowed at this moment* is the playback engine's
//! call, not ours.

mod graph;
mod grid;
mod sequence;

pub use graph::{Graph, GraphNode, NodeId};
pub use grid::{CellKind, Grid, GridPos};
pub use sequence::Sequence;

use rand::{rngs::StdRng, SeedableRng};

/// Errors from dataset construction and editing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DatasetError {
    /// Position lies outside the grid.
    #[error("position ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The start or end cell cannot be walled or overwritten.
    #[error("cell ({row}, {col}) is an endpoint")]
    Endpoint { row: usize, col: usize },

    /// An endpoint cannot be placed on a wall.
    #[error("cell ({row}, {col}) is a wall")]
    Walled { row: usize, col: usize },

    /// The node id does not exist in the graph.
    #[error("unknown node {0}")]
    UnknownNode(usize),

    /// A grid needs distinct start and end cells.
    #[error("start and end must be distinct cells")]
    EndpointsCoincide,
}

/// Which dataset shape a visualizer operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DatasetKind {
    Sequence,
    Grid,
    Graph,
}

/// Configuration for seeded dataset generation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatasetConfig {
    /// Seed for deterministic generation
    pub seed: u64,
    /// Number of bars in a generated sequence
    pub bars: usize,
    /// Grid dimensions
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Fraction of non-endpoint cells that become walls (0.0 - 1.0)
    pub wall_density: f64,
    /// Number of nodes in a generated graph
    pub graph_nodes: usize,
    /// Extra random edges beyond the spanning connections
    pub extra_edges: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bars: 40,
            grid_rows: 20,
            grid_cols: 40,
            wall_density: 0.28,
            graph_nodes: 12,
            extra_edges: 4,
        }
    }
}

/// The subject being visualized.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Dataset {
    Sequence(Sequence),
    Grid(Grid),
    Graph(Graph),
}

impl Dataset {
    /// Generate a random dataset of the given shape.
    pub fn generate(kind: DatasetKind, config: &DatasetConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        match kind {
            DatasetKind::Sequence => Dataset::Sequence(Sequence::random(config.bars, &mut rng)),
            DatasetKind::Grid => Dataset::Grid(Grid::random(
                config.grid_rows,
                config.grid_cols,
                config.wall_density,
                &mut rng,
            )),
            DatasetKind::Graph => Dataset::Graph(Graph::random(
                config.graph_nodes,
                config.extra_edges,
                &mut rng,
            )),
        }
    }

    /// The shape of this dataset.
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Sequence(_) => DatasetKind::Sequence,
            Dataset::Grid(_) => DatasetKind::Grid,
            Dataset::Graph(_) => DatasetKind::Graph,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Dataset::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Dataset::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            Dataset::Graph(g) => Some(g),
            _ => None,
        }
    }
}
