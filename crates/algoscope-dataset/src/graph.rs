//! Node-and-edge graph for traversal visualizers.
//!
//! The adjacency relation is undirected: edges are symmetrized and
//! deduplicated at construction, so `neighbors(a)` contains `b` exactly when
//! `neighbors(b)` contains `a`. Traversal needs a designated start node,
//! which the user selects after generation.

use rand::Rng;

use crate::DatasetError;

/// A unique node identifier within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// A graph node with its 2-D layout position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
}

/// An undirected graph with positioned nodes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes: Vec<GraphNode>,
    adjacency: Vec<Vec<NodeId>>,
    start: Option<NodeId>,
}

impl Graph {
    /// Build a graph from node positions and an edge list.
    ///
    /// Edges are symmetrized; duplicates and self-loops are dropped. Edge
    /// endpoints must name existing nodes.
    pub fn new(positions: Vec<(f32, f32)>, edges: &[(usize, usize)]) -> Result<Self, DatasetError> {
        let nodes: Vec<GraphNode> = positions
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| GraphNode {
                id: NodeId(i),
                x,
                y,
            })
            .collect();

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for &(a, b) in edges {
            if a >= nodes.len() {
                return Err(DatasetError::UnknownNode(a));
            }
            if b >= nodes.len() {
                return Err(DatasetError::UnknownNode(b));
            }
            if a == b {
                continue;
            }
            if !adjacency[a].contains(&NodeId(b)) {
                adjacency[a].push(NodeId(b));
            }
            if !adjacency[b].contains(&NodeId(a)) {
                adjacency[b].push(NodeId(a));
            }
        }
        for list in &mut adjacency {
            list.sort();
        }

        Ok(Self {
            nodes,
            adjacency,
            start: None,
        })
    }

    /// Generate a connected random graph: each node past the first links to a
    /// random earlier node, then `extra_edges` random edges are added.
    pub fn random<R: Rng>(node_count: usize, extra_edges: usize, rng: &mut R) -> Self {
        let positions: Vec<(f32, f32)> = (0..node_count)
            .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        let mut edges = Vec::new();
        for i in 1..node_count {
            edges.push((i, rng.gen_range(0..i)));
        }
        if node_count >= 2 {
            for _ in 0..extra_edges {
                let a = rng.gen_range(0..node_count);
                let b = rng.gen_range(0..node_count);
                if a != b {
                    edges.push((a, b));
                }
            }
        }

        // Edge list is valid by construction.
        Self::new(positions, &edges).expect("generated edges reference existing nodes")
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Neighbors of a node, sorted by id.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All undirected edges, each reported once with `a < b`.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for (i, list) in self.adjacency.iter().enumerate() {
            for &NodeId(j) in list {
                if i < j {
                    out.push((NodeId(i), NodeId(j)));
                }
            }
        }
        out
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    /// Select (or clear) the traversal start node.
    pub fn set_start(&mut self, node: Option<NodeId>) -> Result<(), DatasetError> {
        if let Some(NodeId(id)) = node {
            if id >= self.nodes.len() {
                return Err(DatasetError::UnknownNode(id));
            }
        }
        self.start = node;
        Ok(())
    }

    /// Reposition a node (layout only; adjacency is untouched).
    pub fn move_node(&mut self, node: NodeId, x: f32, y: f32) -> Result<(), DatasetError> {
        let entry = self
            .nodes
            .get_mut(node.0)
            .ok_or(DatasetError::UnknownNode(node.0))?;
        entry.x = x;
        entry.y = y;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn path_graph() -> Graph {
        // 0 - 1 - 2
        Graph::new(vec![(0.0, 0.0), (0.5, 0.0), (1.0, 0.0)], &[(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = path_graph();

        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1)]);
        assert_eq!(graph.neighbors(NodeId(1)), &[NodeId(0), NodeId(2)]);
        assert_eq!(graph.neighbors(NodeId(2)), &[NodeId(1)]);
    }

    #[test]
    fn duplicate_and_self_edges_dropped() {
        let graph = Graph::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            &[(0, 1), (1, 0), (0, 1), (0, 0)],
        )
        .unwrap();

        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1)]);
        assert_eq!(graph.edges(), vec![(NodeId(0), NodeId(1))]);
    }

    #[test]
    fn unknown_edge_endpoint_rejected() {
        let result = Graph::new(vec![(0.0, 0.0)], &[(0, 5)]);
        assert_eq!(result.err(), Some(DatasetError::UnknownNode(5)));
    }

    #[test]
    fn random_graph_is_connected() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = Graph::random(20, 5, &mut rng);

        // Walk from node 0; every node must be reachable.
        let mut seen = vec![false; graph.node_count()];
        let mut stack = vec![NodeId(0)];
        seen[0] = true;
        while let Some(node) = stack.pop() {
            for &next in graph.neighbors(node) {
                if !seen[next.0] {
                    seen[next.0] = true;
                    stack.push(next);
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn start_selection_validated() {
        let mut graph = path_graph();

        assert!(graph.set_start(Some(NodeId(2))).is_ok());
        assert_eq!(graph.start(), Some(NodeId(2)));

        assert_eq!(
            graph.set_start(Some(NodeId(9))),
            Err(DatasetError::UnknownNode(9))
        );

        graph.set_start(None).unwrap();
        assert_eq!(graph.start(), None);
    }

    #[test]
    fn move_node_updates_position() {
        let mut graph = path_graph();
        graph.move_node(NodeId(1), 0.25, 0.75).unwrap();

        let node = &graph.nodes()[1];
        assert_eq!((node.x, node.y), (0.25, 0.75));
    }
}
