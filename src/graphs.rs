use std::collections::VecDeque;

use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::MazeGrid;
use crate::utils::{fnv_hashmap, FnvHashMap};

/// The passage cells of a grid as an undirected graph, one edge per pair of orthogonally
/// adjacent passages.
///
/// A perfect maze is exactly a tree here. This is how the tests and benches check the
/// generator's output; it does not look for routes through the maze.
#[derive(Debug, Clone)]
pub struct PassageGraph {
    graph: UnGraph<Cartesian2DCoordinate, ()>,
    nodes: FnvHashMap<Cartesian2DCoordinate, NodeIndex>,
}

impl PassageGraph {
    pub fn from_grid(grid: &MazeGrid) -> PassageGraph {
        let passages_count = grid.passage_count();
        let mut graph = UnGraph::with_capacity(passages_count, passages_count);
        let mut nodes = fnv_hashmap(passages_count);

        for coord in grid.iter().filter(|&coord| grid.is_passage(coord)) {
            nodes.insert(coord, graph.add_node(coord));
        }

        // Looking only east and south adds each adjacency once.
        for (&coord, &node) in &nodes {
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(&neighbour) = nodes.get(&coord.offset(dir, 1)) {
                    graph.add_edge(node, neighbour, ());
                }
            }
        }

        PassageGraph { graph, nodes }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// An empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        self.node_count() > 0 && connected_components(&self.graph) == 1
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_undirected(&self.graph)
    }

    /// Connected, loop free, and so exactly one fewer edge than nodes.
    pub fn is_perfect(&self) -> bool {
        self.is_connected() && self.is_acyclic() && self.edge_count() + 1 == self.node_count()
    }

    /// Breadth first step counts from `start` to every passage reachable from it.
    /// None if `start` is not a passage.
    pub fn depths_from(&self,
                       start: Cartesian2DCoordinate)
                       -> Option<FnvHashMap<Cartesian2DCoordinate, usize>> {
        let start_node = *self.nodes.get(&start)?;

        let mut depths = fnv_hashmap(self.node_count());
        let mut frontier = VecDeque::new();
        depths.insert(start, 0);
        frontier.push_back((start_node, 0));

        while let Some((node, depth)) = frontier.pop_front() {
            for neighbour in self.graph.neighbors(node) {
                let coord = self.graph[neighbour];
                if !depths.contains_key(&coord) {
                    depths.insert(coord, depth + 1);
                    frontier.push_back((neighbour, depth + 1));
                }
            }
        }

        Some(depths)
    }
}
