//! All-pairs distances by running single-source Dijkstra from every node.
//!
//! Named after Johnson's algorithm, but the Bellman-Ford reweighting phase is
//! not performed: results are only correct when every edge weight is
//! non-negative.

use tracing::debug;

use crate::adjacency::AdjacencyIndex;
use crate::apsp::AllPairs;
use crate::dijkstra::distances_from;
use crate::graph::{Graph, INF};
use crate::matrix::DistanceMatrix;

pub fn all_pairs(graph: &Graph) -> AllPairs {
    let adj = AdjacencyIndex::build(graph);
    let nodes = adj.sorted_nodes();
    let mut matrix = DistanceMatrix::unreachable(nodes.len());

    for (i, source) in nodes.iter().enumerate() {
        let state = distances_from(&adj, source);
        for (j, target) in nodes.iter().enumerate() {
            let d = state.distance(target).unwrap_or(INF);
            matrix.set(i, j, d.min(INF));
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = adj.edge_count(),
        "repeated dijkstra complete"
    );
    AllPairs { nodes, matrix }
}
