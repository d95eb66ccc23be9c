//! All-pairs distances via min-plus matrix composition.
//!
//! `slow_all_pairs` extends path length by one edge per round against the
//! original weight matrix (`n - 1` rounds, `O(V⁴)`). `faster_all_pairs` doubles
//! the covered path length by squaring (`⌈log₂(n - 1)⌉` squarings, `O(V³ log V)`).
//! Both reach the same fixed point when no negative cycle exists.

use tracing::debug;

use crate::apsp::AllPairs;
use crate::graph::Graph;
use crate::matrix::DistanceMatrix;

/// One extension round: `min(current, current ⊗ weights)`.
pub fn extend(current: &DistanceMatrix, weights: &DistanceMatrix) -> DistanceMatrix {
    let mut next = current.min_plus_product(weights);
    next.min_with(current);
    next
}

/// Rounds performed by [`slow_all_pairs`] on `n` nodes.
pub fn slow_round_count(n: usize) -> usize {
    n.saturating_sub(1)
}

/// Squarings performed by [`faster_all_pairs`] on `n` nodes.
pub fn faster_squaring_count(n: usize) -> usize {
    let target = n.saturating_sub(1);
    let mut covered = 1;
    let mut squarings = 0;
    while covered < target {
        covered *= 2;
        squarings += 1;
    }
    squarings
}

pub fn slow_all_pairs(graph: &Graph) -> AllPairs {
    let (weights, nodes) = DistanceMatrix::from_graph(graph);
    let rounds = slow_round_count(nodes.len());

    let mut current = weights.clone();
    for _ in 0..rounds {
        current = extend(&current, &weights);
    }

    debug!(nodes = nodes.len(), rounds, "slow min-plus complete");
    AllPairs {
        nodes,
        matrix: current,
    }
}

pub fn faster_all_pairs(graph: &Graph) -> AllPairs {
    let (mut current, nodes) = DistanceMatrix::from_graph(graph);
    let target = nodes.len().saturating_sub(1);

    let mut covered = 1;
    let mut squarings = 0;
    while covered < target {
        // The zero diagonal keeps the k = i and k = j terms, so no value is lost.
        current = current.min_plus_product(&current);
        covered *= 2;
        squarings += 1;
    }

    debug!(nodes = nodes.len(), squarings, "repeated squaring complete");
    AllPairs {
        nodes,
        matrix: current,
    }
}
