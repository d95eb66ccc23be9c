//! Graph builders shared by the unit tests.

use std::collections::HashSet;

use crate::graph::{Graph, Weight};

/// Simple LCG for deterministic pseudo-random graphs.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

pub fn node_name(i: u64) -> String {
    format!("n{:03}", i)
}

/// `{A,B,C}` with `A->B=4, B->C=2, A->C=10`.
pub fn scenario_a() -> Graph {
    Graph::from_edges(vec![("A", "B", 4), ("B", "C", 2), ("A", "C", 10)])
}

/// `A->B->C->D->A`, all weights 1.
pub fn four_cycle() -> Graph {
    Graph::from_edges(vec![("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "A", 1)])
}

/// `n000 -> n001 -> ... -> n{n-1}` with weight `w`.
pub fn make_chain(n: u64, w: Weight) -> Graph {
    let mut g = Graph::new();
    g.add_node(node_name(0));
    g.load_edges((0..n.saturating_sub(1)).map(|i| (node_name(i), node_name(i + 1), w)));
    g
}

/// Random directed graph with non-negative weights. Some nodes may be isolated.
///
/// At most one edge per ordered pair, so matrix and adjacency views agree.
pub fn random_graph(seed: u64, n: u64, m: u64, max_weight: u64) -> Graph {
    let mut rng = FastRng::new(seed);
    let mut g = Graph::with_capacity(n as usize, m as usize);
    for i in 0..n {
        g.add_node(node_name(i));
    }
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    for _ in 0..m {
        let from = rng.next(n);
        let to = rng.next(n);
        let w = rng.next(max_weight + 1) as Weight;
        if seen.insert((from, to)) {
            g.add_edge(node_name(from), node_name(to), w);
        }
    }
    g
}
