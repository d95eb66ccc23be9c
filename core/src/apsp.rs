use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::graph::{Graph, NodeId, Weight};
use crate::matrix::DistanceMatrix;
use crate::{floyd_warshall, johnson, min_plus};

/// A distance matrix together with the sorted node order indexing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllPairs {
    pub nodes: Vec<NodeId>,
    pub matrix: DistanceMatrix,
}

impl AllPairs {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.binary_search_by(|n| n.as_str().cmp(id)).ok()
    }

    /// Distance `from -> to`, [`INF`](crate::INF) if unreachable, None if either node is unknown.
    pub fn distance(&self, from: &str, to: &str) -> Option<Weight> {
        Some(self.matrix.get(self.index_of(from)?, self.index_of(to)?))
    }
}

/// The all-pairs strategies that produce a single final matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllPairsAlgorithm {
    FloydWarshall,
    /// Repeated single-source Dijkstra; no reweighting, non-negative weights only.
    Johnson,
    SlowApsp,
    FasterApsp,
}

impl AllPairsAlgorithm {
    pub const ALL: [AllPairsAlgorithm; 4] = [
        AllPairsAlgorithm::FloydWarshall,
        AllPairsAlgorithm::Johnson,
        AllPairsAlgorithm::SlowApsp,
        AllPairsAlgorithm::FasterApsp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AllPairsAlgorithm::FloydWarshall => "floyd-warshall",
            AllPairsAlgorithm::Johnson => "johnson",
            AllPairsAlgorithm::SlowApsp => "slow-apsp",
            AllPairsAlgorithm::FasterApsp => "faster-apsp",
        }
    }

    pub fn run(self, graph: &Graph) -> AllPairs {
        match self {
            AllPairsAlgorithm::FloydWarshall => floyd_warshall::all_pairs(graph),
            AllPairsAlgorithm::Johnson => johnson::all_pairs(graph),
            AllPairsAlgorithm::SlowApsp => min_plus::slow_all_pairs(graph),
            AllPairsAlgorithm::FasterApsp => min_plus::faster_all_pairs(graph),
        }
    }
}

impl fmt::Display for AllPairsAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown all-pairs algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AllPairsAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "floyd-warshall" | "floyd" | "fw" => Ok(AllPairsAlgorithm::FloydWarshall),
            "johnson" | "repeated-dijkstra" => Ok(AllPairsAlgorithm::Johnson),
            "slow-apsp" | "slow" => Ok(AllPairsAlgorithm::SlowApsp),
            "faster-apsp" | "faster" | "fast" => Ok(AllPairsAlgorithm::FasterApsp),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::INF;
    use crate::test_graphs::{four_cycle, random_graph, scenario_a};
    use pretty_assertions::assert_eq;

    fn run_all(graph: &Graph) -> Vec<AllPairs> {
        AllPairsAlgorithm::ALL.iter().map(|a| a.run(graph)).collect()
    }

    #[test]
    fn test_algorithms_agree_on_random_graphs() {
        for seed in 1..12 {
            let g = random_graph(seed, 3 + seed % 9, seed * 4, 25);
            let results = run_all(&g);
            for (algo, result) in AllPairsAlgorithm::ALL.iter().zip(&results) {
                assert_eq!(result, &results[0], "{} disagrees on seed {}", algo, seed);
            }
        }
    }

    #[test]
    fn test_algorithms_agree_on_scenarios() {
        for g in [scenario_a(), four_cycle()] {
            let results = run_all(&g);
            assert!(results.iter().all(|r| r == &results[0]));
        }
    }

    #[test]
    fn test_scenario_c_single_node() {
        let mut g = Graph::new();
        g.add_node("X");
        for result in run_all(&g) {
            assert_eq!(result.matrix.rows(), vec![vec![0]]);
            assert_eq!(result.nodes, vec!["X"]);
        }
    }

    #[test]
    fn test_scenario_d_no_edges() {
        let mut g = Graph::new();
        g.add_node("B");
        g.add_node("A");
        for result in run_all(&g) {
            assert_eq!(result.nodes, vec!["A", "B"]);
            assert_eq!(result.matrix.rows(), vec![vec![0, INF], vec![INF, 0]]);
        }
    }

    #[test]
    fn test_diagonal_is_zero() {
        let g = random_graph(7, 10, 35, 40);
        for result in run_all(&g) {
            assert!(result.matrix.has_zero_diagonal());
        }
    }

    #[test]
    fn test_empty_graph_returns_empty() {
        for result in run_all(&Graph::new()) {
            assert!(result.is_empty());
            assert!(result.matrix.is_empty());
        }
    }

    #[test]
    fn test_distance_lookup() {
        let result = AllPairsAlgorithm::FloydWarshall.run(&scenario_a());
        assert_eq!(result.distance("A", "C"), Some(6));
        assert_eq!(result.distance("C", "A"), Some(INF));
        assert_eq!(result.distance("A", "Z"), None);
    }

    #[test]
    fn test_parse_names() {
        for algo in AllPairsAlgorithm::ALL {
            assert_eq!(algo.name().parse::<AllPairsAlgorithm>(), Ok(algo));
        }
        assert_eq!("FW".parse::<AllPairsAlgorithm>(), Ok(AllPairsAlgorithm::FloydWarshall));
        assert_eq!("faster_apsp".parse::<AllPairsAlgorithm>(), Ok(AllPairsAlgorithm::FasterApsp));
        assert_eq!(
            "bellman".parse::<AllPairsAlgorithm>(),
            Err(UnknownAlgorithm("bellman".to_string()))
        );
    }
}
