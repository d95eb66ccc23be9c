//! All-pairs shortest paths by triple relaxation, with a matrix snapshot per change.
//!
//! Intermediate vertex `k` is the outer loop, then `i`, then `j`, all in sorted
//! node order. Every improving relaxation records an updated step; every
//! finished `k` records a checkpoint whether or not anything changed.
//! No negative-cycle detection is performed.

use serde::Serialize;
use tracing::{debug, trace};

use crate::apsp::AllPairs;
use crate::graph::{dist_add, format_distance, Graph, NodeId};
use crate::matrix::DistanceMatrix;
use crate::stepper::{Step, Stepper};

/// Where in the derivation a step was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FloydWarshallPhase {
    /// The direct weight matrix, before any relaxation.
    Initial,
    /// `dist[i][j]` improved through intermediate vertex `k`.
    Relaxed { k: usize, i: usize, j: usize },
    /// All `i, j` pairs have been tried against vertex `k`.
    Checkpoint { k: usize },
}

/// One recorded step with the full matrix right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloydWarshallStep {
    pub phase: FloydWarshallPhase,
    pub matrix: DistanceMatrix,
    pub description: String,
    /// True for cell updates, false for the initial snapshot and checkpoints.
    pub updated: bool,
}

impl FloydWarshallStep {
    /// `(k, i, j)` with `-1` for the initial snapshot and for checkpoints.
    pub fn indices(&self) -> (i64, i64, i64) {
        match self.phase {
            FloydWarshallPhase::Relaxed { k, i, j } => (k as i64, i as i64, j as i64),
            FloydWarshallPhase::Initial | FloydWarshallPhase::Checkpoint { .. } => (-1, -1, -1),
        }
    }
}

impl Step for FloydWarshallStep {
    type State = DistanceMatrix;

    fn state(&self) -> &DistanceMatrix {
        &self.matrix
    }
}

/// Run every `k, i, j` relaxation on `matrix`, reporting each phase boundary.
fn relax_all<F>(matrix: &mut DistanceMatrix, mut observe: F)
where
    F: FnMut(FloydWarshallPhase, &DistanceMatrix),
{
    let n = matrix.size();
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through_k = dist_add(matrix.get(i, k), matrix.get(k, j));
                if through_k < matrix.get(i, j) {
                    matrix.set(i, j, through_k);
                    observe(FloydWarshallPhase::Relaxed { k, i, j }, matrix);
                }
            }
        }
        observe(FloydWarshallPhase::Checkpoint { k }, matrix);
    }
}

/// One full relaxation pass over an existing matrix. Returns how many cells changed.
///
/// A completed matrix is a fixed point, so this returns 0 on it.
pub fn relax_in_place(matrix: &mut DistanceMatrix) -> usize {
    let mut changed = 0;
    relax_all(matrix, |phase, _| {
        if matches!(phase, FloydWarshallPhase::Relaxed { .. }) {
            changed += 1;
        }
    });
    changed
}

/// Record the initial snapshot, every update, and every per-`k` checkpoint.
///
/// Returns the sorted node order alongside the steps. An empty graph yields no steps.
pub fn compute_steps(graph: &Graph) -> (Vec<NodeId>, Vec<FloydWarshallStep>) {
    let (mut matrix, nodes) = DistanceMatrix::from_graph(graph);
    if nodes.is_empty() {
        return (nodes, Vec::new());
    }

    let mut steps = vec![FloydWarshallStep {
        phase: FloydWarshallPhase::Initial,
        matrix: matrix.clone(),
        description: "Initial distance matrix".to_string(),
        updated: false,
    }];

    relax_all(&mut matrix, |phase, snapshot| {
        let (description, updated) = match phase {
            FloydWarshallPhase::Relaxed { k, i, j } => {
                let old = steps
                    .last()
                    .map(|s| s.matrix.get(i, j))
                    .unwrap_or_else(|| snapshot.get(i, j));
                (
                    format!(
                        "Update dist[{}][{}] via {}: {} -> {}",
                        nodes[i],
                        nodes[j],
                        nodes[k],
                        format_distance(old),
                        snapshot.get(i, j)
                    ),
                    true,
                )
            }
            FloydWarshallPhase::Checkpoint { k } => {
                trace!(k = %nodes[k], "floyd-warshall checkpoint");
                (format!("Finished intermediate vertex {}", nodes[k]), false)
            }
            FloydWarshallPhase::Initial => ("Initial distance matrix".to_string(), false),
        };
        steps.push(FloydWarshallStep {
            phase,
            matrix: snapshot.clone(),
            description,
            updated,
        });
    });

    debug!(
        nodes = nodes.len(),
        edges = graph.edge_count(),
        steps = steps.len(),
        "floyd-warshall steps recorded"
    );
    (nodes, steps)
}

/// Final matrix without recording snapshots.
pub fn all_pairs(graph: &Graph) -> AllPairs {
    let (mut matrix, nodes) = DistanceMatrix::from_graph(graph);
    let changed = relax_in_place(&mut matrix);
    debug!(nodes = nodes.len(), changed, "floyd-warshall complete");
    AllPairs { nodes, matrix }
}

/// A recorded derivation replayed through a [`Stepper`].
pub struct FloydWarshallRun {
    nodes: Vec<NodeId>,
    stepper: Stepper<FloydWarshallStep>,
}

impl FloydWarshallRun {
    /// Step mode: the visible matrix starts as the direct weight matrix.
    pub fn new(graph: &Graph) -> Self {
        let (initial, _) = DistanceMatrix::from_graph(graph);
        let (nodes, steps) = compute_steps(graph);
        Self {
            nodes,
            stepper: Stepper::new(initial, steps),
        }
    }

    /// Complete mode: only the fixed point is visible.
    pub fn complete(graph: &Graph) -> Self {
        let mut run = Self::new(graph);
        run.stepper.finish();
        run
    }

    /// Sorted node order for rows and columns.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn next_step(&mut self) -> Option<&FloydWarshallStep> {
        self.stepper.next_step()
    }

    pub fn last_step(&self) -> Option<&FloydWarshallStep> {
        self.stepper.last_step()
    }

    /// The currently visible matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        self.stepper.current_state()
    }

    /// Final matrix and node order, regardless of the cursor position.
    pub fn result(&self) -> AllPairs {
        let matrix = self
            .stepper
            .steps()
            .last()
            .map(|s| s.matrix.clone())
            .unwrap_or_else(|| self.stepper.initial_state().clone());
        AllPairs {
            nodes: self.nodes.clone(),
            matrix,
        }
    }

    pub fn finish(&mut self) -> &DistanceMatrix {
        self.stepper.finish()
    }

    pub fn reset(&mut self) {
        self.stepper.reset();
    }

    pub fn position(&self) -> usize {
        self.stepper.position()
    }

    pub fn len(&self) -> usize {
        self.stepper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stepper.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.stepper.is_finished()
    }

    pub fn steps(&self) -> &[FloydWarshallStep] {
        self.stepper.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::INF;
    use crate::test_graphs::{four_cycle, random_graph, scenario_a};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scenario_b_final_matrix() {
        let result = all_pairs(&scenario_a());
        assert_eq!(result.nodes, vec!["A", "B", "C"]);
        assert_eq!(
            result.matrix.rows(),
            vec![vec![0, 4, 6], vec![INF, 0, 2], vec![INF, INF, 0]]
        );
    }

    #[test]
    fn test_scenario_b_step_sequence() {
        let (nodes, steps) = compute_steps(&scenario_a());
        assert_eq!(nodes, vec!["A", "B", "C"]);
        // initial + one update (A->C via B) + three checkpoints
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].phase, FloydWarshallPhase::Initial);
        assert_eq!(steps[0].indices(), (-1, -1, -1));
        assert_eq!(steps[1].phase, FloydWarshallPhase::Checkpoint { k: 0 });
        assert!(!steps[1].updated);
        assert_eq!(steps[2].phase, FloydWarshallPhase::Relaxed { k: 1, i: 0, j: 2 });
        assert_eq!(steps[2].indices(), (1, 0, 2));
        assert!(steps[2].updated);
        assert_eq!(steps[2].description, "Update dist[A][C] via B: 10 -> 6");
        assert_eq!(steps[3].phase, FloydWarshallPhase::Checkpoint { k: 1 });
        assert_eq!(steps[3].description, "Finished intermediate vertex B");
        assert_eq!(steps[4].phase, FloydWarshallPhase::Checkpoint { k: 2 });
        assert_eq!(steps[4].indices(), (-1, -1, -1));
    }

    #[test]
    fn test_checkpoint_per_vertex_even_without_changes() {
        let mut g = Graph::new();
        for id in ["X", "Y", "Z"] {
            g.add_node(id);
        }
        let (_, steps) = compute_steps(&g);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| !s.updated));
    }

    #[test]
    fn test_single_isolated_node() {
        let mut g = Graph::new();
        g.add_node("X");
        assert_eq!(all_pairs(&g).matrix.rows(), vec![vec![0]]);
    }

    #[test]
    fn test_disconnected_pair() {
        let mut g = Graph::new();
        g.add_node("A");
        g.add_node("B");
        assert_eq!(
            all_pairs(&g).matrix.rows(),
            vec![vec![0, INF], vec![INF, 0]]
        );
    }

    #[test]
    fn test_empty_graph_is_noop() {
        let (nodes, steps) = compute_steps(&Graph::new());
        assert!(nodes.is_empty());
        assert!(steps.is_empty());
        let run = FloydWarshallRun::complete(&Graph::new());
        assert!(run.is_empty());
        assert!(run.result().is_empty());
    }

    #[test]
    fn test_completed_matrix_is_fixed_point() {
        for seed in 1..6 {
            let mut matrix = all_pairs(&random_graph(seed, 10, 30, 15)).matrix;
            assert!(matrix.is_fixed_point());
            assert!(matrix.has_zero_diagonal());
            assert_eq!(relax_in_place(&mut matrix), 0);
        }
    }

    #[test]
    fn test_steps_end_on_direct_result() {
        for seed in 1..6 {
            let g = random_graph(seed, 8, 20, 9);
            let (_, steps) = compute_steps(&g);
            assert_eq!(steps.last().unwrap().matrix, all_pairs(&g).matrix);
        }
    }

    #[test]
    fn test_snapshots_never_increase() {
        let (_, steps) = compute_steps(&random_graph(3, 9, 25, 12));
        for pair in steps.windows(2) {
            let n = pair[0].matrix.size();
            for i in 0..n {
                for j in 0..n {
                    assert!(pair[1].matrix.get(i, j) <= pair[0].matrix.get(i, j));
                }
            }
        }
    }

    #[test]
    fn test_step_mode_run() {
        let mut run = FloydWarshallRun::new(&four_cycle());
        assert_eq!(run.position(), 0);
        assert_eq!(run.matrix().get(0, 2), INF);

        let first = run.next_step().unwrap();
        assert_eq!(first.phase, FloydWarshallPhase::Initial);

        while run.next_step().is_some() {}
        assert!(run.is_finished());
        assert_eq!(run.matrix().get(0, 2), 2);
        assert_eq!(run.matrix().get(3, 2), 3);
        assert_eq!(run.matrix(), &run.result().matrix);
    }

    #[test]
    fn test_complete_mode_matches_stepping() {
        let g = random_graph(11, 7, 18, 10);
        let mut stepped = FloydWarshallRun::new(&g);
        while stepped.next_step().is_some() {}
        let completed = FloydWarshallRun::complete(&g);
        assert_eq!(stepped.matrix(), completed.matrix());
        assert_eq!(completed.nodes(), g.sorted_nodes().as_slice());
    }
}
