//! Single-source label-setting shortest paths, recorded one micro-step at a time.
//!
//! The relaxation loop is written once and driven through a recorder:
//! the step recorder snapshots state for replay, the plain recorder does
//! nothing. Stepping through the recorded sequence therefore ends on exactly
//! the state a direct run produces.
//!
//! Selection scans the unvisited set in lexicographic order and takes the first
//! node with the smallest distance, so ties go to the smallest id. When that
//! smallest distance is [`INF`] the select step is still recorded, but the node
//! stays unvisited and the run stops there.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::adjacency::AdjacencyIndex;
use crate::graph::{dist_add, format_distance, Graph, NodeId, Weight, INF};
use crate::stepper::{Step, Stepper};

/// Running distances plus the visited / unvisited partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DijkstraState {
    pub distances: BTreeMap<NodeId, Weight>,
    pub visited: BTreeSet<NodeId>,
    pub unvisited: BTreeSet<NodeId>,
}

impl DijkstraState {
    /// Source at 0, everything else at [`INF`], nothing visited.
    fn initial(adj: &AdjacencyIndex, source: &str) -> Self {
        let nodes = adj.sorted_nodes();
        let distances = nodes
            .iter()
            .map(|id| (id.clone(), if id == source { 0 } else { INF }))
            .collect();
        Self {
            distances,
            visited: BTreeSet::new(),
            unvisited: nodes.into_iter().collect(),
        }
    }

    pub fn distance(&self, id: &str) -> Option<Weight> {
        self.distances.get(id).copied()
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// Nodes with a finite distance, in id order.
    pub fn reachable(&self) -> impl Iterator<Item = (&NodeId, Weight)> {
        self.distances
            .iter()
            .filter(|(_, &d)| d < INF)
            .map(|(id, &d)| (id, d))
    }

    /// Unvisited node with the smallest distance, [`INF`] included; ties go to the smallest id.
    fn closest_unvisited(&self) -> Option<(NodeId, Weight)> {
        self.unvisited
            .iter()
            .map(|id| (id, self.distances.get(id).copied().unwrap_or(INF)))
            .min_by_key(|&(_, d)| d)
            .map(|(id, d)| (id.clone(), d))
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DijkstraAction {
    /// `node` was taken from the unvisited set; its distance is now final.
    Select { node: NodeId, distance: Weight },
    /// Relaxing `node -> neighbor` lowered the neighbor's distance.
    Update {
        node: NodeId,
        neighbor: NodeId,
        old_distance: Weight,
        new_distance: Weight,
    },
}

impl DijkstraAction {
    /// The node the step acted on (the selected node, for updates too).
    pub fn node(&self) -> &str {
        match self {
            DijkstraAction::Select { node, .. } | DijkstraAction::Update { node, .. } => node,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, DijkstraAction::Select { .. })
    }
}

/// One recorded micro-step with the full state right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DijkstraStep {
    pub action: DijkstraAction,
    pub state: DijkstraState,
    pub description: String,
}

impl Step for DijkstraStep {
    type State = DijkstraState;

    fn state(&self) -> &DijkstraState {
        &self.state
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DijkstraOutcome {
    /// The source is not in the node set; nothing was selected.
    SourceMissing,
    /// Every node was visited.
    Exhausted,
    /// Stopped because the remaining unvisited nodes are all at [`INF`].
    Unreachable { remaining: usize },
}

/// Observer for the relaxation loop.
trait Recorder {
    fn select(&mut self, state: &DijkstraState, node: &str, distance: Weight);

    fn update(
        &mut self,
        state: &DijkstraState,
        node: &str,
        neighbor: &str,
        old_distance: Weight,
        new_distance: Weight,
    );
}

struct NoopRecorder;

impl Recorder for NoopRecorder {
    fn select(&mut self, _: &DijkstraState, _: &str, _: Weight) {}

    fn update(&mut self, _: &DijkstraState, _: &str, _: &str, _: Weight, _: Weight) {}
}

#[derive(Default)]
struct StepRecorder {
    steps: Vec<DijkstraStep>,
}

impl Recorder for StepRecorder {
    fn select(&mut self, state: &DijkstraState, node: &str, distance: Weight) {
        self.steps.push(DijkstraStep {
            action: DijkstraAction::Select {
                node: node.to_string(),
                distance,
            },
            state: state.clone(),
            description: format!(
                "Select {} with distance {}",
                node,
                format_distance(distance)
            ),
        });
    }

    fn update(
        &mut self,
        state: &DijkstraState,
        node: &str,
        neighbor: &str,
        old_distance: Weight,
        new_distance: Weight,
    ) {
        self.steps.push(DijkstraStep {
            action: DijkstraAction::Update {
                node: node.to_string(),
                neighbor: neighbor.to_string(),
                old_distance,
                new_distance,
            },
            state: state.clone(),
            description: format!(
                "Update {} via {}: {} -> {}",
                neighbor,
                node,
                format_distance(old_distance),
                new_distance
            ),
        });
    }
}

/// Tracks the last improving predecessor of every node.
#[derive(Default)]
struct PredecessorRecorder {
    parent: HashMap<NodeId, NodeId>,
}

impl Recorder for PredecessorRecorder {
    fn select(&mut self, _: &DijkstraState, _: &str, _: Weight) {}

    fn update(&mut self, _: &DijkstraState, node: &str, neighbor: &str, _: Weight, _: Weight) {
        self.parent.insert(neighbor.to_string(), node.to_string());
    }
}

fn relax<R: Recorder>(
    adj: &AdjacencyIndex,
    source: &str,
    recorder: &mut R,
) -> (DijkstraState, DijkstraOutcome) {
    let mut state = DijkstraState::initial(adj, source);
    if !adj.contains(source) {
        return (state, DijkstraOutcome::SourceMissing);
    }

    while let Some((current, current_dist)) = state.closest_unvisited() {
        if current_dist >= INF {
            // Everything left is unreachable: record the selection, visit nothing.
            recorder.select(&state, &current, current_dist);
            break;
        }
        state.unvisited.remove(&current);
        state.visited.insert(current.clone());
        recorder.select(&state, &current, current_dist);

        for (neighbor, weight) in adj.neighbors(&current) {
            if !state.unvisited.contains(neighbor) {
                continue;
            }
            let candidate = dist_add(current_dist, *weight);
            let Some(old) = state.distances.get(neighbor).copied() else {
                continue;
            };
            if candidate < old {
                state.distances.insert(neighbor.clone(), candidate);
                recorder.update(&state, &current, neighbor, old, candidate);
            }
        }
    }

    let outcome = if state.unvisited.is_empty() {
        DijkstraOutcome::Exhausted
    } else {
        DijkstraOutcome::Unreachable {
            remaining: state.unvisited.len(),
        }
    };
    (state, outcome)
}

/// Record every select and update step of a run from `source`.
///
/// An unknown source yields an empty sequence.
pub fn compute_steps(graph: &Graph, source: &str) -> Vec<DijkstraStep> {
    let adj = AdjacencyIndex::build(graph);
    record(&adj, source).0
}

fn record(adj: &AdjacencyIndex, source: &str) -> (Vec<DijkstraStep>, DijkstraOutcome) {
    let mut recorder = StepRecorder::default();
    let (_, outcome) = relax(adj, source, &mut recorder);
    debug!(
        source,
        nodes = adj.node_count(),
        edges = adj.edge_count(),
        steps = recorder.steps.len(),
        ?outcome,
        "dijkstra steps recorded"
    );
    (recorder.steps, outcome)
}

/// Final distances from `source` without recording steps.
pub fn shortest_distances(graph: &Graph, source: &str) -> DijkstraState {
    distances_from(&AdjacencyIndex::build(graph), source)
}

pub(crate) fn distances_from(adj: &AdjacencyIndex, source: &str) -> DijkstraState {
    relax(adj, source, &mut NoopRecorder).0
}

/// One shortest path `source -> target` as a node sequence including both ends.
///
/// Returns None if either node is unknown or the target is unreachable.
pub fn shortest_path(graph: &Graph, source: &str, target: &str) -> Option<Vec<NodeId>> {
    let adj = AdjacencyIndex::build(graph);
    if !adj.contains(target) {
        return None;
    }
    let mut recorder = PredecessorRecorder::default();
    let (state, _) = relax(&adj, source, &mut recorder);
    if state.distance(target)? >= INF {
        return None;
    }

    let mut path = vec![target.to_string()];
    let mut current = target;
    while current != source {
        current = recorder.parent.get(current).map(String::as_str)?;
        path.push(current.to_string());
    }
    path.reverse();
    Some(path)
}

/// A recorded run from one source, replayed through a [`Stepper`].
pub struct DijkstraRun {
    source: NodeId,
    outcome: DijkstraOutcome,
    stepper: Stepper<DijkstraStep>,
}

impl DijkstraRun {
    /// Step mode: the visible state starts at the initial distances.
    pub fn new(graph: &Graph, source: &str) -> Self {
        let adj = AdjacencyIndex::build(graph);
        if !adj.contains(source) {
            warn!(source, "dijkstra source is not in the node set");
        }
        let initial = DijkstraState::initial(&adj, source);
        let (steps, outcome) = record(&adj, source);
        Self {
            source: source.to_string(),
            outcome,
            stepper: Stepper::new(initial, steps),
        }
    }

    /// Complete mode: the whole sequence is computed and only the terminal state is visible.
    pub fn complete(graph: &Graph, source: &str) -> Self {
        let mut run = Self::new(graph, source);
        run.stepper.finish();
        run
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn outcome(&self) -> DijkstraOutcome {
        self.outcome
    }

    pub fn next_step(&mut self) -> Option<&DijkstraStep> {
        self.stepper.next_step()
    }

    pub fn last_step(&self) -> Option<&DijkstraStep> {
        self.stepper.last_step()
    }

    pub fn current_state(&self) -> &DijkstraState {
        self.stepper.current_state()
    }

    /// Node acted on by the last applied step.
    pub fn current_node(&self) -> Option<&str> {
        self.stepper.last_step().map(|s| s.action.node())
    }

    pub fn finish(&mut self) -> &DijkstraState {
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

    pub fn steps(&self) -> &[DijkstraStep] {
        self.stepper.steps()
    }
}
