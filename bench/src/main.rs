use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use pathstep_core::{dijkstra, floyd_warshall, AllPairs, AllPairsAlgorithm, Graph, Weight};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Above this the `O(V⁴)` engine is skipped.
const SLOW_APSP_LIMIT: usize = 128;

/// Above this the Floyd-Warshall step recording (one matrix per step) is skipped.
const STEP_RECORD_LIMIT: usize = 96;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(64);

    if mode == "help" || mode == "--help" {
        println!("Usage: pathstep-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Branching tree (deep paths, mostly unreachable pairs)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!("  chain       Single directed path (worst case for min-plus rounds)");
        println!();
        println!("Default node_count: 64");
        println!("Set RUST_LOG=pathstep_core=debug for per-engine logging.");
        return;
    }

    println!("pathstep-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "tree" => vec![("Branching tree", gen_tree)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "chain" => vec![("Chain", gen_chain)],
        "all" => vec![
            ("Branching tree", gen_tree as fn(u64) -> Graph),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
            ("Chain", gen_chain),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    let mut mismatches = 0;
    for (name, generator) in generators {
        mismatches += run_benchmark(name, generator, node_count);
    }
    if mismatches > 0 {
        eprintln!("{} engine mismatches", mismatches);
        std::process::exit(1);
    }
}

/// Time every all-pairs engine on one graph. Returns the number of engines that
/// disagreed with Floyd-Warshall.
fn run_benchmark(name: &str, generator: fn(u64) -> Graph, node_count: u64) -> usize {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.1}ms: {} nodes, {} edges",
        t.elapsed().as_secs_f64() * 1000.0,
        graph.node_count(),
        graph.edge_count()
    );

    println!();
    println!("{:>16} {:>12} {:>10} {:>8}", "engine", "reachable", "time", "agrees");
    println!("{:->16} {:->12} {:->10} {:->8}", "", "", "", "");

    let mut reference: Option<AllPairs> = None;
    let mut mismatches = 0;
    for algorithm in AllPairsAlgorithm::ALL {
        if algorithm == AllPairsAlgorithm::SlowApsp && graph.node_count() > SLOW_APSP_LIMIT {
            println!("{:>16} (skipped above {} nodes)", algorithm.name(), SLOW_APSP_LIMIT);
            continue;
        }

        let t = Instant::now();
        let result = algorithm.run(&graph);
        let elapsed = t.elapsed();

        let agrees = match &reference {
            None => true,
            Some(expected) => expected == &result,
        };
        if !agrees {
            warn!(engine = algorithm.name(), graph = name, "all-pairs mismatch");
            mismatches += 1;
        }
        println!(
            "{:>16} {:>12} {:>8.1}ms {:>8}",
            algorithm.name(),
            reachable_pairs(&result),
            elapsed.as_secs_f64() * 1000.0,
            if agrees { "yes" } else { "NO" }
        );
        if reference.is_none() {
            reference = Some(result);
        }
    }

    // Step recording from the first node (a root or hub in every generator).
    println!();
    if let Some(source) = graph.sorted_nodes().first() {
        let t = Instant::now();
        let steps = dijkstra::compute_steps(&graph, source);
        let elapsed = t.elapsed();
        let selects = steps.iter().filter(|s| s.action.is_select()).count();
        let reached = steps.last().map_or(0, |s| s.state.reachable().count());
        println!(
            "Dijkstra from {}: {} steps ({} selects, {} updates), {} nodes reached in {:.1}ms",
            source,
            steps.len(),
            selects,
            steps.len() - selects,
            reached,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    if graph.node_count() <= STEP_RECORD_LIMIT {
        let t = Instant::now();
        let (_, steps) = floyd_warshall::compute_steps(&graph);
        let updates = steps.iter().filter(|s| s.updated).count();
        println!(
            "Floyd-Warshall: {} steps ({} cell updates) in {:.1}ms",
            steps.len(),
            updates,
            t.elapsed().as_secs_f64() * 1000.0
        );
    } else {
        println!("Floyd-Warshall step recording skipped above {} nodes", STEP_RECORD_LIMIT);
    }
    println!();

    info!(graph = name, mismatches, "benchmark complete");
    mismatches
}

fn reachable_pairs(result: &AllPairs) -> usize {
    let n = result.matrix.size();
    (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j && result.matrix.get(i, j) < pathstep_core::INF)
        .count()
}

// ---------------------------------------------------------------------------
// Generators: deterministic, at most one edge per ordered pair
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    fn weight(&mut self) -> Weight {
        self.next(20) as Weight + 1
    }
}

fn node_name(i: u64) -> String {
    format!("v{:05}", i)
}

/// Graph under construction. Parallel edges and self-loops are dropped so the
/// matrix engines and the single-source engines see the same edge set.
struct Builder {
    graph: Graph,
    seen: HashSet<(u64, u64)>,
}

impl Builder {
    fn new(node_count: u64) -> Self {
        let mut graph = Graph::with_capacity(node_count as usize, node_count as usize * 4);
        for i in 0..node_count {
            graph.add_node(node_name(i));
        }
        Self {
            graph,
            seen: HashSet::new(),
        }
    }

    fn edge(&mut self, from: u64, to: u64, weight: Weight) {
        if from != to && self.seen.insert((from, to)) {
            self.graph.add_edge(node_name(from), node_name(to), weight);
        }
    }

    fn finish(self) -> Graph {
        self.graph
    }
}

/// Each node gets three children; edges point away from the root.
fn gen_tree(node_count: u64) -> Graph {
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(42);
    for child in 1..node_count {
        let parent = (child - 1) / 3;
        let w = rng.weight();
        b.edge(parent, child, w);
    }
    b.finish()
}

/// Ring lattice with K forward neighbors, each edge rewired with probability p.
fn gen_small_world(node_count: u64) -> Graph {
    let k = 3u64;
    let p = 0.1f64;
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let w = rng.weight();
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                (i + j) % node_count
            };
            b.edge(i, target, w);
        }
    }
    b.finish()
}

/// Uniform random edges, about four per node.
fn gen_random(node_count: u64) -> Graph {
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(54321);
    for _ in 0..node_count * 4 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        let w = rng.weight();
        b.edge(from, to, w);
    }
    b.finish()
}

/// Two dense clusters joined by a short one-way bridge.
fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 4u64.min(node_count / 3);
    let cluster = (node_count - bridge_len) / 2;
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    for offset in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..4u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                let w = rng.weight();
                b.edge(offset + i, offset + target, w);
            }
        }
    }

    // cluster A tail -> bridge -> cluster B head
    let mut prev = cluster.saturating_sub(1);
    for id in cluster..b_start.min(node_count) {
        b.edge(prev, id, 1);
        prev = id;
    }
    if b_start < node_count {
        b.edge(prev, b_start, 1);
    }
    b.finish()
}

/// Each new node attaches to a recent "surface" node, occasionally to any older one.
fn gen_dla(node_count: u64) -> Graph {
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(77777);

    let surface_max = 16usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        let w = rng.weight();
        b.edge(attach_to, new_node, w);

        if rng.next(10) == 0 {
            let other = rng.next(new_node);
            let w = rng.weight();
            b.edge(new_node, other, w);
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }
    b.finish()
}

/// `v0 -> v1 -> ... -> v{n-1}`: every min-plus round is needed.
fn gen_chain(node_count: u64) -> Graph {
    let mut b = Builder::new(node_count);
    let mut rng = FastRng::new(31337);
    for i in 1..node_count {
        let w = rng.weight();
        b.edge(i - 1, i, w);
    }
    b.finish()
}
