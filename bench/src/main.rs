use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use page_graph_core::{centers, hamiltonian, scc, AnalysisConfig, Graph, HamiltonianSolution};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Benchmark page-graph-core queries on synthetic link graphs.
#[derive(Parser, Debug)]
#[command(name = "page-graph-bench", version)]
struct Args {
    /// Generator to run.
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Vertices per generated graph.
    #[arg(default_value_t = 100_000)]
    vertices: u64,

    /// Skip the all-sources centers query above this many vertices (it is O(V * (V + E))).
    #[arg(long, default_value_t = 5_000)]
    centers_max: usize,

    /// Size of the induced prefix subgraph fed to the Hamiltonian solver.
    #[arg(long, default_value_t = 16)]
    hamiltonian_vertices: usize,

    /// Solver limit passed through `AnalysisConfig`.
    #[arg(long, default_value_t = page_graph_core::DEFAULT_MAX_HAMILTONIAN_VERTICES)]
    max_hamiltonian_vertices: usize,

    /// Emit one JSON report per generator instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Run all generators (default)
    All,
    /// Single long directed chain (deep DFS)
    Chain,
    /// Single directed cycle (one SCC, every vertex a center)
    Cycle,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters connected by a thin bridge
    Barbell,
}

type Generator = fn(u64) -> Graph;

#[derive(Debug, Serialize)]
struct BenchReport {
    generator: &'static str,
    config: AnalysisConfig,
    vertices: usize,
    edges: usize,
    memory_bytes: usize,
    generate_ms: f64,
    shortest_path: Option<u32>,
    shortest_path_ms: f64,
    components: usize,
    largest_component: usize,
    scc_ms: f64,
    centers: Option<usize>,
    centers_ms: Option<f64>,
    hamiltonian_vertices: usize,
    hamiltonian: HamiltonianSolution,
    hamiltonian_ms: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.vertices < 2 {
        bail!("vertices must be at least 2, got {}", args.vertices);
    }
    let config = AnalysisConfig::with_max_hamiltonian_vertices(args.max_hamiltonian_vertices)?;

    let generators: Vec<(&'static str, Generator)> = match args.mode {
        Mode::Chain => vec![("Chain", gen_chain)],
        Mode::Cycle => vec![("Cycle", gen_cycle)],
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        Mode::All => vec![
            ("Chain", gen_chain as Generator),
            ("Cycle", gen_cycle),
            ("L-system tree", gen_lsystem),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
    };

    if !args.json {
        println!("page-graph-bench");
        println!("================");
        println!();
    }

    for (name, generator) in generators {
        let report = run_benchmark(name, generator, &args, &config)?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    Ok(())
}

fn millis(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &'static str,
    generator: Generator,
    args: &Args,
    config: &AnalysisConfig,
) -> Result<BenchReport> {
    info!(generator = name, target_vertices = args.vertices, "generating graph");

    let t = Instant::now();
    let graph = generator(args.vertices);
    let generate_ms = millis(t);

    // Shortest path: first page to last page
    let first = page(0);
    let last = page(graph.vertex_count() as u64 - 1);
    let t = Instant::now();
    let shortest_path = graph.shortest_path(&first, &last);
    let shortest_path_ms = millis(t);

    let t = Instant::now();
    let components = scc::component_indices(&graph);
    let scc_ms = millis(t);
    let largest_component = components.iter().map(Vec::len).max().unwrap_or(0);

    let (centers, centers_ms) = if graph.vertex_count() <= args.centers_max {
        let t = Instant::now();
        let found = centers::centers(&graph);
        (Some(found.len()), Some(millis(t)))
    } else {
        info!(
            vertices = graph.vertex_count(),
            limit = args.centers_max,
            "skipping centers query"
        );
        (None, None)
    };

    let prefix = induced_prefix(&graph, args.hamiltonian_vertices);
    let t = Instant::now();
    let hamiltonian = hamiltonian::solve(&prefix, config)?;
    let hamiltonian_ms = millis(t);

    Ok(BenchReport {
        generator: name,
        config: *config,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        generate_ms,
        shortest_path,
        shortest_path_ms,
        components: components.len(),
        largest_component,
        scc_ms,
        centers,
        centers_ms,
        hamiltonian_vertices: prefix.vertex_count(),
        hamiltonian,
        hamiltonian_ms,
    })
}

fn print_report(r: &BenchReport) {
    println!("--- {} ---", r.generator);
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.1}MB",
        r.generate_ms / 1000.0,
        r.vertices,
        r.edges,
        r.memory_bytes as f64 / 1_048_576.0
    );
    match r.shortest_path {
        Some(hops) => println!(
            "Shortest path first → last: {} hops in {:.1}ms",
            hops, r.shortest_path_ms
        ),
        None => println!(
            "Shortest path first → last: no path ({:.1}ms)",
            r.shortest_path_ms
        ),
    }
    println!(
        "SCC: {} components, largest {} in {:.1}ms",
        r.components, r.largest_component, r.scc_ms
    );
    match (r.centers, r.centers_ms) {
        (Some(count), Some(ms)) => println!("Centers: {} in {:.1}ms", count, ms),
        _ => println!("Centers: skipped (graph above --centers-max)"),
    }
    println!(
        "Hamiltonian on {}-vertex prefix: {} ({} missing edges) in {:.1}ms",
        r.hamiltonian_vertices,
        if r.hamiltonian.is_hamiltonian() { "found" } else { "none" },
        r.hamiltonian.missing_edges,
        r.hamiltonian_ms
    );
    println!();
}

/// Subgraph induced by the first `k` vertices, in index order.
fn induced_prefix(graph: &Graph, k: usize) -> Graph {
    let k = k.min(graph.vertex_count());
    let mut prefix = Graph::with_capacity(k);
    for v in 0..k {
        if let Some(label) = graph.label_of(v) {
            prefix.add_vertex(label);
        }
    }
    for v in 0..k {
        for &w in graph.neighbors_out(v).iter().filter(|&&w| w < k) {
            if let (Some(from), Some(to)) = (graph.label_of(v), graph.label_of(w)) {
                prefix.add_edge(from, to);
            }
        }
    }
    prefix
}

// ---------------------------------------------------------------------------
// Generators: all O(n + edges), single-threaded, deterministic
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
}

fn page(i: u64) -> String {
    format!("https://bench.local/wiki/{}", i)
}

/// Graph with pages `0..n` registered up front so index `i` is `page(i)`.
fn with_pages(vertex_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    for i in 0..vertex_count {
        graph.add_vertex(&page(i));
    }
    graph
}

fn gen_chain(vertex_count: u64) -> Graph {
    let mut graph = with_pages(vertex_count);
    for i in 1..vertex_count {
        graph.add_edge(&page(i - 1), &page(i));
    }
    graph
}

fn gen_cycle(vertex_count: u64) -> Graph {
    let mut graph = gen_chain(vertex_count);
    graph.add_edge(&page(vertex_count - 1), &page(0));
    graph
}

/// L-system fractal tree: every page links to 3 children.
///
/// Produces deep paths (log depth) with exponential width and no cycles,
/// so every page is its own component.
fn gen_lsystem(vertex_count: u64) -> Graph {
    let branching = 3u64;
    let mut graph = with_pages(vertex_count);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                graph.add_edge(&page(parent), &page(next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each page links to its K successors on a ring; each link is rewired to a
/// random page with probability p. High clustering, short paths.
fn gen_small_world(vertex_count: u64) -> Graph {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_pages(vertex_count);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            let target = if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                if rewired != i { rewired } else { neighbor }
            } else {
                neighbor
            };
            graph.add_edge(&page(i), &page(target));
        }
    }

    graph
}

/// Erdos-Renyi: ~5 uniform random links per page.
fn gen_random(vertex_count: u64) -> Graph {
    let target_edges = vertex_count * 5;
    let mut graph = with_pages(vertex_count);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            graph.add_edge(&page(from), &page(to));
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a one-way bridge chain.
///
/// Cluster A reaches cluster B only through the bridge, never back, so the
/// SCC pass sees two large components plus one singleton per bridge page.
fn gen_barbell(vertex_count: u64) -> Graph {
    let bridge_len = 10u64.min(vertex_count / 2);
    let cluster = (vertex_count - bridge_len) / 2;
    let mut graph = with_pages(vertex_count);
    let mut rng = FastRng::new(99999);

    let mut link_cluster = |graph: &mut Graph, start: u64| {
        for i in 0..cluster {
            // Ring keeps the cluster strongly connected.
            graph.add_edge(&page(start + i), &page(start + (i + 1) % cluster));
            for _ in 0..10u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    graph.add_edge(&page(start + i), &page(start + target));
                }
            }
        }
    };

    let b_start = cluster + bridge_len;
    if cluster > 0 {
        link_cluster(&mut graph, 0);
        link_cluster(&mut graph, b_start);
    }

    // Bridge: last page of A → bridge chain → first page of B
    let mut previous = cluster.saturating_sub(1);
    for id in cluster..b_start {
        graph.add_edge(&page(previous), &page(id));
        previous = id;
    }
    if b_start < vertex_count {
        graph.add_edge(&page(previous), &page(b_start));
    }

    graph
}
