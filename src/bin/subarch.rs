use clap::{Parser, ValueEnum};
use optimal_subarchitectures::{
    canonical::deduplicate_with,
    config::DEFAULT_WL_ITERATIONS,
    count_connected_subgraphs, enumerate, non_isomorphic_subgraphs, optimal_subarchitectures_with,
    parser::{format_edge_list, parse_graph_file},
    CollisionCheck, Config, Graph, TracingProgress,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// What to compute from the input topology
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// All connected induced k-vertex subgraphs
    Enumerate,
    /// Connected induced k-vertex subgraphs, one per isomorphism class
    Dedupe,
    /// The optimal k-vertex sub-architectures
    Optimal,
    /// Every connected k-vertex subgraph up to isomorphism, edge reductions included
    NonIsomorphic,
    /// Only the number of connected induced k-vertex subgraphs
    Count,
}

/// Optimal sub-architecture finder for coupling-graph topologies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology file (`u v` per line, or `[(u, v), ...]`)
    #[arg(short, long)]
    input: PathBuf,

    /// Number of vertices of every sub-architecture (k)
    #[arg(short, long)]
    k: usize,

    #[arg(short, long, value_enum, default_value_t = Mode::Optimal)]
    mode: Mode,

    /// Refinement rounds of the canonical hash
    #[arg(long, default_value_t = DEFAULT_WL_ITERATIONS)]
    wl_iterations: usize,

    /// How candidates sharing a canonical hash are treated
    #[arg(long, value_enum, default_value_t = CollisionCheck::Exact)]
    collision_check: CollisionCheck,

    /// Run every stage on the current thread
    #[arg(long)]
    sequential: bool,

    /// Print the summary only, not the subgraphs
    #[arg(short, long)]
    quiet: bool,

    /// Log per-stage progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

enum Report {
    Count(usize),
    Subgraphs(Vec<Graph>),
}

fn run(
    args: &Args,
    graph: &Graph,
    config: &Config,
    progress: &TracingProgress,
) -> optimal_subarchitectures::Result<Report> {
    let subgraphs = match args.mode {
        Mode::Count => return Ok(Report::Count(count_connected_subgraphs(graph, args.k)?)),
        Mode::Enumerate => enumerate::connected_subgraphs(graph, args.k, config, progress)?,
        Mode::Dedupe => {
            let subgraphs = enumerate::connected_subgraphs(graph, args.k, config, progress)?;
            deduplicate_with(subgraphs, config, progress)
        }
        Mode::Optimal => optimal_subarchitectures_with(graph, args.k, config, progress)?,
        Mode::NonIsomorphic => non_isomorphic_subgraphs(graph, args.k, config, progress)?,
    };
    Ok(Report::Subgraphs(subgraphs))
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let graph = match parse_graph_file(&args.input) {
        Ok(graph) => graph,
        Err(e) => {
            error!(input = %args.input.display(), "failed to read topology: {e}");
            std::process::exit(1);
        }
    };

    println!("Optimal Sub-Architectures");
    println!("=========================");
    println!("Topology: {} vertices, {} edges", graph.num_vertices(), graph.num_edges());
    println!("Subgraph size (k): {}", args.k);
    println!("Mode: {:?}", args.mode);
    println!();

    let config = Config::new(args.wl_iterations, args.collision_check, !args.sequential);
    let label = format!(
        "{} k={}",
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        args.k
    );
    let progress = TracingProgress::new(label);
    let start_time = std::time::Instant::now();

    let report = match run(&args, &graph, &config, &progress) {
        Ok(report) => report,
        Err(e) => {
            error!(label = progress.label(), "{e}");
            std::process::exit(1);
        }
    };
    let elapsed = start_time.elapsed();

    let results = match report {
        Report::Count(count) => {
            println!("Connected induced subgraphs: {}", count);
            println!("Computation time: {:.3}s", elapsed.as_secs_f64());
            return;
        }
        Report::Subgraphs(results) => results,
    };

    if !args.quiet {
        for (i, subgraph) in results.iter().enumerate() {
            println!(
                "  {:>4}: {} ({} edges)",
                i + 1,
                format_edge_list(subgraph),
                subgraph.num_edges()
            );
        }
        println!();
    }

    println!("Subgraphs reported: {}", results.len());
    println!("Computation time: {:.3}s", elapsed.as_secs_f64());
}
