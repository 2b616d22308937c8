use clap::{Parser, ValueEnum};
use optimal_subarchitectures::{generators, parser::format_lines, Graph};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Family {
    Path,
    Cycle,
    /// Center plus `n` leaves
    Star,
    Complete,
    /// `n` rows by `cols` columns
    Grid,
    /// `n` rungs
    Ladder,
    /// Every pair joined with probability `density`
    Random,
}

/// Topology generator for the sub-architecture finder.
///
/// Writes one edge `u v` per line, isolated vertices as a lone `v`, preceded
/// by a `#` header describing how the topology was produced.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate coupling-graph topologies for the sub-architecture finder"
)]
struct Args {
    #[arg(long, value_enum)]
    family: Family,

    /// Vertex count, or rows / leaves / rungs depending on the family
    #[arg(short, long)]
    n: usize,

    /// Columns of a grid
    #[arg(long, default_value_t = 1)]
    cols: usize,

    /// Edge probability of random topologies
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Overlay a random spanning tree so random topologies are connected
    #[arg(long)]
    connected: bool,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path
    #[arg(long)]
    output: PathBuf,
}

fn generate(args: &Args, rng: &mut StdRng) -> Graph {
    match args.family {
        Family::Path => generators::path(args.n),
        Family::Cycle => generators::cycle(args.n),
        Family::Star => generators::star(args.n),
        Family::Complete => generators::complete(args.n),
        Family::Grid => generators::grid(args.n, args.cols),
        Family::Ladder => generators::ladder(args.n),
        Family::Random if args.connected => generators::random_connected(args.n, args.density, rng),
        Family::Random => generators::random(args.n, args.density, rng),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.n == 0 {
        eprintln!("Error: n must be positive.");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&args.density) {
        eprintln!("Error: density must be in [0,1].");
        std::process::exit(1);
    }

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = generate(&args, &mut rng);

    println!("Generated topology:");
    println!("  family = {:?}", args.family);
    println!("  vertices = {}", graph.num_vertices());
    println!("  edges = {}", graph.num_edges());
    println!("  connected = {}", graph.is_connected());
    if args.family == Family::Random {
        println!("  density = {:.3}", args.density);
        println!("  seed = {}", seed);
    }
    println!("  output file: {:?}", args.output);

    let mut writer = File::create(&args.output)?;
    writeln!(
        writer,
        "# {:?} n={} cols={} seed={}",
        args.family, args.n, args.cols, seed
    )?;
    write!(writer, "{}", format_lines(&graph))?;
    writer.flush()?;

    Ok(())
}
