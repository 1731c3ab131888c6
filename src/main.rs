use clap::Parser;
use hexlife::metrics::CycleMetrics;
use hexlife::{Rules, World, WorldConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexlife", about = "Hexagonal Game of Life with lineage colors")]
struct Cli {
    /// Random seed for reproducibility.
    #[arg(long)]
    seed: u64,

    /// Number of generations to run.
    #[arg(long)]
    cycles: u64,

    /// Radius of the hexagonal map.
    #[arg(long, default_value_t = 32)]
    radius: u32,

    /// Fraction of candidate cells seeded alive.
    #[arg(long, default_value_t = 0.75)]
    density: f64,

    /// Radius of the randomly seeded disc (defaults to half the map radius).
    #[arg(long)]
    initial_radius: Option<u32>,

    /// Seed this many clusters instead of a single random disc.
    #[arg(long)]
    clusters: Option<usize>,

    /// Nominal radius of each cluster.
    #[arg(long, default_value_t = 4)]
    cluster_radius: u32,

    /// Rules as <environment>/<fertility> neighbor counts: digits (23/2), or
    /// comma lists when a count exceeds 9 (2,3,10/2,).
    #[arg(long, default_value = "23/2")]
    rules: Rules,

    /// Disable the extended-neighbor bonus.
    #[arg(long)]
    no_extended: bool,

    /// Divisor for the extended-neighbor bonus.
    #[arg(long, default_value_t = 3)]
    factor: usize,

    /// Output metrics every N cycles.
    #[arg(long, default_value_t = 1)]
    metrics_interval: u64,

    /// Run in benchmark mode: suppress CSV, print throughput stats.
    #[arg(long)]
    benchmark: bool,
}

fn build_world(cli: &Cli) -> hexlife::Result<World> {
    let config = WorldConfig {
        map_radius: cli.radius,
        rules: cli.rules.clone(),
        use_extended_neighbors: !cli.no_extended,
        extended_neighbors_factor: cli.factor,
    };
    let mut world = World::with_seed(config, cli.seed);
    match cli.clusters {
        Some(number) => world.cluster(number, cli.cluster_radius, cli.density)?,
        None => {
            let initial_radius = cli.initial_radius.unwrap_or(cli.radius / 2);
            world.random(cli.density, initial_radius)?;
        }
    }
    Ok(world)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexlife=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.metrics_interval == 0 {
        eprintln!("--metrics-interval must be positive");
        std::process::exit(1);
    }

    let mut world = match build_world(&cli) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        map_radius = world.map_radius(),
        cells = world.cell_count(),
        population = world.population(),
        rules = %world.rules(),
        extended = world.use_extended_neighbors(),
        "world seeded"
    );

    if cli.benchmark {
        run_benchmark(&mut world, cli.cycles);
    } else {
        run_simulation(&mut world, cli.cycles, cli.metrics_interval);
    }
}

fn print_row(m: &CycleMetrics) {
    let saturation = m.mean_saturation.map(|s| format!("{s:.2}")).unwrap_or_default();
    println!(
        "{},{},{:.6},{},{},{},{:.6}",
        m.cycle, m.population, m.density, m.frontier, m.lineages, saturation, m.hoe
    );
}

fn run_simulation(world: &mut World, cycles: u64, metrics_interval: u64) {
    println!("cycle,population,density,frontier,lineages,mean_saturation,hoe");
    print_row(&CycleMetrics::capture(world));

    for cycle in 1..=cycles {
        world.evolve();

        if cycle % metrics_interval == 0 {
            print_row(&CycleMetrics::capture(world));
        }

        if cycle % 100 == 0 || cycle == cycles {
            eprint!("\rcycle {cycle}/{cycles}");
        }
    }
    eprintln!();
}

fn run_benchmark(world: &mut World, cycles: u64) {
    let start = std::time::Instant::now();
    for _ in 0..cycles {
        world.evolve();
    }
    let elapsed = start.elapsed();

    let cycles_per_sec = cycles as f64 / elapsed.as_secs_f64();

    eprintln!("Benchmark results:");
    eprintln!("  Map radius:        {}", world.map_radius());
    eprintln!("  Cells:             {}", world.cell_count());
    eprintln!("  Cycles:            {cycles}");
    eprintln!("  Final population:  {}", world.population());
    eprintln!("  Elapsed:           {elapsed:.2?}");
    eprintln!("  Cycles/sec:        {cycles_per_sec:.1}");
}
