use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use implicit_avl::bench::{run_benchmark, BenchmarkConfig, BenchmarkRow};
use implicit_avl::{DotGraph, ImplicitAvl, ReferenceAvl, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_KEYS: [i64; 6] = [10, 20, 30, 40, 50, 25];

#[derive(Parser, Debug)]
#[command(name = "implicit-avl", about = "AVL tree stored as an implicit array")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build both trees from a dataset and write Graphviz DOT files.
    Visualize {
        /// Keys to insert, in order.
        #[arg(long, num_args = 1.., default_values_t = DEFAULT_KEYS)]
        keys: Vec<i64>,
        /// Directory receiving avl_reference_viz.dot and avl_array_viz.dot.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Initial slot capacity of the array tree.
        #[arg(long, default_value_t = implicit_avl::DEFAULT_CAPACITY)]
        capacity: usize,
    },
    /// Compare insertion/search time and peak memory of both trees.
    Bench {
        /// Dataset sizes.
        #[arg(long, num_args = 1.., default_values_t = BenchmarkConfig::default().sizes)]
        sizes: Vec<usize>,
        /// RNG seed for the datasets.
        #[arg(long, default_value_t = BenchmarkConfig::default().seed)]
        seed: u64,
        /// Array tree pre-allocates `size * capacity_factor` slots.
        #[arg(long, default_value_t = BenchmarkConfig::default().capacity_factor)]
        capacity_factor: usize,
    },
    /// Print the occupied slots of the array tree and check its invariants.
    Layout {
        /// Keys to insert, in order.
        #[arg(long, num_args = 1.., default_values_t = DEFAULT_KEYS)]
        keys: Vec<i64>,
        /// Initial slot capacity.
        #[arg(long, default_value_t = implicit_avl::DEFAULT_CAPACITY)]
        capacity: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "implicit_avl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Visualize {
            keys,
            out_dir,
            capacity,
        } => run_visualize(&keys, &out_dir, capacity)?,
        Commands::Bench {
            sizes,
            seed,
            capacity_factor,
        } => run_bench(BenchmarkConfig {
            sizes,
            seed,
            capacity_factor,
            ..BenchmarkConfig::default()
        })?,
        Commands::Layout { keys, capacity } => run_layout(&keys, capacity)?,
    }

    Ok(())
}

fn build_array(keys: &[i64], config: &StoreConfig) -> Result<ImplicitAvl<i64>> {
    let mut store = ImplicitAvl::with_config(config);
    for &key in keys {
        store
            .try_insert(key)
            .with_context(|| format!("failed to insert key {key}"))?;
    }
    Ok(store)
}

fn write_graph(graph: &DotGraph, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    graph
        .write_dot(&mut BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn run_visualize(keys: &[i64], out_dir: &Path, capacity: usize) -> Result<()> {
    println!("Visualizing dataset: {keys:?}");
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let reference: ReferenceAvl<i64> = keys.iter().copied().collect();
    let reference_path = out_dir.join("avl_reference_viz.dot");
    write_graph(&DotGraph::from_reference(&reference, "AVL Reference"), &reference_path)?;
    println!("Reference tree -> {}", reference_path.display());

    let array = build_array(keys, &StoreConfig::with_capacity(capacity))?;
    let array_path = out_dir.join("avl_array_viz.dot");
    write_graph(&DotGraph::from_store(&array, "AVL Array"), &array_path)?;
    println!("Array tree     -> {}", array_path.display());

    Ok(())
}

fn run_bench(config: BenchmarkConfig) -> Result<()> {
    println!("Benchmark: pointer AVL vs implicit-array AVL");
    println!("============================================\n");

    let rows = run_benchmark(&config).context("benchmark failed")?;

    let header = BenchmarkRow::header();
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for row in rows {
        println!("{row}");
    }

    Ok(())
}

fn run_layout(keys: &[i64], capacity: usize) -> Result<()> {
    let mut store = build_array(keys, &StoreConfig::with_capacity(capacity).profiled())?;

    println!("capacity={} len={} height={}", store.capacity(), store.len(), store.root_height());
    for slot in store.occupied() {
        println!("{slot}");
    }

    store.validate().context("array tree is inconsistent")?;
    println!("invariants hold");

    if let Some(profile) = store.take_profile() {
        println!("\n{}", profile.report());
    }
    Ok(())
}
