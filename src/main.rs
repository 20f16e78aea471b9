//! Foxes & Rabbits - CLI entry point.

mod view;

use clap::{Parser, Subcommand};
use foxes_rabbits::{Config, World, WorldError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "foxes-rabbits")]
#[command(version)]
#[command(about = "Predator-prey simulation of foxes, rabbits and grass on a grid")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the simulation window (default)
    View {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run without a window and log progress
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Log a summary every N ticks
        #[arg(short, long, default_value = "100")]
        report_every: u64,
    },

    /// Run independent worlds side by side and compare where they end up
    Ensemble {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Seed of the first run; run `i` uses `seed + i`
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Number of worlds
        #[arg(short, long, default_value = "8")]
        runs: u64,

        /// Ticks per world
        #[arg(short, long, default_value = "1000")]
        ticks: u64,
    },

    /// Write the default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

struct RunOutcome {
    seed: u64,
    ticks: u64,
    foxes: usize,
    rabbits: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::View {
        config: PathBuf::from("config.yaml"),
        seed: None,
    }) {
        Commands::View { config, seed } => {
            let world = seeded_world(&load_config(&config)?, seed)?;
            view::run(world)
        }
        Commands::Run {
            config,
            seed,
            ticks,
            report_every,
        } => run_headless(load_config(&config)?, seed, ticks, report_every),
        Commands::Ensemble {
            config,
            seed,
            runs,
            ticks,
        } => run_ensemble(load_config(&config)?, seed, runs, ticks),
        Commands::Init { output } => {
            Config::default().save(&output)?;
            log::info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        log::info!("Loading config from {:?}", path);
        Ok(Config::from_file(path)?)
    } else {
        log::info!("Using default configuration");
        Ok(Config::default())
    }
}

fn seeded_world(config: &Config, seed: Option<u64>) -> Result<World, WorldError> {
    let mut world = match seed {
        Some(seed) => World::with_seed(config.clone(), seed)?,
        None => World::new(config.clone())?,
    };
    world.initialize(config.world.initial_foxes, config.world.initial_rabbits)?;
    Ok(world)
}

fn simulate(world: &mut World, ticks: u64, report_every: Option<u64>) {
    for _ in 0..ticks {
        world.update();

        if let Some(every) = report_every {
            if every > 0 && world.stats.tick % every == 0 {
                log::info!("{}", world.stats.summary());
            }
        }

        if world.is_extinct() {
            log::info!("Both species extinct at tick {}", world.stats.tick);
            break;
        }
    }
}

fn run_headless(
    config: Config,
    seed: Option<u64>,
    ticks: u64,
    report_every: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = seeded_world(&config, seed)?;
    log::info!(
        "Starting run: {}x{} grid, {} ticks, seed = {}",
        world.width(),
        world.height(),
        ticks,
        world.seed()
    );

    let start = Instant::now();
    simulate(&mut world, ticks, Some(report_every));
    let elapsed = start.elapsed();

    let stats = &world.stats;
    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", stats.tick);
    println!(
        "Speed: {:.1} ticks/s",
        stats.tick as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!(
        "Final population: {} foxes, {} rabbits",
        world.foxes().len(),
        world.rabbits().len()
    );
    println!("Peak population: {}", stats.max_population);
    println!("Births: {} foxes, {} rabbits", stats.fox_births, stats.rabbit_births);
    println!("Starved: {} foxes, {} rabbits", stats.fox_deaths, stats.rabbit_deaths);
    println!("Rabbits eaten: {}", stats.rabbits_eaten);
    println!("Grass eaten: {}", stats.grass_eaten);
    Ok(())
}

// Each world ticks on its own thread; worlds never share state.
fn run_ensemble(
    config: Config,
    seed: u64,
    runs: u64,
    ticks: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Ensemble of {} worlds, {} ticks each, on {} threads",
        runs,
        ticks,
        rayon::current_num_threads()
    );

    let outcomes = (0..runs)
        .into_par_iter()
        .map(|i| {
            let run_seed = seed.wrapping_add(i);
            let mut world = seeded_world(&config, Some(run_seed))?;
            simulate(&mut world, ticks, None);
            Ok(RunOutcome {
                seed: run_seed,
                ticks: world.stats.tick,
                foxes: world.foxes().len(),
                rabbits: world.rabbits().len(),
            })
        })
        .collect::<Result<Vec<RunOutcome>, WorldError>>()?;

    println!("{:>20} {:>8} {:>8} {:>8}", "seed", "ticks", "foxes", "rabbits");
    for outcome in &outcomes {
        println!(
            "{:>20} {:>8} {:>8} {:>8}",
            outcome.seed, outcome.ticks, outcome.foxes, outcome.rabbits
        );
    }

    if !outcomes.is_empty() {
        let n = outcomes.len() as f64;
        let mean_foxes = outcomes.iter().map(|o| o.foxes).sum::<usize>() as f64 / n;
        let mean_rabbits = outcomes.iter().map(|o| o.rabbits).sum::<usize>() as f64 / n;
        let fox_extinctions = outcomes.iter().filter(|o| o.foxes == 0).count();
        println!();
        println!("Mean final foxes: {:.1}", mean_foxes);
        println!("Mean final rabbits: {:.1}", mean_rabbits);
        println!("Fox extinctions: {}/{}", fox_extinctions, outcomes.len());
    }
    Ok(())
}
