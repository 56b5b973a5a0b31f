use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use logicnet::{import, Kind, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logicnet")]
#[command(about = "Simulate saved logic gate circuits", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Relaxation passes per live tick
    #[arg(long, global = true, default_value_t = SimulationConfig::default().passes_per_tick)]
    passes_per_tick: usize,

    /// Relaxation passes per truth table row
    #[arg(long, global = true, default_value_t = SimulationConfig::default().table_passes)]
    table_passes: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the truth table of every switch against every LED
    Table {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Toggle switches, tick the simulation and print every element's output
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of ticks to run
        #[arg(short, long, default_value = "1")]
        ticks: usize,

        /// Name of a switch to toggle before ticking; may be repeated
        #[arg(long, value_name = "NAME")]
        toggle: Vec<String>,
    },

    /// Load a circuit and report what it contains
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = SimulationConfig { passes_per_tick: cli.passes_per_tick, table_passes: cli.table_passes };

    match cli.command {
        Commands::Table { file } => {
            let mut simulation = open(&file, config)?;
            let table = simulation.truth_table();
            if table.is_empty() {
                println!("no switches in circuit");
            } else {
                print!("{table}");
            }
        }

        Commands::Run { file, ticks, toggle } => {
            let mut simulation = open(&file, config)?;
            for name in &toggle {
                let Some(key) = simulation.network.key_of(name) else { bail!("no element named '{name}'") };
                simulation.network.toggle(key)?;
            }
            for _ in 0..ticks {
                simulation.tick();
            }
            for (_, element) in simulation.network.iter() {
                println!("{} {} {}", element.name(), element.kind(), u8::from(element.output()));
            }
        }

        Commands::Check { file } => {
            let simulation = open(&file, config)?;
            let network = &simulation.network;
            let connections: usize = network.iter().map(|(_, element)| element.inputs().iter().flatten().count()).sum();
            println!("elements: {}", network.len());
            println!("connections: {connections}");
            println!("switches: {}", network.of_kind(Kind::SWITCH).len());
            println!("leds: {}", network.of_kind(Kind::LED).len());
        }
    }

    Ok(())
}

fn open(file: &Path, config: SimulationConfig) -> anyhow::Result<Simulation> {
    let network = import::load(file).with_context(|| format!("failed to load {}", file.display()))?;
    Ok(Simulation::with_config(network, config))
}
