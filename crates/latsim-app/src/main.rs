use anyhow::Result;
use clap::{Parser, Subcommand};
use latsim_app::{
    ImmuneSweepConfig, LifeRunConfig, PhaseSweepConfig, WavesSearchConfig, run_immune_sweep,
    run_life_equilibrium, run_phase_sweep, run_waves_search, write_results,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "latsim",
    about = "Periodic-lattice simulations: Game of Life equilibration and SIRS epidemic sweeps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Measure equilibration times of repeated random Game of Life runs.
    Life {
        /// Lattice side length.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Number of independent random runs.
        #[arg(long, default_value_t = 500)]
        runs: usize,
        /// Iteration budget per run.
        #[arg(long, default_value_t = 500)]
        sweeps: usize,
        /// Base RNG seed; omit to draw one from entropy.
        #[arg(long)]
        seed: Option<u64>,
        /// Output JSON path.
        #[arg(long, default_value = "life_equilibrium.json")]
        out: PathBuf,
    },
    /// Sweep the SIRS infection/waning phase diagram at fixed recovery.
    Phase {
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Macro sweeps per parameter point.
        #[arg(long, default_value_t = 1100)]
        sweeps: usize,
        /// Step along both probability axes.
        #[arg(long, default_value_t = 0.05)]
        resolution: f64,
        /// Fixed I -> R probability.
        #[arg(long, default_value_t = 0.5)]
        recovery: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "sirs_phase.json")]
        out: PathBuf,
    },
    /// Average infection against the fraction of permanently immune sites.
    Immune {
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long, default_value_t = 1100)]
        sweeps: usize,
        /// Step along the immune-fraction axis.
        #[arg(long, default_value_t = 0.05)]
        resolution: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "sirs_immune.json")]
        out: PathBuf,
    },
    /// Search for infection waves along the p2 = p3 = 0.5 cut.
    Waves {
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long, default_value_t = 10_100)]
        sweeps: usize,
        /// Step along the infection-probability axis.
        #[arg(long, default_value_t = 0.05)]
        resolution: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "sirs_waves.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (results, out) = match cli.command {
        Command::Life {
            size,
            runs,
            sweeps,
            seed,
            out,
        } => {
            let config = LifeRunConfig {
                size,
                runs,
                sweeps,
                seed,
            };
            (run_life_equilibrium(&config)?, out)
        }
        Command::Phase {
            size,
            sweeps,
            resolution,
            recovery,
            seed,
            out,
        } => {
            let config = PhaseSweepConfig {
                size,
                sweeps,
                resolution,
                recovery,
                seed,
            };
            (run_phase_sweep(&config)?, out)
        }
        Command::Immune {
            size,
            sweeps,
            resolution,
            seed,
            out,
        } => {
            let config = ImmuneSweepConfig {
                size,
                sweeps,
                resolution,
                seed,
            };
            (run_immune_sweep(&config)?, out)
        }
        Command::Waves {
            size,
            sweeps,
            resolution,
            seed,
            out,
        } => {
            let config = WavesSearchConfig {
                size,
                sweeps,
                resolution,
                seed,
            };
            (run_waves_search(&config)?, out)
        }
    };

    write_results(&out, &results)?;
    info!(path = %out.display(), "results written");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
