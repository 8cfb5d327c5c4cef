//! Driver loops, sweep orchestration, and result persistence for the
//! `latsim` binary.

pub mod drivers;
pub mod output;

pub use drivers::{
    ImmuneSweepConfig, LifeRunConfig, PhaseSweepConfig, WavesSearchConfig, probability_steps,
    run_immune_sweep, run_life_equilibrium, run_phase_sweep, run_waves_search,
};
pub use output::write_results;
