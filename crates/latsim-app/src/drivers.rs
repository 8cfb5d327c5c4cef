//! Sweep drivers that repeatedly run the core engines and collect named
//! result arrays.
//!
//! Each driver owns its parameter loop: a fresh random lattice and a fresh
//! RNG stream per sweep point, measurements gathered into series, and the
//! estimators from `latsim_core::stats` applied at the end. Independent
//! points never share random state, so a batch is reproducible from its base
//! seed alone.

use anyhow::{Result, ensure};
use latsim_core::sirs::{self, SirsProbabilities};
use latsim_core::stats::{self, BURN_IN};
use latsim_core::{EquilibriumDetector, Lattice, ResultData, ResultSet, life};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

/// Golden-ratio stride separating per-point RNG streams derived from one
/// base seed.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Resolves the batch seed: the configured value, or fresh entropy.
#[must_use]
pub fn base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn stream_rng(base: u64, stream: u64) -> SmallRng {
    SmallRng::seed_from_u64(base.wrapping_add(stream.wrapping_mul(STREAM_STRIDE)))
}

/// Inclusive arange-style parameter axis: start, start + resolution, ...,
/// stop.
///
/// The endpoint is admitted with a half-step tolerance, and values are
/// clamped into [0, 1] so accumulated rounding cannot push a probability or
/// fraction past its bound.
#[must_use]
pub fn probability_steps(start: f64, stop: f64, resolution: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut k = 0u32;
    loop {
        let value = start + f64::from(k) * resolution;
        if value > stop + resolution * 0.5 {
            break;
        }
        values.push(value.clamp(0.0, 1.0));
        k += 1;
    }
    values
}

fn validate_sweep(sweeps: usize, resolution: f64) -> Result<()> {
    ensure!(
        sweeps > BURN_IN,
        "sweeps must exceed the burn-in discard of {BURN_IN}"
    );
    ensure!(
        resolution > 0.0 && resolution <= 1.0,
        "resolution must lie in (0, 1]"
    );
    Ok(())
}

/// Runs one epidemic: fresh random lattice (optionally immunised), `sweeps`
/// macro sweeps, one measurement after each.
///
/// Returns the per-sweep infected fractions and raw infected counts.
fn measure_epidemic(
    size: usize,
    sweeps: usize,
    probabilities: &SirsProbabilities,
    immune_fraction: Option<f64>,
    rng: &mut SmallRng,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut lattice: Lattice<sirs::Compartment> = sirs::random_lattice(size, rng)?;
    if let Some(fraction) = immune_fraction {
        lattice = sirs::seed_immune(&lattice, fraction, rng)?;
    }

    let mut fractions = Vec::with_capacity(sweeps);
    let mut counts = Vec::with_capacity(sweeps);
    for _ in 0..sweeps {
        sirs::sweep(&mut lattice, probabilities, rng);
        fractions.push(sirs::infected_fraction(&lattice));
        counts.push(sirs::count_states(&lattice).infected as f64);
    }
    Ok((fractions, counts))
}

/// Configuration for the Game of Life equilibration measurement.
#[derive(Debug, Clone)]
pub struct LifeRunConfig {
    /// Lattice side length.
    pub size: usize,
    /// Number of independent random runs.
    pub runs: usize,
    /// Iteration budget per run.
    pub sweeps: usize,
    /// Base RNG seed; `None` draws one from entropy.
    pub seed: Option<u64>,
}

/// Repeated random Game of Life runs, recording when each settles.
///
/// A run is stepped until the live count is unchanged for five consecutive
/// generations or the iteration budget runs out; budget-exhausted runs keep
/// the default equilibrium step 0. Emits `equilibrium_steps` (one per run)
/// and the full `live_counts` table (runs × sweeps, zero-padded after
/// equilibrium).
pub fn run_life_equilibrium(config: &LifeRunConfig) -> Result<ResultSet> {
    ensure!(config.runs > 0, "runs must be positive");
    ensure!(config.sweeps > 0, "sweeps must be positive");
    let base = base_seed(config.seed);
    info!(
        runs = config.runs,
        sweeps = config.sweeps,
        size = config.size,
        seed = base,
        "starting Game of Life equilibration batch"
    );

    let mut equilibrium_steps = vec![0.0; config.runs];
    let mut live_counts = Vec::with_capacity(config.runs);
    for run in 0..config.runs {
        let mut rng = stream_rng(base, run as u64);
        let mut lattice = life::random_lattice(config.size, &mut rng)?;
        let mut detector = EquilibriumDetector::new();
        let mut counts = vec![0.0; config.sweeps];
        for step_index in 0..config.sweeps {
            lattice = life::step(&lattice);
            let live = life::live_count(&lattice);
            counts[step_index] = f64::from(live);
            if let Some(step) = detector.record(live) {
                info!(run, step, "equilibrium reached");
                equilibrium_steps[run] = step as f64;
                break;
            }
        }
        if !detector.is_settled() {
            warn!(run, "no equilibrium found within the iteration budget");
        }
        live_counts.push(counts);
    }

    let mut results = ResultSet::new();
    results.push("equilibrium_steps", ResultData::Series(equilibrium_steps));
    results.push("live_counts", ResultData::Table(live_counts));
    Ok(results)
}

/// Configuration for the SIRS infection/waning phase sweep.
#[derive(Debug, Clone)]
pub struct PhaseSweepConfig {
    pub size: usize,
    /// Macro sweeps per parameter point (must exceed the burn-in discard).
    pub sweeps: usize,
    /// Step along both probability axes.
    pub resolution: f64,
    /// Fixed I → R probability held constant across the sweep.
    pub recovery: f64,
    pub seed: Option<u64>,
}

/// Sweeps the p1 × p3 phase diagram at fixed p2.
///
/// Per point: fresh random lattice, one measurement per macro sweep, then
/// equilibrium averages of the infected fraction and the scaled variance of
/// the raw infected counts. Emits both axes plus three tables indexed
/// `[infection][waning]`.
pub fn run_phase_sweep(config: &PhaseSweepConfig) -> Result<ResultSet> {
    validate_sweep(config.sweeps, config.resolution)?;
    let base = base_seed(config.seed);
    let infection_axis = probability_steps(0.0, 1.0, config.resolution);
    let waning_axis = probability_steps(0.0, 1.0, config.resolution);
    info!(
        points = infection_axis.len() * waning_axis.len(),
        sweeps = config.sweeps,
        seed = base,
        "starting SIRS phase sweep"
    );

    let mut mean_fraction = Vec::with_capacity(infection_axis.len());
    let mut mean_squared_fraction = Vec::with_capacity(infection_axis.len());
    let mut count_variance = Vec::with_capacity(infection_axis.len());
    for (row, &infection) in infection_axis.iter().enumerate() {
        let mut fraction_row = Vec::with_capacity(waning_axis.len());
        let mut squared_row = Vec::with_capacity(waning_axis.len());
        let mut variance_row = Vec::with_capacity(waning_axis.len());
        for (col, &waning) in waning_axis.iter().enumerate() {
            let mut rng = stream_rng(base, (row * waning_axis.len() + col) as u64);
            let probabilities = SirsProbabilities::new(infection, config.recovery, waning)?;
            let (fractions, counts) =
                measure_epidemic(config.size, config.sweeps, &probabilities, None, &mut rng)?;

            let average = stats::mean(&fractions)?;
            info!(infection, waning, average, "phase point finished");
            fraction_row.push(average);
            squared_row.push(stats::mean_of_squares(&fractions)?);
            variance_row.push(stats::variance(&counts, config.size)?);
        }
        mean_fraction.push(fraction_row);
        mean_squared_fraction.push(squared_row);
        count_variance.push(variance_row);
    }

    let mut results = ResultSet::new();
    results.push("infection_probabilities", ResultData::Series(infection_axis));
    results.push("waning_probabilities", ResultData::Series(waning_axis));
    results.push("mean_infected_fraction", ResultData::Table(mean_fraction));
    results.push(
        "mean_squared_infected_fraction",
        ResultData::Table(mean_squared_fraction),
    );
    results.push("infected_count_variance", ResultData::Table(count_variance));
    Ok(results)
}

/// Configuration for the immunisation sweep.
#[derive(Debug, Clone)]
pub struct ImmuneSweepConfig {
    pub size: usize,
    pub sweeps: usize,
    /// Step along the immune-fraction axis.
    pub resolution: f64,
    pub seed: Option<u64>,
}

/// Average infection against the fraction of permanently immune sites, with
/// all three transition probabilities fixed at 0.5.
pub fn run_immune_sweep(config: &ImmuneSweepConfig) -> Result<ResultSet> {
    validate_sweep(config.sweeps, config.resolution)?;
    let base = base_seed(config.seed);
    let probabilities = SirsProbabilities::new(0.5, 0.5, 0.5)?;
    let immune_axis = probability_steps(0.0, 1.0, config.resolution);
    info!(
        points = immune_axis.len(),
        sweeps = config.sweeps,
        seed = base,
        "starting SIRS immunisation sweep"
    );

    let mut averages = Vec::with_capacity(immune_axis.len());
    for (point, &immune_fraction) in immune_axis.iter().enumerate() {
        let mut rng = stream_rng(base, point as u64);
        let (fractions, _) = measure_epidemic(
            config.size,
            config.sweeps,
            &probabilities,
            Some(immune_fraction),
            &mut rng,
        )?;
        let average = stats::mean(&fractions)?;
        info!(immune_fraction, average, "immunisation point finished");
        averages.push(average);
    }

    let mut results = ResultSet::new();
    results.push("immune_fractions", ResultData::Series(immune_axis));
    results.push("mean_infected_fraction", ResultData::Series(averages));
    Ok(results)
}

/// Configuration for the wave-regime search along the p2 = p3 = 0.5 cut.
#[derive(Debug, Clone)]
pub struct WavesSearchConfig {
    pub size: usize,
    pub sweeps: usize,
    /// Step along the infection-probability axis.
    pub resolution: f64,
    pub seed: Option<u64>,
}

/// Searches for infection waves along p1 ∈ [0.2, 0.5] with p2 = p3 = 0.5.
///
/// Measures raw infected counts per sweep and emits their equilibrium mean,
/// scaled variance, and jackknife error bar per axis point.
pub fn run_waves_search(config: &WavesSearchConfig) -> Result<ResultSet> {
    validate_sweep(config.sweeps, config.resolution)?;
    let base = base_seed(config.seed);
    let infection_axis = probability_steps(0.2, 0.5, config.resolution);
    info!(
        points = infection_axis.len(),
        sweeps = config.sweeps,
        seed = base,
        "starting SIRS wave search"
    );

    let mut mean_counts = Vec::with_capacity(infection_axis.len());
    let mut variances = Vec::with_capacity(infection_axis.len());
    let mut variance_errors = Vec::with_capacity(infection_axis.len());
    for (point, &infection) in infection_axis.iter().enumerate() {
        let mut rng = stream_rng(base, point as u64);
        let probabilities = SirsProbabilities::new(infection, 0.5, 0.5)?;
        let (_, counts) =
            measure_epidemic(config.size, config.sweeps, &probabilities, None, &mut rng)?;

        let variance = stats::variance(&counts, config.size)?;
        let error = stats::jackknife_error(variance, &counts, config.size)?;
        info!(infection, variance, error, "wave point finished");
        mean_counts.push(stats::mean(&counts)?);
        variances.push(variance);
        variance_errors.push(error);
    }

    let mut results = ResultSet::new();
    results.push("infection_probabilities", ResultData::Series(infection_axis));
    results.push("mean_infected_count", ResultData::Series(mean_counts));
    results.push("infected_count_variance", ResultData::Series(variances));
    results.push("variance_error", ResultData::Series(variance_errors));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_steps_cover_inclusive_ranges() {
        let unit = probability_steps(0.0, 1.0, 0.25);
        assert_eq!(unit.len(), 5);
        assert_eq!(unit[0], 0.0);
        assert!((unit[4] - 1.0).abs() < 1e-12);

        let cut = probability_steps(0.2, 0.5, 0.1);
        assert_eq!(cut.len(), 4);
        assert!((cut[3] - 0.5).abs() < 1e-12);

        // Accumulated rounding must never exceed the probability bound.
        assert!(
            probability_steps(0.0, 1.0, 0.05)
                .iter()
                .all(|&p| (0.0..=1.0).contains(&p))
        );
    }

    #[test]
    fn stream_rngs_are_deterministic_and_distinct() {
        use rand::Rng;
        let a: u64 = stream_rng(42, 0).random();
        let b: u64 = stream_rng(42, 0).random();
        let c: u64 = stream_rng(42, 1).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sweep_validation_rejects_degenerate_inputs() {
        assert!(validate_sweep(BURN_IN, 0.1).is_err());
        assert!(validate_sweep(200, 0.0).is_err());
        assert!(validate_sweep(200, 1.5).is_err());
        assert!(validate_sweep(200, 0.1).is_ok());
    }
}
