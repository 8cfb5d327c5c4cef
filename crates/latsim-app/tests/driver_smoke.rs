use latsim_app::{
    ImmuneSweepConfig, LifeRunConfig, PhaseSweepConfig, run_immune_sweep, run_life_equilibrium,
    run_phase_sweep,
};
use latsim_core::ResultData;

#[test]
fn life_driver_emits_equilibrium_arrays() {
    let config = LifeRunConfig {
        size: 10,
        runs: 3,
        sweeps: 60,
        seed: Some(1),
    };
    let results = run_life_equilibrium(&config).expect("life batch");

    let Some(ResultData::Series(steps)) = results.get("equilibrium_steps") else {
        panic!("equilibrium_steps series missing");
    };
    assert_eq!(steps.len(), 3);

    let Some(ResultData::Table(counts)) = results.get("live_counts") else {
        panic!("live_counts table missing");
    };
    assert_eq!(counts.len(), 3);
    assert!(counts.iter().all(|row| row.len() == 60));

    // Seeded batches replay identically.
    let replay = run_life_equilibrium(&config).expect("replayed batch");
    assert_eq!(results, replay);
}

#[test]
fn phase_driver_emits_square_tables() {
    let config = PhaseSweepConfig {
        size: 8,
        sweeps: 110,
        resolution: 0.5,
        recovery: 0.5,
        seed: Some(7),
    };
    let results = run_phase_sweep(&config).expect("phase sweep");

    let Some(ResultData::Series(axis)) = results.get("infection_probabilities") else {
        panic!("axis missing");
    };
    assert_eq!(axis.len(), 3);

    for name in [
        "mean_infected_fraction",
        "mean_squared_infected_fraction",
        "infected_count_variance",
    ] {
        let Some(ResultData::Table(table)) = results.get(name) else {
            panic!("{name} table missing");
        };
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|row| row.len() == 3));
        assert!(
            table
                .iter()
                .flatten()
                .all(|value| value.is_finite() && *value >= 0.0),
            "{name} should hold finite non-negative values"
        );
    }
}

#[test]
fn fully_immunised_lattice_never_carries_infection() {
    let config = ImmuneSweepConfig {
        size: 10,
        sweeps: 110,
        resolution: 1.0,
        seed: Some(3),
    };
    let results = run_immune_sweep(&config).expect("immune sweep");

    let Some(ResultData::Series(fractions)) = results.get("immune_fractions") else {
        panic!("immune_fractions missing");
    };
    assert_eq!(fractions, &vec![0.0, 1.0]);

    let Some(ResultData::Series(averages)) = results.get("mean_infected_fraction") else {
        panic!("mean_infected_fraction missing");
    };
    assert_eq!(averages.len(), 2);
    assert_eq!(
        averages[1], 0.0,
        "a fully immune lattice has no infected sites to average"
    );
}

#[test]
fn drivers_reject_budget_below_burn_in() {
    let config = PhaseSweepConfig {
        size: 8,
        sweeps: 50,
        resolution: 0.5,
        recovery: 0.5,
        seed: Some(7),
    };
    assert!(run_phase_sweep(&config).is_err());
}
