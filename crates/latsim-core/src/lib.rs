//! Core lattice engines and statistical estimators shared across the latsim
//! workspace.
//!
//! Two models run on the same periodic square lattice: Conway's Game of Life
//! (deterministic, synchronous Moore-neighborhood updates) and the SIRS
//! epidemic model (stochastic, asynchronous single-site von Neumann updates).
//! The estimators in [`stats`] turn the time series those engines produce into
//! equilibrium averages, variances, and jackknife error bars. Drivers that
//! sweep parameters and persist [`ResultSet`] payloads live in `latsim-app`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use thiserror::Error;

/// Errors raised when constructing lattices or validating model parameters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A seed pattern would overhang the lattice boundary.
    #[error("{pattern:?} pattern does not fit a {size}x{size} lattice")]
    PatternTooLarge {
        pattern: life::SeedPattern,
        size: usize,
    },
}

/// Square N×N lattice with toroidal (wrap-around) neighbor topology.
///
/// Cells are stored row-major in a flat vector. All coordinate access wraps
/// both axes, so every site has a full neighbor set regardless of position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy> Lattice<T> {
    /// Construct a lattice with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Result<Self, LatticeError> {
        if size == 0 {
            return Err(LatticeError::InvalidConfig(
                "lattice size must be non-zero",
            ));
        }
        Ok(Self {
            size,
            cells: vec![value; size * size],
        })
    }

    /// Construct a lattice from a row-major cell vector of length `size²`.
    pub fn from_cells(size: usize, cells: Vec<T>) -> Result<Self, LatticeError> {
        if size == 0 {
            return Err(LatticeError::InvalidConfig(
                "lattice size must be non-zero",
            ));
        }
        if cells.len() != size * size {
            return Err(LatticeError::InvalidConfig(
                "cell vector length must equal size squared",
            ));
        }
        Ok(Self { size, cells })
    }

    /// Side length N of the lattice.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of sites, N².
    #[must_use]
    pub const fn site_count(&self) -> usize {
        self.size * self.size
    }

    /// Row-major view of the cells.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Returns the flat index for an in-range `(i, j)`.
    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    /// Maps a signed coordinate onto the lattice via periodic wrap.
    #[inline]
    fn wrap(&self, k: isize) -> usize {
        k.rem_euclid(self.size as isize) as usize
    }

    /// Reads the cell at `(i, j)`, wrapping both coordinates.
    #[inline]
    pub fn get(&self, i: isize, j: isize) -> T {
        let idx = self.offset(self.wrap(i), self.wrap(j));
        self.cells[idx]
    }

    /// Writes the cell at `(i, j)`, wrapping both coordinates.
    #[inline]
    pub fn set(&mut self, i: isize, j: isize, value: T) {
        let idx = self.offset(self.wrap(i), self.wrap(j));
        self.cells[idx] = value;
    }
}

impl Lattice<u8> {
    /// For every cell simultaneously, the sum of the listed shifted copies of
    /// the grid.
    ///
    /// A shift of `(di, dj)` contributes the value of the cell `di` rows up
    /// and `dj` columns left (with periodic wrap), so summing over the eight
    /// Moore offsets yields each cell's live-neighbor count in one pass over
    /// the whole grid.
    #[must_use]
    pub fn shifted_sums(&self, shifts: &[(isize, isize)]) -> Vec<u32> {
        let n = self.size as isize;
        let mut sums = vec![0u32; self.cells.len()];
        for &(di, dj) in shifts {
            for i in 0..n {
                for j in 0..n {
                    let idx = self.offset(i as usize, j as usize);
                    sums[idx] += u32::from(self.get(i - di, j - dj));
                }
            }
        }
        sums
    }
}

/// Conway's Game of Life on a periodic lattice.
///
/// Cells take values 0 (dead) or 1 (live). Updates are synchronous: every
/// cell's fate is decided from the same input snapshot, and [`step`] returns a
/// fresh lattice so callers replace their binding each generation.
pub mod life {
    use super::{Lattice, LatticeError};
    use rand::Rng;

    /// The eight Moore-neighborhood offsets (orthogonal + diagonal).
    pub const MOORE_SHIFTS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    /// Uniform random lattice over {dead, live}.
    pub fn random_lattice<R: Rng + ?Sized>(
        size: usize,
        rng: &mut R,
    ) -> Result<Lattice<u8>, LatticeError> {
        let cells = (0..size * size)
            .map(|_| rng.random_range(0..=1u8))
            .collect();
        Lattice::from_cells(size, cells)
    }

    /// Advances the lattice by one synchronous generation (B3/S23).
    ///
    /// A live cell with 2 or 3 live Moore neighbors survives; a dead cell
    /// with exactly 3 live neighbors is born; every other cell is dead in the
    /// returned lattice. The input is not mutated.
    #[must_use]
    pub fn step(lattice: &Lattice<u8>) -> Lattice<u8> {
        let neighbor_counts = lattice.shifted_sums(&MOORE_SHIFTS);
        let cells = lattice
            .cells()
            .iter()
            .zip(&neighbor_counts)
            .map(|(&cell, &live_neighbors)| {
                u8::from(if cell == 1 {
                    live_neighbors == 2 || live_neighbors == 3
                } else {
                    live_neighbors == 3
                })
            })
            .collect();
        Lattice {
            size: lattice.size,
            cells,
        }
    }

    /// Number of live cells.
    #[must_use]
    pub fn live_count(lattice: &Lattice<u8>) -> u32 {
        lattice.cells().iter().map(|&cell| u32::from(cell)).sum()
    }

    /// Center of mass `(mean column, mean row)` of the live cells.
    ///
    /// Returns `None` when any live cell touches the lattice boundary (a
    /// pattern straddling the wrap would corrupt the average) or when no cell
    /// is live.
    #[must_use]
    pub fn center_of_mass(lattice: &Lattice<u8>) -> Option<(f64, f64)> {
        let n = lattice.size();
        let cells = lattice.cells();
        let last = n - 1;
        for k in 0..n {
            let boundary_live = cells[lattice.offset(0, k)] == 1
                || cells[lattice.offset(last, k)] == 1
                || cells[lattice.offset(k, 0)] == 1
                || cells[lattice.offset(k, last)] == 1;
            if boundary_live {
                return None;
            }
        }

        let mut live = 0usize;
        let mut column_sum = 0.0;
        let mut row_sum = 0.0;
        for i in 0..n {
            for j in 0..n {
                if cells[lattice.offset(i, j)] == 1 {
                    live += 1;
                    column_sum += j as f64;
                    row_sum += i as f64;
                }
            }
        }
        if live == 0 {
            return None;
        }
        Some((column_sum / live as f64, row_sum / live as f64))
    }

    /// Fixed starting configurations placed centered on the lattice.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SeedPattern {
        /// Period-4 traveling glider.
        Glider,
        /// Period-2 oscillator, three cells in a row.
        Blinker,
        /// Six-cell still life.
        Beehive,
        /// Four-cell "tub" still life.
        Flower,
        /// Four-by-four crab arrangement.
        Crab,
        /// Hollow 3×10 capsule: two long bars closed off by single end cells.
        Capsule,
    }

    impl SeedPattern {
        /// The pattern's cell matrix, row-major.
        #[must_use]
        pub fn cells(self) -> &'static [&'static [u8]] {
            match self {
                SeedPattern::Glider => &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
                SeedPattern::Blinker => &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]],
                SeedPattern::Beehive => &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]],
                SeedPattern::Flower => &[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]],
                SeedPattern::Crab => &[
                    &[0, 1, 0, 0],
                    &[1, 0, 1, 0],
                    &[1, 0, 0, 1],
                    &[0, 1, 1, 0],
                ],
                SeedPattern::Capsule => &[
                    &[0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
                    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                    &[0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
                ],
            }
        }
    }

    /// Builds an all-dead lattice with `pattern` embedded centered at
    /// `(N/2, N/2)`.
    ///
    /// The pattern's top-left corner lands at `(N/2 - rows/2, N/2 - cols/2)`,
    /// which reproduces the asymmetric placements of the wider patterns
    /// (beehive, crab, capsule). Fails when the pattern would overhang the
    /// boundary.
    pub fn seeded(size: usize, pattern: SeedPattern) -> Result<Lattice<u8>, LatticeError> {
        let rows = pattern.cells();
        let height = rows.len();
        let width = rows[0].len();
        let center = size / 2;

        let does_not_fit = LatticeError::PatternTooLarge { pattern, size };
        let top = center.checked_sub(height / 2).ok_or(does_not_fit.clone())?;
        let left = center.checked_sub(width / 2).ok_or(does_not_fit.clone())?;
        if top + height > size || left + width > size {
            return Err(does_not_fit);
        }

        let mut lattice = Lattice::filled(size, 0u8)?;
        for (di, row) in rows.iter().enumerate() {
            for (dj, &cell) in row.iter().enumerate() {
                if cell == 1 {
                    lattice.set((top + di) as isize, (left + dj) as isize, 1);
                }
            }
        }
        Ok(lattice)
    }
}

/// SIRS epidemic model on a periodic lattice.
///
/// Sites cycle susceptible → infected → recovered → susceptible under
/// single-site stochastic updates; permanently immune sites never leave their
/// state. One macro sweep attempts N² updates at independently chosen random
/// sites, applying each accepted transition before the next neighbor check.
pub mod sirs {
    use super::{Lattice, LatticeError};
    use rand::Rng;
    use rand::seq::index;
    use serde::{Deserialize, Serialize};

    /// The four orthogonal von Neumann offsets.
    pub const VON_NEUMANN_SHIFTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Epidemic compartment occupied by a lattice site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Compartment {
        Susceptible,
        Infected,
        Recovered,
        /// Permanently immune; no transition rule applies.
        Immune,
    }

    /// Per-attempt transition probabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct SirsProbabilities {
        /// S → I probability, applied only when an infected neighbor exists.
        pub infection: f64,
        /// I → R probability.
        pub recovery: f64,
        /// R → S probability.
        pub waning: f64,
    }

    impl SirsProbabilities {
        /// Validated constructor; each probability must lie in [0, 1].
        pub fn new(infection: f64, recovery: f64, waning: f64) -> Result<Self, LatticeError> {
            let probabilities = Self {
                infection,
                recovery,
                waning,
            };
            probabilities.validate()?;
            Ok(probabilities)
        }

        /// Rejects probabilities outside the unit interval.
        pub fn validate(&self) -> Result<(), LatticeError> {
            let unit = 0.0..=1.0;
            if !unit.contains(&self.infection)
                || !unit.contains(&self.recovery)
                || !unit.contains(&self.waning)
            {
                return Err(LatticeError::InvalidConfig(
                    "SIRS probabilities must lie in [0, 1]",
                ));
            }
            Ok(())
        }

        /// Parameters driving the system into the absorbing all-susceptible
        /// state.
        #[must_use]
        pub const fn absorbing() -> Self {
            Self {
                infection: 0.2,
                recovery: 0.7,
                waning: 0.7,
            }
        }

        /// Parameters producing traveling infection waves.
        #[must_use]
        pub const fn wave() -> Self {
            Self {
                infection: 0.85,
                recovery: 0.35,
                waning: 0.05,
            }
        }

        /// Parameters sustaining a dynamic equilibrium of all three states.
        #[must_use]
        pub const fn dynamic_equilibrium() -> Self {
            Self {
                infection: 0.8,
                recovery: 0.4,
                waning: 0.5,
            }
        }
    }

    /// Outcome of a single-site candidate update.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SirsUpdate {
        /// Whether the transition fired; the caller writes `state` back into
        /// the lattice only when set.
        pub applied: bool,
        /// The site that was examined.
        pub site: (usize, usize),
        /// The site's candidate state.
        pub state: Compartment,
    }

    /// Uniform random lattice over {infected, susceptible, recovered}.
    pub fn random_lattice<R: Rng + ?Sized>(
        size: usize,
        rng: &mut R,
    ) -> Result<Lattice<Compartment>, LatticeError> {
        let cells = (0..size * size)
            .map(|_| match rng.random_range(0..3u8) {
                0 => Compartment::Infected,
                1 => Compartment::Susceptible,
                _ => Compartment::Recovered,
            })
            .collect();
        Lattice::from_cells(size, cells)
    }

    /// Uniformly chosen site for an asynchronous update.
    pub fn random_site<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (usize, usize) {
        (rng.random_range(0..size), rng.random_range(0..size))
    }

    fn has_infected_neighbor(lattice: &Lattice<Compartment>, site: (usize, usize)) -> bool {
        let (i, j) = (site.0 as isize, site.1 as isize);
        VON_NEUMANN_SHIFTS
            .iter()
            .any(|&(di, dj)| lattice.get(i + di, j + dj) == Compartment::Infected)
    }

    /// Performs one candidate transition for `site`, consuming exactly one
    /// uniform draw from `rng`.
    ///
    /// The draw is taken before dispatching on the site's compartment, so
    /// attempts that cannot change the site (immune sites, susceptible sites
    /// with no infected neighbor) still advance the random stream. A
    /// susceptible site becomes infected with probability `infection` only
    /// when at least one of its four periodic neighbors is infected. The
    /// lattice is not mutated; the caller applies `state` when `applied` is
    /// set.
    pub fn attempt<R: Rng + ?Sized>(
        lattice: &Lattice<Compartment>,
        site: (usize, usize),
        probabilities: &SirsProbabilities,
        rng: &mut R,
    ) -> SirsUpdate {
        let draw: f64 = rng.random();
        let current = lattice.get(site.0 as isize, site.1 as isize);
        let (applied, state) = match current {
            Compartment::Susceptible => {
                if has_infected_neighbor(lattice, site) && draw < probabilities.infection {
                    (true, Compartment::Infected)
                } else {
                    (false, Compartment::Susceptible)
                }
            }
            Compartment::Infected => {
                if draw < probabilities.recovery {
                    (true, Compartment::Recovered)
                } else {
                    (false, Compartment::Infected)
                }
            }
            Compartment::Recovered => {
                if draw < probabilities.waning {
                    (true, Compartment::Susceptible)
                } else {
                    (false, Compartment::Recovered)
                }
            }
            Compartment::Immune => (false, Compartment::Immune),
        };
        SirsUpdate {
            applied,
            site,
            state,
        }
    }

    /// One macro sweep: N² sequential candidate updates at random sites.
    ///
    /// Sites are chosen with replacement, so within a sweep some repeat and
    /// some are skipped. Each accepted transition is written back before the
    /// next attempt's neighbor check; this ordering is a correctness
    /// requirement of the model, not an optimization target.
    pub fn sweep<R: Rng + ?Sized>(
        lattice: &mut Lattice<Compartment>,
        probabilities: &SirsProbabilities,
        rng: &mut R,
    ) {
        for _ in 0..lattice.site_count() {
            let site = random_site(lattice.size(), rng);
            let update = attempt(lattice, site, probabilities, rng);
            if update.applied {
                lattice.set(update.site.0 as isize, update.site.1 as isize, update.state);
            }
        }
    }

    /// Number of sites in each of the three cycling compartments.
    ///
    /// Immune sites are not counted, so the totals sum to N² only on
    /// lattices without immunisation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StateCounts {
        pub susceptible: usize,
        pub infected: usize,
        pub recovered: usize,
    }

    /// Tallies the cycling compartments.
    #[must_use]
    pub fn count_states(lattice: &Lattice<Compartment>) -> StateCounts {
        let mut counts = StateCounts {
            susceptible: 0,
            infected: 0,
            recovered: 0,
        };
        for &cell in lattice.cells() {
            match cell {
                Compartment::Susceptible => counts.susceptible += 1,
                Compartment::Infected => counts.infected += 1,
                Compartment::Recovered => counts.recovered += 1,
                Compartment::Immune => {}
            }
        }
        counts
    }

    /// Fraction of sites currently infected.
    #[must_use]
    pub fn infected_fraction(lattice: &Lattice<Compartment>) -> f64 {
        count_states(lattice).infected as f64 / lattice.site_count() as f64
    }

    /// Returns a copy of the lattice with `round(N² · fraction)` distinct
    /// sites promoted to permanent immunity.
    ///
    /// Sites are drawn uniformly without replacement; all other cells are
    /// unchanged. `fraction` must lie in [0, 1].
    pub fn seed_immune<R: Rng + ?Sized>(
        lattice: &Lattice<Compartment>,
        fraction: f64,
        rng: &mut R,
    ) -> Result<Lattice<Compartment>, LatticeError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(LatticeError::InvalidConfig(
                "immune fraction must lie in [0, 1]",
            ));
        }
        let immune_count = (lattice.site_count() as f64 * fraction).round() as usize;
        let mut cells = lattice.cells().to_vec();
        for idx in index::sample(rng, cells.len(), immune_count) {
            cells[idx] = Compartment::Immune;
        }
        Lattice::from_cells(lattice.size(), cells)
    }
}

/// Number of consecutive unchanged live counts that declare equilibrium.
pub const EQUILIBRIUM_STREAK: usize = 5;

/// Streaming detector over a run's live-count series.
///
/// Feed one count per generation via [`record`](Self::record). The first time
/// five consecutive counts match their predecessor, the step where the stable
/// run began (`j - 5` for detection at step `j`) is latched and reported from
/// then on. A driver whose iteration budget runs out first records the
/// default step 0 as "no equilibrium found".
#[derive(Debug, Clone, Default)]
pub struct EquilibriumDetector {
    previous: Option<u32>,
    streak: usize,
    steps_seen: usize,
    detected: Option<usize>,
}

impl EquilibriumDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes the next live count; returns the equilibrium step once known.
    pub fn record(&mut self, live: u32) -> Option<usize> {
        let index = self.steps_seen;
        self.steps_seen += 1;
        if let Some(previous) = self.previous {
            if live == previous {
                self.streak += 1;
            } else {
                self.streak = 0;
            }
            if self.detected.is_none() && self.streak == EQUILIBRIUM_STREAK {
                self.detected = Some(index - EQUILIBRIUM_STREAK);
            }
        }
        self.previous = Some(live);
        self.detected
    }

    /// The latched equilibrium step, if one was detected.
    #[must_use]
    pub const fn equilibrium_step(&self) -> Option<usize> {
        self.detected
    }

    /// Whether equilibrium has been declared.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.detected.is_some()
    }
}

/// Equilibrium statistics over measurement time series.
///
/// Every estimator discards the first [`BURN_IN`] entries before averaging,
/// and fails with [`StatsError::SeriesTooShort`] when the series cannot
/// absorb the discard.
pub mod stats {
    use thiserror::Error;

    /// Leading entries dropped from every series before estimation.
    pub const BURN_IN: usize = 100;

    /// Errors raised by the statistical estimators.
    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum StatsError {
        /// The series has too few entries to survive the burn-in discard.
        #[error("series of length {len} needs more than {min} entries for burn-in discard")]
        SeriesTooShort { len: usize, min: usize },
        /// Indicates a degenerate lattice size.
        #[error("lattice size must be non-zero")]
        ZeroSize,
    }

    fn equilibrated(series: &[f64]) -> Result<&[f64], StatsError> {
        if series.len() <= BURN_IN {
            return Err(StatsError::SeriesTooShort {
                len: series.len(),
                min: BURN_IN,
            });
        }
        Ok(&series[BURN_IN..])
    }

    /// Mean of the post-burn-in series.
    pub fn mean(series: &[f64]) -> Result<f64, StatsError> {
        let tail = equilibrated(series)?;
        Ok(tail.iter().sum::<f64>() / tail.len() as f64)
    }

    /// Mean of the squared post-burn-in series.
    pub fn mean_of_squares(series: &[f64]) -> Result<f64, StatsError> {
        let tail = equilibrated(series)?;
        Ok(tail.iter().map(|value| value * value).sum::<f64>() / tail.len() as f64)
    }

    /// Scaled variance `(⟨c²⟩ − ⟨c⟩²) / N²` of a raw-count series.
    ///
    /// `counts` must be raw site counts, not fractions; the `N²` scaling is
    /// only correct for counts. This precondition is documented rather than
    /// enforced.
    pub fn variance(counts: &[f64], size: usize) -> Result<f64, StatsError> {
        if size == 0 {
            return Err(StatsError::ZeroSize);
        }
        let cells = (size * size) as f64;
        Ok((mean_of_squares(counts)? - mean(counts)?.powi(2)) / cells)
    }

    /// Jackknife error bar for a variance estimate.
    ///
    /// After the burn-in discard, computes one leave-one-out variance
    /// estimate per remaining index with the same `(⟨c²⟩ − ⟨c⟩²) / N²`
    /// formula, then returns `sqrt(Σ (var_i − variance)²)`. The sum of
    /// squared deviations is deliberately not divided by the replicate
    /// count; downstream consumers depend on this exact scaling.
    pub fn jackknife_error(
        variance_estimate: f64,
        counts: &[f64],
        size: usize,
    ) -> Result<f64, StatsError> {
        if size == 0 {
            return Err(StatsError::ZeroSize);
        }
        let tail = equilibrated(counts)?;
        if tail.len() < 2 {
            return Ok(0.0);
        }

        let cells = (size * size) as f64;
        let retained = (tail.len() - 1) as f64;
        let sum: f64 = tail.iter().sum();
        let sum_of_squares: f64 = tail.iter().map(|value| value * value).sum();

        let mut squared_deviations = 0.0;
        for &left_out in tail {
            let loo_mean = (sum - left_out) / retained;
            let loo_mean_of_squares = (sum_of_squares - left_out * left_out) / retained;
            let loo_variance = (loo_mean_of_squares - loo_mean * loo_mean) / cells;
            let deviation = loo_variance - variance_estimate;
            squared_deviations += deviation * deviation;
        }
        Ok(squared_deviations.sqrt())
    }
}

/// Numeric payload attached to one named result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultData {
    Scalar(f64),
    Series(Vec<f64>),
    Table(Vec<Vec<f64>>),
}

/// Ordered mapping of result names to numeric arrays, handed to the driver
/// for persistence.
///
/// Serializes as a JSON object keyed by name, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(Cow<'static, str>, ResultData)>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named result.
    pub fn push(&mut self, name: impl Into<Cow<'static, str>>, data: ResultData) {
        self.entries.push((name.into(), data));
    }

    /// Looks up a result by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResultData> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, data)| data)
    }

    /// Iterates entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ResultData)> {
        self.entries.iter().map(|(name, data)| (name.as_ref(), data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, data) in &self.entries {
            map.serialize_entry(name, data)?;
        }
        map.end()
    }
}
