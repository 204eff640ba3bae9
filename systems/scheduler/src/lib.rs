#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fleet scheduling: sample probe journeys per latitude band, keep the best of
//! each band and stagger copies of the winners across the real fleet.

use loon_core::{ActionProgram, AltitudeChange};
use loon_system_journey::Journey;
use loon_system_navigation::{Balloon, Strategy};
use loon_world::{query, World};
use rand::Rng;
use tracing::{debug, info};

/// Tuning knobs controlling how the fleet program is searched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    bands: usize,
    journeys_per_band: usize,
    turns_lag: usize,
}

impl Config {
    /// Creates a configuration from the band count, the probe count per band
    /// and the stagger unit.
    #[must_use]
    pub const fn new(bands: usize, journeys_per_band: usize, turns_lag: usize) -> Self {
        Self {
            bands,
            journeys_per_band,
            turns_lag,
        }
    }

    /// Number of latitude bands sampled; each band yields one winning journey.
    #[must_use]
    pub const fn bands(&self) -> usize {
        self.bands
    }

    /// Probe count per band. Sampling is inclusive, so one extra probe is drawn.
    #[must_use]
    pub const fn journeys_per_band(&self) -> usize {
        self.journeys_per_band
    }

    /// Stagger unit; balloon `j` is delayed by `turns_lag * j / bands` extra turns.
    #[must_use]
    pub const fn turns_lag(&self) -> usize {
        self.turns_lag
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(3, 200, 3)
    }
}

/// Outcome of sampling a single latitude band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandSummary {
    /// Zero-based band index.
    pub band: usize,
    /// Row the band's probes were scored against.
    pub target_row: i64,
    /// Sequence number of the winning probe.
    pub probe: usize,
    /// Strategy followed by the winning probe.
    pub strategy: Strategy,
    /// Score reached by the winning probe.
    pub score: f64,
}

/// Program produced by the scheduler along with how each band fared.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetPlan {
    program: ActionProgram,
    bands: Vec<BandSummary>,
}

impl FleetPlan {
    /// Per-turn, per-balloon altitude changes.
    #[must_use]
    pub fn program(&self) -> &ActionProgram {
        &self.program
    }

    /// Winning probe of every band in band order.
    #[must_use]
    pub fn bands(&self) -> &[BandSummary] {
        &self.bands
    }

    /// Consumes the plan, yielding the action program.
    #[must_use]
    pub fn into_program(self) -> ActionProgram {
        self.program
    }
}

/// Pure system that turns a handful of sampled journeys into a fleet program.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config: Config,
}

impl Scheduler {
    /// Creates a scheduler using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the scheduler was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Samples every band and assembles the program for the whole fleet.
    ///
    /// All randomness is drawn from `rng`, so equal seeds yield equal plans.
    pub fn plan<R>(&self, world: &World, rng: &mut R) -> FleetPlan
    where
        R: Rng + ?Sized,
    {
        let mission = query::mission(world);
        let launch = Balloon::launch(query::launch(world), Strategy::for_probe(0));
        let spacing = i64::from(mission.coverage_radius()) * 2;

        let mut winners = Vec::with_capacity(self.config.bands);
        let mut bands = Vec::with_capacity(self.config.bands);
        for band in 0..self.config.bands {
            let target_row = spacing * (band as i64 + 1);
            let (journey, summary) = self.sample_band(world, launch, band, target_row, rng);
            debug!(
                band,
                target_row,
                probe = summary.probe,
                strategy = ?summary.strategy,
                score = summary.score,
                "selected band winner"
            );
            winners.push(journey);
            bands.push(summary);
        }

        let turns = mission.turn_count() as usize;
        let fleet: Vec<Option<Journey>> = (0..mission.balloon_count() as usize)
            .map(|balloon| self.stagger(&winners, balloon, turns))
            .collect();
        let program = ActionProgram::from_fn(turns, fleet.len(), |turn, balloon| {
            fleet[balloon]
                .as_ref()
                .and_then(|journey| journey.history().get(turn).copied())
                .unwrap_or(AltitudeChange::Hold)
        });

        info!(
            turns = program.turn_count(),
            balloons = program.balloon_count(),
            bands = bands.len(),
            "assembled fleet program"
        );

        FleetPlan { program, bands }
    }

    fn sample_band<R>(
        &self,
        world: &World,
        launch: Balloon,
        band: usize,
        target_row: i64,
        rng: &mut R,
    ) -> (Journey, BandSummary)
    where
        R: Rng + ?Sized,
    {
        let turns = query::mission(world).turn_count();
        let fly = |probe: usize, rng: &mut R| {
            let mut journey = Journey::new(launch.with_strategy(Strategy::for_probe(probe)));
            journey.generate(world, turns, target_row, rng);
            journey
        };

        let mut best_probe = 0;
        let mut best = fly(0, &mut *rng);
        for probe in 1..=self.config.journeys_per_band {
            let candidate = fly(probe, &mut *rng);
            if candidate.score() > best.score() {
                best_probe = probe;
                best = candidate;
            }
        }

        let summary = BandSummary {
            band,
            target_row,
            probe: best_probe,
            strategy: Strategy::for_probe(best_probe),
            score: best.score(),
        };
        (best, summary)
    }

    /// Copy of the band winner assigned to `balloon`, delayed by its launch offset.
    ///
    /// The offset never exceeds `horizon`, since later turns are never flown.
    fn stagger(&self, winners: &[Journey], balloon: usize, horizon: usize) -> Option<Journey> {
        let bands = winners.len();
        let mut journey = winners.get(balloon.checked_rem(bands)?)?.clone();
        let lag = self.config.turns_lag.saturating_mul(balloon) / bands;
        journey.delay((balloon % 2).saturating_add(lag).min(horizon));
        Some(journey)
    }
}
