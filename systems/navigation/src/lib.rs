#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wind-driven balloon dynamics and the altitude strategies that steer them.

use loon_core::{AltitudeChange, GridCell, WindVector};
use loon_world::{query, World};
use rand::Rng;

/// Altitude-change policy a balloon follows after its launch turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Sink while over a promising area, otherwise hold or climb.
    Hotspot,
    /// Hold or climb while over a promising area, otherwise sink.
    ReverseHotspot,
    /// Pick any change uniformly.
    Random,
}

impl Strategy {
    /// Every strategy in probe assignment order.
    pub const ALL: [Self; 3] = [Self::Hotspot, Self::ReverseHotspot, Self::Random];

    /// Strategy assigned to the probe with the provided sequence number.
    #[must_use]
    pub const fn for_probe(probe: usize) -> Self {
        Self::ALL[probe % Self::ALL.len()]
    }

    /// Change the strategy asks for before altitude limits are applied.
    pub fn desired_change<R>(self, balloon: &Balloon, world: &World, rng: &mut R) -> AltitudeChange
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Hotspot => {
                if balloon.on_spot(world) {
                    AltitudeChange::Descend
                } else {
                    hold_or_ascend(rng)
                }
            }
            Self::ReverseHotspot => {
                if balloon.on_spot(world) {
                    hold_or_ascend(rng)
                } else {
                    AltitudeChange::Descend
                }
            }
            Self::Random => {
                AltitudeChange::from_delta(rng.gen_range(-1..=1)).unwrap_or_default()
            }
        }
    }
}

fn hold_or_ascend<R>(rng: &mut R) -> AltitudeChange
where
    R: Rng + ?Sized,
{
    if rng.gen_range(0..=1) == 0 {
        AltitudeChange::Hold
    } else {
        AltitudeChange::Ascend
    }
}

/// A single balloon drifting over the world.
///
/// Balloons are plain values: cloning one yields an independent copy whose
/// position, altitude and liveness evolve independently of its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Balloon {
    row: i32,
    column: u32,
    altitude: u32,
    lost: bool,
    strategy: Strategy,
}

impl Balloon {
    /// Creates a balloon resting on the ground at `cell`.
    #[must_use]
    pub fn launch(cell: GridCell, strategy: Strategy) -> Self {
        Self {
            row: i32::try_from(cell.row()).unwrap_or(i32::MAX),
            column: cell.column(),
            altitude: 0,
            lost: false,
            strategy,
        }
    }

    /// Copy of this balloon following a different strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Current row; negative or past the last row once the balloon drifted off.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Current column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Current altitude level.
    #[must_use]
    pub const fn altitude(&self) -> u32 {
        self.altitude
    }

    /// Strategy steering the balloon.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Cell under the balloon, or `None` when it has left the grid.
    #[must_use]
    pub fn cell(&self, world: &World) -> Option<GridCell> {
        if self.lost || !query::dimensions(world).contains_row(i64::from(self.row)) {
            return None;
        }
        Some(GridCell::new(self.row as u32, self.column))
    }

    /// Reports whether the balloon is still over the grid.
    ///
    /// Once the balloon is seen outside `[0, rows)` it stays lost for good.
    pub fn is_alive(&mut self, world: &World) -> bool {
        if !query::dimensions(world).contains_row(i64::from(self.row)) {
            self.lost = true;
        }
        !self.lost
    }

    /// Reports whether the cell `coverage_radius` rows ahead scores above a
    /// quarter of the mean score.
    ///
    /// The projected row wraps modulo `rows`, unlike every other row lookup.
    #[must_use]
    pub fn on_spot(&self, world: &World) -> bool {
        let dimensions = query::dimensions(world);
        if dimensions.rows() == 0 {
            return false;
        }
        let radius = i64::from(query::mission(world).coverage_radius());
        let projected = (i64::from(self.row) + radius).rem_euclid(i64::from(dimensions.rows()));
        let cell = GridCell::new(projected as u32, self.column);
        query::score_at(world, cell) as f64 > query::mean_score(world) / 4.0
    }

    /// Runs one turn: pick a change, keep it within altitude limits, apply it
    /// and drift with the wind. Returns the change that was actually applied.
    ///
    /// The launch turn always tries to climb. Lost balloons hold and stay put.
    pub fn change_altitude<R>(&mut self, world: &World, turn: u32, rng: &mut R) -> AltitudeChange
    where
        R: Rng + ?Sized,
    {
        if !self.is_alive(world) {
            return AltitudeChange::Hold;
        }

        let desired = if turn == 0 {
            AltitudeChange::Ascend
        } else {
            self.strategy.desired_change(self, world, rng)
        };
        let change = self.limit(desired, query::dimensions(world).altitudes());
        self.steer(world, change);
        change
    }

    /// Applies `change` verbatim and drifts with the wind found at the new
    /// altitude over the current cell.
    ///
    /// Lost balloons are left untouched.
    pub fn steer(&mut self, world: &World, change: AltitudeChange) {
        let Some(cell) = self.cell(world) else {
            return;
        };
        self.altitude = self.altitude.saturating_add_signed(change.delta());
        let wind = query::wind_at(world, self.altitude, cell).unwrap_or(WindVector::CALM);
        self.row = self.row.saturating_add(wind.row_delta());
        let column = i64::from(self.column) + i64::from(wind.column_delta());
        self.column = query::dimensions(world).wrap_column(column);
    }

    fn limit(&self, desired: AltitudeChange, altitudes: u32) -> AltitudeChange {
        let mut change = desired;
        if self.altitude < 2 && change.delta() < 0 {
            change = change.raised();
        }
        if self.altitude.saturating_add(2) > altitudes && change.delta() > 0 {
            change = change.lowered();
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loon_core::{GridDimensions, MissionParameters, ProblemInstance};

    fn calm_world() -> World {
        let dimensions = GridDimensions::new(4, 4, 3);
        World::new(&ProblemInstance::new(
            dimensions,
            MissionParameters::new(1, 1, 4),
            GridCell::new(1, 1),
            vec![GridCell::new(1, 1)],
            vec![WindVector::CALM; dimensions.cell_count() * 3],
        ))
    }

    #[test]
    fn loss_is_permanent() {
        let world = calm_world();
        let mut balloon = Balloon::launch(GridCell::new(1, 1), Strategy::Random);
        assert!(balloon.is_alive(&world));

        balloon.row = -1;
        assert!(!balloon.is_alive(&world));

        balloon.row = 2;
        assert!(!balloon.is_alive(&world));
        assert_eq!(balloon.cell(&world), None);
    }

    #[test]
    fn floor_and_ceiling_soften_changes() {
        let mut balloon = Balloon::launch(GridCell::new(0, 0), Strategy::Random);
        assert_eq!(
            balloon.limit(AltitudeChange::Descend, 3),
            AltitudeChange::Hold
        );

        balloon.altitude = 1;
        assert_eq!(
            balloon.limit(AltitudeChange::Descend, 3),
            AltitudeChange::Hold
        );
        assert_eq!(balloon.limit(AltitudeChange::Ascend, 3), AltitudeChange::Ascend);

        balloon.altitude = 2;
        assert_eq!(balloon.limit(AltitudeChange::Ascend, 3), AltitudeChange::Hold);
        assert_eq!(
            balloon.limit(AltitudeChange::Descend, 3),
            AltitudeChange::Descend
        );
    }

    #[test]
    fn probes_cycle_through_strategies() {
        assert_eq!(Strategy::for_probe(0), Strategy::Hotspot);
        assert_eq!(Strategy::for_probe(1), Strategy::ReverseHotspot);
        assert_eq!(Strategy::for_probe(2), Strategy::Random);
        assert_eq!(Strategy::for_probe(3), Strategy::Hotspot);
    }
}
