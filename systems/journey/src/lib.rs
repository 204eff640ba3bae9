#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulates a single balloon over the full turn horizon.

use std::iter;

use loon_core::AltitudeChange;
use loon_system_navigation::Balloon;
use loon_world::{query, World};
use rand::Rng;

/// One simulated trajectory with its score and the changes that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Journey {
    balloon: Balloon,
    score: f64,
    history: Vec<AltitudeChange>,
}

impl Journey {
    /// Creates an empty journey owning `balloon`.
    #[must_use]
    pub fn new(balloon: Balloon) -> Self {
        Self {
            balloon,
            score: 0.0,
            history: Vec::new(),
        }
    }

    /// Flies the balloon for `turns` turns, scoring each turn it spends over the grid.
    ///
    /// Every turn records an entry, lost or not, so histories of equal horizons
    /// line up. Turns ending more than the coverage radius away from
    /// `target_row` score half.
    pub fn generate<R>(&mut self, world: &World, turns: u32, target_row: i64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let radius = i64::from(query::mission(world).coverage_radius());
        self.score = 0.0;
        self.history.clear();
        self.history.reserve(turns as usize);

        for turn in 0..turns {
            self.history
                .push(self.balloon.change_altitude(world, turn, rng));
            if !self.balloon.is_alive(world) {
                continue;
            }
            let Some(cell) = self.balloon.cell(world) else {
                continue;
            };

            let mut gained = query::score_at(world, cell) as f64;
            if (target_row - i64::from(cell.row())).abs() > radius {
                gained /= 2.0;
            }
            self.score += gained;
        }
    }

    /// Postpones the journey by prepending `turns` holds to its history.
    pub fn delay(&mut self, turns: usize) {
        let _ = self
            .history
            .splice(0..0, iter::repeat(AltitudeChange::Hold).take(turns));
    }

    /// Balloon in its state after the last simulated turn.
    #[must_use]
    pub const fn balloon(&self) -> &Balloon {
        &self.balloon
    }

    /// Accumulated score of the last generated trajectory.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Applied changes, one per turn, including any prepended delay.
    #[must_use]
    pub fn history(&self) -> &[AltitudeChange] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loon_core::GridCell;
    use loon_system_navigation::Strategy;

    #[test]
    fn delays_leave_score_untouched() {
        let mut journey = Journey::new(Balloon::launch(GridCell::new(0, 0), Strategy::Random));
        journey.score = 4.5;
        journey.history = vec![AltitudeChange::Ascend];

        journey.delay(0);
        assert_eq!(journey.history(), &[AltitudeChange::Ascend]);

        journey.delay(2);
        assert_eq!(journey.score(), 4.5);
        assert_eq!(
            journey.history(),
            &[
                AltitudeChange::Hold,
                AltitudeChange::Hold,
                AltitudeChange::Ascend
            ]
        );
    }
}
