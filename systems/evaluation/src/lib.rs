#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Replays an action program and measures the coverage it achieves.

use std::collections::BTreeSet;

use loon_core::{ActionProgram, AltitudeChange, GridCell};
use loon_system_navigation::{Balloon, Strategy};
use loon_world::{query, World};
use thiserror::Error;

/// Reasons a program cannot be replayed against a world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The program steers a different number of balloons than the mission flies.
    #[error("program steers {found} balloons but the mission flies {expected}")]
    BalloonCountMismatch {
        /// Balloon count declared by the mission.
        expected: usize,
        /// Balloon count found in the program.
        found: usize,
    },
    /// The program covers a different number of turns than the mission lasts.
    #[error("program lasts {found} turns but the mission lasts {expected}")]
    TurnCountMismatch {
        /// Turn count declared by the mission.
        expected: usize,
        /// Turn count found in the program.
        found: usize,
    },
    /// A change would move a balloon below the ground, back onto the ground
    /// after launch, or above the top layer.
    #[error("balloon {balloon} leaves the altitude range on turn {turn}")]
    AltitudeOutOfRange {
        /// Turn on which the offending change is applied.
        turn: usize,
        /// Balloon performing the change.
        balloon: usize,
    },
}

/// Coverage achieved by a replayed program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    per_turn: Vec<u64>,
    balloons_aloft: usize,
}

impl EvaluationReport {
    /// Total number of target-turns covered.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.per_turn.iter().sum()
    }

    /// Targets covered on each turn.
    #[must_use]
    pub fn per_turn(&self) -> &[u64] {
        &self.per_turn
    }

    /// Launched balloons still over the grid after the last turn.
    #[must_use]
    pub const fn balloons_aloft(&self) -> usize {
        self.balloons_aloft
    }
}

/// Pure system that judges action programs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluation;

impl Evaluation {
    /// Flies every balloon through `program` and counts the targets covered.
    ///
    /// Each turn, a target cell counts once, weighted by its density, when at
    /// least one live balloon covers it. Balloons holding on the ground have
    /// not launched yet: they neither drift nor cover anything.
    pub fn replay(
        &self,
        world: &World,
        program: &ActionProgram,
    ) -> Result<EvaluationReport, EvaluationError> {
        let mission = query::mission(world);
        let expected_balloons = mission.balloon_count() as usize;
        if program.balloon_count() != expected_balloons {
            return Err(EvaluationError::BalloonCountMismatch {
                expected: expected_balloons,
                found: program.balloon_count(),
            });
        }
        let expected_turns = mission.turn_count() as usize;
        if program.turn_count() != expected_turns {
            return Err(EvaluationError::TurnCountMismatch {
                expected: expected_turns,
                found: program.turn_count(),
            });
        }

        let altitudes = query::dimensions(world).altitudes();
        let area = query::area(world);
        let mut fleet =
            vec![Balloon::launch(query::launch(world), Strategy::Random); expected_balloons];
        let mut per_turn = Vec::with_capacity(expected_turns);
        let mut covered = BTreeSet::new();

        for (turn, changes) in program.turns().enumerate() {
            covered.clear();
            for (balloon, (state, change)) in fleet.iter_mut().zip(changes).enumerate() {
                if !state.is_alive(world) {
                    continue;
                }
                if !within_range(state.altitude(), *change, altitudes) {
                    return Err(EvaluationError::AltitudeOutOfRange { turn, balloon });
                }
                if state.altitude() == 0 && *change == AltitudeChange::Hold {
                    continue;
                }
                state.steer(world, *change);
                if let Some(cell) = state.cell(world) {
                    covered.extend(area.coverage_window(cell));
                }
            }
            per_turn.push(
                covered
                    .iter()
                    .map(|cell: &GridCell| u64::from(area.density_at(*cell)))
                    .sum(),
            );
        }

        let balloons_aloft = fleet
            .iter_mut()
            .map(|balloon| usize::from(balloon.is_alive(world) && balloon.altitude() > 0))
            .sum();
        Ok(EvaluationReport {
            per_turn,
            balloons_aloft,
        })
    }
}

/// Launched balloons fly in `[1, altitudes)`; grounded ones may only hold or climb.
fn within_range(altitude: u32, change: AltitudeChange, altitudes: u32) -> bool {
    let floor = i64::from(altitude.min(1));
    let next = i64::from(altitude) + i64::from(change.delta());
    next >= floor && next < i64::from(altitudes)
}
