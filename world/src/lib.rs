#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only world context for the Loon balloon router.
//!
//! The world is built exactly once from a parsed [`ProblemInstance`] and never
//! mutated afterwards. Systems borrow it and read through the [`query`]
//! functions, so any number of simulated balloons can share the same context
//! without coordination.

mod area;
mod wind;

use loon_core::{GridCell, GridDimensions, MissionParameters, ProblemInstance};

pub use area::{AreaModel, CoverageMask, MaskOffset};
pub use wind::WindField;

/// Immutable context shared by every simulation run.
#[derive(Clone, Debug)]
pub struct World {
    dimensions: GridDimensions,
    mission: MissionParameters,
    launch: GridCell,
    area: AreaModel,
    winds: WindField,
}

impl World {
    /// Builds the area model and wind field from a parsed problem instance.
    #[must_use]
    pub fn new(instance: &ProblemInstance) -> Self {
        let dimensions = instance.dimensions();
        let mission = instance.mission();
        Self {
            dimensions,
            mission,
            launch: instance.launch(),
            area: AreaModel::new(dimensions, mission.coverage_radius(), instance.targets()),
            winds: WindField::new(dimensions, instance.winds().to_vec()),
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use loon_core::{GridCell, GridDimensions, MissionParameters, WindVector};

    use super::{AreaModel, CoverageMask, World};

    /// Grid dimensions of the world.
    #[must_use]
    pub fn dimensions(world: &World) -> GridDimensions {
        world.dimensions
    }

    /// Mission-wide parameters.
    #[must_use]
    pub fn mission(world: &World) -> MissionParameters {
        world.mission
    }

    /// Cell every balloon launches from.
    #[must_use]
    pub fn launch(world: &World) -> GridCell {
        world.launch
    }

    /// Provides read-only access to the area model.
    #[must_use]
    pub fn area(world: &World) -> &AreaModel {
        &world.area
    }

    /// Coverage mask derived from the mission's coverage radius.
    #[must_use]
    pub fn coverage_mask(world: &World) -> &CoverageMask {
        world.area.mask()
    }

    /// Score map value at `cell`.
    #[must_use]
    pub fn score_at(world: &World, cell: GridCell) -> u64 {
        world.area.score_at(cell)
    }

    /// Average of the per-row best scores, computed during setup.
    #[must_use]
    pub fn mean_score(world: &World) -> f64 {
        world.area.mean_score()
    }

    /// Wind blowing at `altitude` over `cell`.
    #[must_use]
    pub fn wind_at(world: &World, altitude: u32, cell: GridCell) -> Option<WindVector> {
        world.winds.wind_at(altitude, cell)
    }
}
