#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Loon balloon router.
//!
//! This crate defines the plain values that flow between the adapter that
//! reads a problem instance, the immutable world built from it, and the pure
//! systems that simulate balloons and schedule the fleet. Adapters produce a
//! [`ProblemInstance`], the world derives its read-only context from that
//! instance exactly once, and the scheduler answers with an [`ActionProgram`]
//! describing one [`AltitudeChange`] per balloon per turn.

use serde::{Deserialize, Serialize};

/// Dimensions of the cylindrical grid world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    rows: u32,
    columns: u32,
    altitudes: u32,
}

impl GridDimensions {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(rows: u32, columns: u32, altitudes: u32) -> Self {
        Self {
            rows,
            columns,
            altitudes,
        }
    }

    /// Number of rows (latitudes). Rows do not wrap.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns (longitudes). Columns wrap around the cylinder.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of altitude levels for which wind is defined.
    #[must_use]
    pub const fn altitudes(&self) -> u32 {
        self.altitudes
    }

    /// Number of cells in a single altitude layer.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the signed row index lies inside `[0, rows)`.
    #[must_use]
    pub const fn contains_row(&self, row: i64) -> bool {
        row >= 0 && row < self.rows as i64
    }

    /// Wraps a signed column index onto the cylinder.
    #[must_use]
    pub fn wrap_column(&self, column: i64) -> u32 {
        match column.checked_rem_euclid(i64::from(self.columns)) {
            Some(wrapped) => wrapped as u32,
            None => 0,
        }
    }

    /// Dense row-major index of a cell within one layer, if the cell is in range.
    #[must_use]
    pub fn cell_index(&self, cell: GridCell) -> Option<usize> {
        if cell.row >= self.rows || cell.column >= self.columns {
            return None;
        }
        Some(cell.row as usize * self.columns as usize + cell.column as usize)
    }
}

/// Mission-wide parameters read alongside the grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionParameters {
    coverage_radius: u32,
    balloon_count: u32,
    turn_count: u32,
}

impl MissionParameters {
    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(coverage_radius: u32, balloon_count: u32, turn_count: u32) -> Self {
        Self {
            coverage_radius,
            balloon_count,
            turn_count,
        }
    }

    /// Radius of the circular window a balloon covers.
    #[must_use]
    pub const fn coverage_radius(&self) -> u32 {
        self.coverage_radius
    }

    /// Number of balloons in the fleet.
    #[must_use]
    pub const fn balloon_count(&self) -> u32 {
        self.balloon_count
    }

    /// Number of turns in the simulation horizon.
    #[must_use]
    pub const fn turn_count(&self) -> u32 {
        self.turn_count
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    row: u32,
    column: u32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Drift applied to a balloon by the wind at one altitude and cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindVector {
    row_delta: i32,
    column_delta: i32,
}

impl WindVector {
    /// Wind that leaves a balloon in place.
    pub const CALM: Self = Self::new(0, 0);

    /// Creates a new wind vector.
    #[must_use]
    pub const fn new(row_delta: i32, column_delta: i32) -> Self {
        Self {
            row_delta,
            column_delta,
        }
    }

    /// Signed number of rows travelled in one turn.
    #[must_use]
    pub const fn row_delta(&self) -> i32 {
        self.row_delta
    }

    /// Signed number of columns travelled in one turn.
    #[must_use]
    pub const fn column_delta(&self) -> i32 {
        self.column_delta
    }
}

/// Altitude adjustment a balloon performs at the start of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeChange {
    /// Drop one altitude level.
    Descend,
    /// Keep the current altitude.
    #[default]
    Hold,
    /// Climb one altitude level.
    Ascend,
}

impl AltitudeChange {
    /// Signed altitude delta, one of `-1`, `0` or `+1`.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Descend => -1,
            Self::Hold => 0,
            Self::Ascend => 1,
        }
    }

    /// Converts a signed delta back into a change, rejecting magnitudes above one.
    #[must_use]
    pub const fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            -1 => Some(Self::Descend),
            0 => Some(Self::Hold),
            1 => Some(Self::Ascend),
            _ => None,
        }
    }

    /// Change nudged one step upward; `Ascend` is returned unchanged.
    #[must_use]
    pub const fn raised(self) -> Self {
        match self {
            Self::Descend => Self::Hold,
            Self::Hold | Self::Ascend => Self::Ascend,
        }
    }

    /// Change nudged one step downward; `Descend` is returned unchanged.
    #[must_use]
    pub const fn lowered(self) -> Self {
        match self {
            Self::Ascend => Self::Hold,
            Self::Hold | Self::Descend => Self::Descend,
        }
    }
}

/// Fully parsed problem instance handed to the world at setup.
///
/// Wind vectors are stored altitude-major, then row-major within each layer,
/// so the vector for `(altitude, row, column)` lives at
/// `(altitude * rows + row) * columns + column`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemInstance {
    dimensions: GridDimensions,
    mission: MissionParameters,
    launch: GridCell,
    targets: Vec<GridCell>,
    winds: Vec<WindVector>,
}

impl ProblemInstance {
    /// Bundles the parsed parts of a problem instance.
    #[must_use]
    pub fn new(
        dimensions: GridDimensions,
        mission: MissionParameters,
        launch: GridCell,
        targets: Vec<GridCell>,
        winds: Vec<WindVector>,
    ) -> Self {
        Self {
            dimensions,
            mission,
            launch,
            targets,
            winds,
        }
    }

    /// Grid dimensions of the world.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Mission-wide parameters.
    #[must_use]
    pub const fn mission(&self) -> MissionParameters {
        self.mission
    }

    /// Cell every balloon launches from, at altitude zero.
    #[must_use]
    pub const fn launch(&self) -> GridCell {
        self.launch
    }

    /// Target cells; duplicates accumulate density.
    #[must_use]
    pub fn targets(&self) -> &[GridCell] {
        &self.targets
    }

    /// Flattened wind vectors for every altitude, row and column.
    #[must_use]
    pub fn winds(&self) -> &[WindVector] {
        &self.winds
    }
}

/// Per-turn, per-balloon altitude changes forming the final answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionProgram {
    turn_count: usize,
    balloon_count: usize,
    actions: Vec<AltitudeChange>,
}

impl ActionProgram {
    /// Creates a program from turn-major actions, rejecting mismatched lengths.
    #[must_use]
    pub fn new(
        turn_count: usize,
        balloon_count: usize,
        actions: Vec<AltitudeChange>,
    ) -> Option<Self> {
        if actions.len() != turn_count.checked_mul(balloon_count)? {
            return None;
        }
        Some(Self {
            turn_count,
            balloon_count,
            actions,
        })
    }

    /// Builds a program by asking `action` for every `(turn, balloon)` pair.
    #[must_use]
    pub fn from_fn<F>(turn_count: usize, balloon_count: usize, mut action: F) -> Self
    where
        F: FnMut(usize, usize) -> AltitudeChange,
    {
        let mut actions = Vec::with_capacity(turn_count * balloon_count);
        for turn in 0..turn_count {
            for balloon in 0..balloon_count {
                actions.push(action(turn, balloon));
            }
        }
        Self {
            turn_count,
            balloon_count,
            actions,
        }
    }

    /// Number of turns covered by the program.
    #[must_use]
    pub const fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Number of balloons steered by the program.
    #[must_use]
    pub const fn balloon_count(&self) -> usize {
        self.balloon_count
    }

    /// Change applied by `balloon` during `turn`.
    #[must_use]
    pub fn action(&self, turn: usize, balloon: usize) -> Option<AltitudeChange> {
        if turn >= self.turn_count || balloon >= self.balloon_count {
            return None;
        }
        self.actions.get(turn * self.balloon_count + balloon).copied()
    }

    /// Changes applied by every balloon during `turn`.
    #[must_use]
    pub fn turn(&self, turn: usize) -> Option<&[AltitudeChange]> {
        if turn >= self.turn_count {
            return None;
        }
        let start = turn * self.balloon_count;
        self.actions.get(start..start + self.balloon_count)
    }

    /// Iterator over the program one turn at a time.
    pub fn turns(&self) -> impl Iterator<Item = &[AltitudeChange]> {
        (0..self.turn_count).filter_map(move |turn| self.turn(turn))
    }
}
