//! Static per-altitude wind lookup.

use loon_core::{GridCell, GridDimensions, WindVector};

/// Wind vectors for every altitude, row and column of the world.
#[derive(Clone, Debug)]
pub struct WindField {
    dimensions: GridDimensions,
    vectors: Vec<WindVector>,
}

impl WindField {
    /// Wraps altitude-major wind vectors.
    ///
    /// The parser is responsible for supplying one vector per altitude and cell.
    #[must_use]
    pub fn new(dimensions: GridDimensions, vectors: Vec<WindVector>) -> Self {
        debug_assert_eq!(
            vectors.len(),
            dimensions.cell_count() * dimensions.altitudes() as usize,
            "wind field does not match the declared dimensions"
        );
        Self {
            dimensions,
            vectors,
        }
    }

    /// Wind blowing at `altitude` over `cell`, if both are in range.
    #[must_use]
    pub fn wind_at(&self, altitude: u32, cell: GridCell) -> Option<WindVector> {
        if altitude >= self.dimensions.altitudes() {
            return None;
        }
        let layer = altitude as usize * self.dimensions.cell_count();
        let index = self.dimensions.cell_index(cell)?;
        self.vectors.get(layer + index).copied()
    }
}
