//! Target density, coverage mask and the derived score map.

use loon_core::{GridCell, GridDimensions};

/// Relative offset from a balloon's cell to a cell it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaskOffset {
    /// Signed row displacement.
    pub row_delta: i32,
    /// Signed column displacement.
    pub column_delta: i32,
}

impl MaskOffset {
    /// Offset of the balloon's own cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new offset.
    #[must_use]
    pub const fn new(row_delta: i32, column_delta: i32) -> Self {
        Self {
            row_delta,
            column_delta,
        }
    }
}

/// Set of offsets forming the circular window a balloon covers.
///
/// The mask holds every integer lattice point strictly inside the circle of
/// the configured radius, plus the origin, each exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    radius: u32,
    offsets: Vec<MaskOffset>,
}

impl CoverageMask {
    /// Enumerates the lattice disc of the provided radius.
    #[must_use]
    pub fn with_radius(radius: u32) -> Self {
        let reach = i64::from(radius);
        let limit = reach * reach;
        let mut offsets = vec![MaskOffset::ORIGIN];

        for x in 0..=reach {
            for y in 0..=reach {
                if (x == 0 && y == 0) || x * x + y * y >= limit {
                    continue;
                }
                let (row, column) = (x as i32, y as i32);
                offsets.push(MaskOffset::new(row, column));
                if row > 0 {
                    offsets.push(MaskOffset::new(-row, column));
                }
                if column > 0 {
                    offsets.push(MaskOffset::new(row, -column));
                }
                if row > 0 && column > 0 {
                    offsets.push(MaskOffset::new(-row, -column));
                }
            }
        }

        Self { radius, offsets }
    }

    /// Radius the mask was built for.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Offsets contained in the mask, origin first.
    #[must_use]
    pub fn offsets(&self) -> &[MaskOffset] {
        &self.offsets
    }

    /// Number of offsets in the mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Reports whether the mask is empty. Masks always contain the origin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Static target density together with the score map derived from it.
#[derive(Clone, Debug)]
pub struct AreaModel {
    dimensions: GridDimensions,
    density: Vec<u32>,
    mask: CoverageMask,
    scores: Vec<u64>,
    mean_score: f64,
}

impl AreaModel {
    /// Accumulates target density and derives the score map in a single pass.
    ///
    /// Targets outside the grid are ignored.
    #[must_use]
    pub fn new(dimensions: GridDimensions, coverage_radius: u32, targets: &[GridCell]) -> Self {
        let mut density = vec![0_u32; dimensions.cell_count()];
        for target in targets {
            if let Some(index) = dimensions.cell_index(*target) {
                density[index] = density[index].saturating_add(1);
            }
        }

        let mut model = Self {
            dimensions,
            density,
            mask: CoverageMask::with_radius(coverage_radius),
            scores: Vec::new(),
            mean_score: 0.0,
        };
        model.scores = model.build_score_map();
        model.mean_score = model.average_row_maximum();
        model
    }

    fn build_score_map(&self) -> Vec<u64> {
        let mut scores = Vec::with_capacity(self.dimensions.cell_count());
        for row in 0..self.dimensions.rows() {
            for column in 0..self.dimensions.columns() {
                let center = GridCell::new(row, column);
                let score = self
                    .coverage_window(center)
                    .map(|cell| u64::from(self.density_at(cell)))
                    .sum();
                scores.push(score);
            }
        }
        scores
    }

    fn average_row_maximum(&self) -> f64 {
        let columns = self.dimensions.columns() as usize;
        if self.scores.is_empty() || columns == 0 {
            return 0.0;
        }
        let total: u64 = self
            .scores
            .chunks(columns)
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .sum();
        total as f64 / f64::from(self.dimensions.rows())
    }

    /// Cells covered by a balloon centred on `center`.
    ///
    /// Rows falling outside the grid are clipped; columns wrap.
    pub fn coverage_window(&self, center: GridCell) -> impl Iterator<Item = GridCell> + '_ {
        let dimensions = self.dimensions;
        self.mask.offsets().iter().filter_map(move |offset| {
            let row = i64::from(center.row()) + i64::from(offset.row_delta);
            if !dimensions.contains_row(row) {
                return None;
            }
            let column = dimensions
                .wrap_column(i64::from(center.column()) + i64::from(offset.column_delta));
            Some(GridCell::new(row as u32, column))
        })
    }

    /// Grid dimensions the model was built for.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Coverage mask shared by every balloon.
    #[must_use]
    pub fn mask(&self) -> &CoverageMask {
        &self.mask
    }

    /// Number of targets located on `cell`.
    #[must_use]
    pub fn density_at(&self, cell: GridCell) -> u32 {
        self.dimensions
            .cell_index(cell)
            .and_then(|index| self.density.get(index).copied())
            .unwrap_or(0)
    }

    /// Target density reachable from `cell`, or zero outside the grid.
    #[must_use]
    pub fn score_at(&self, cell: GridCell) -> u64 {
        self.dimensions
            .cell_index(cell)
            .and_then(|index| self.scores.get(index).copied())
            .unwrap_or(0)
    }

    /// Average over all rows of each row's best score.
    #[must_use]
    pub const fn mean_score(&self) -> f64 {
        self.mean_score
    }
}
