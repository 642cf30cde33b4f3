//! Rasterisation, scoring and application of pin-to-pin threads.

use crate::{
    config::ScoreMode,
    darkness::Darkness,
    field::DarknessField,
    geometry::{Point, Segment},
    Float, Grid,
};

/// Maps every pin to its grid cell once, then walks threads between them.
///
/// A thread is always walked from the lower to the higher pin index, so both
/// directions cover exactly the same cells in the same order. Scores are then
/// bit-for-bit identical whichever end the thread is scored from.
#[derive(Clone, Debug)]
pub struct LineSampler {
    cells: Vec<Point<isize>>,
    grid: Grid,
    mode: ScoreMode,
}

impl LineSampler {
    pub fn new<S: Float>(pins: &[Point<S>], grid: Grid, mode: ScoreMode) -> Self {
        Self {
            // Non finite pins fall back to the origin cell.
            cells: pins
                .iter()
                .map(|&pin| grid.cell_of(pin).unwrap_or_default())
                .collect(),
            grid,
            mode,
        }
    }

    pub fn pin_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell-space segment between two pins, oriented from the lower index.
    pub fn segment(&self, a: usize, b: usize) -> Option<Segment<isize>> {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Some(Segment::new(*self.cells.get(low)?, *self.cells.get(high)?))
    }

    /// Grid cells covered by the thread between pins `a` and `b`.
    pub fn cells(&self, a: usize, b: usize) -> impl Iterator<Item = Point<usize>> + '_ {
        self.segment(a, b)
            .into_iter()
            .flat_map(move |segment| self.grid.get_pixel_coords_in_segment(segment))
            .filter(move |point| self.grid.index_of(*point).is_some())
    }

    fn indexes(&self, a: usize, b: usize) -> impl Iterator<Item = usize> + '_ {
        self.segment(a, b)
            .into_iter()
            .flat_map(move |segment| self.grid.get_pixel_indexes_in_segment(segment))
    }

    /// How much remaining ink demand the thread between `a` and `b` would
    /// relieve. Threads covering no cell score `-∞` in average mode.
    pub fn score<S: Float>(&self, field: &DarknessField<S>, a: usize, b: usize) -> S {
        let pixels = field.pixels();
        let mut weight = S::ZERO;
        let mut count = S::ZERO;
        for idx in self.indexes(a, b) {
            if let Some(&value) = pixels.get(idx) {
                weight += value;
                count += S::ONE;
            }
        }
        match self.mode {
            ScoreMode::Total => weight,
            ScoreMode::Average if count > S::ZERO => weight / count,
            ScoreMode::Average => -S::INFINITY,
        }
    }

    /// Lays the thread between `a` and `b` down on `field`.
    pub fn apply<S: Float>(
        &self,
        field: &mut DarknessField<S>,
        a: usize,
        b: usize,
        darkness: &impl Darkness<S>,
    ) {
        let pixels = field.pixels_mut();
        for idx in self.indexes(a, b) {
            if let Some(value) = pixels.get_mut(idx) {
                *value = darkness.compute(*value);
            }
        }
    }
}
