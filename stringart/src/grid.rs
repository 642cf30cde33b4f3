use num_traits::{AsPrimitive, NumCast, Unsigned};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Segment},
    Float,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T = usize> {
    pub height: T,
    pub width: T,
}

impl<T> Grid<T> {
    pub fn new(height: T, width: T) -> Self {
        Self { height, width }
    }

    pub fn as_<S: Copy + 'static>(self) -> Grid<S>
    where
        T: AsPrimitive<S>,
    {
        Grid {
            height: self.height.as_(),
            width: self.width.as_(),
        }
    }
}

impl<T: NumCast + Unsigned + PartialOrd + Copy> Grid<T> {
    pub fn is_empty(&self) -> bool {
        self.height.is_zero() || self.width.is_zero()
    }

    pub fn get_pixel_indexes_in_segment(
        &self,
        seg: Segment<isize>,
    ) -> impl Iterator<Item = T> + '_ {
        self.get_pixel_coords_in_segment(seg)
            .filter_map(|point| self.index_of(point))
    }

    pub fn get_pixel_coords_in_segment(
        &self,
        seg: Segment<isize>,
    ) -> impl Iterator<Item = Point<T>> + '_ {
        seg.points_between().filter_map(|point| point.cast::<T>())
    }

    pub fn index_of(&self, point: Point<T>) -> Option<T> {
        if point.x < self.width && point.y < self.height {
            Some(point.y * self.width + point.x)
        } else {
            None
        }
    }

    /// Cell nearest to `point`, clamped into the grid.
    ///
    /// Returns `None` only for an empty grid or a non finite point.
    pub fn cell_of<F: Float>(&self, point: Point<F>) -> Option<Point<isize>> {
        if self.is_empty() {
            return None;
        }
        let max_x = num_traits::cast::<T, isize>(self.width)? - 1;
        let max_y = num_traits::cast::<T, isize>(self.height)? - 1;
        let cell = point.round().cast::<isize>()?;
        Some(Point {
            x: cell.x.clamp(0, max_x),
            y: cell.y.clamp(0, max_y),
        })
    }
}
