use std::fmt;

use bresenham::Bresenham;
use serde::{Deserialize, Serialize};

use super::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T: fmt::Display> fmt::Display for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:2}, {:2}]", self.start, self.end)
    }
}

impl<T> Segment<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Self { start, end }
    }
}

impl Segment<isize> {
    /// Bresenham walk from `start` to `end`, both included.
    ///
    /// Yields `max(|dx|, |dy|) + 1` points.
    pub fn points_between(&self) -> impl Iterator<Item = Point<isize>> {
        let end = self.end;
        Bresenham::new((self.start.x, self.start.y), (end.x, end.y))
            .map(|(x, y)| Point { x, y })
            .chain(core::iter::once(end))
    }
}
