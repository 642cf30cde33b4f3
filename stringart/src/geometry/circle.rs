use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use super::Point;
use crate::{Float, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle<T> {
    pub center: Point<T>,
    pub radius: T,
}

impl<T: Float> Circle<T> {
    pub fn new(center: Point<T>, radius: T) -> Self {
        Self { center, radius }
    }

    /// Largest circle centered in `grid`, touching its shorter sides.
    pub fn inscribed(grid: Grid) -> Self
    where
        usize: AsPrimitive<T>,
    {
        let size = Point::<T>::from(grid.as_::<T>());
        Self {
            center: size * T::HALF,
            radius: grid.width.min(grid.height).as_() * T::HALF,
        }
    }

    /// Point at `theta` radians, measured from the positive x axis towards
    /// the positive y axis (clockwise on screen, where y grows downward).
    pub fn point_at(&self, theta: T) -> Point<T> {
        Point {
            x: self.center.x + self.radius * theta.cos(),
            y: self.center.y + self.radius * theta.sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inscribed_circle_uses_shorter_side() {
        let circle = Circle::<f64>::inscribed(Grid::new(40, 100));
        assert_eq!(circle.center, Point::new(50.0, 20.0));
        assert_eq!(circle.radius, 20.0);
    }

    #[test]
    fn point_at_quarter_turns() {
        let circle = Circle::new(Point::new(10.0f64, 10.0), 5.0);
        assert!(circle.point_at(0.0).aprox_eq(&Point::new(15.0, 10.0)));
        let bottom = circle.point_at(core::f64::consts::FRAC_PI_2);
        assert!((bottom.x - 10.0).abs() < 1e-12 && (bottom.y - 15.0).abs() < 1e-12);
    }
}
