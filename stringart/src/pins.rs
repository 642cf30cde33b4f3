use std::ops::Deref;

use num_traits::AsPrimitive;

use crate::{
    error::ParameterError,
    geometry::{Circle, Point},
    verboser::{self, Message},
    Float, Grid,
};

/// Pins evenly spread over a circle, pin `i` sitting at angle `2π·i/count`.
#[derive(Clone, Debug, PartialEq)]
pub struct PinLayout<S> {
    pins: Vec<Point<S>>,
    circle: Circle<S>,
}

impl<S: Float> PinLayout<S>
where
    usize: AsPrimitive<S>,
{
    pub fn layout(
        count: usize,
        center: Point<S>,
        radius: S,
        verboser: &mut impl verboser::Verboser,
    ) -> Result<Self, ParameterError> {
        if count < 3 {
            return Err(ParameterError::TooFewPoints(
                i32::try_from(count).unwrap_or(i32::MAX),
            ));
        }
        let circle = Circle::new(center, radius);
        let pins = (0..count)
            .map(|i| {
                verboser.verbose(Message::CreatingPin(i));
                let theta: S = S::TWO * S::PI * i.as_() / count.as_();
                circle.point_at(theta)
            })
            .collect();
        verboser.verbose(Message::CreatingPin(count));
        Ok(Self { pins, circle })
    }

    /// Layout on the largest circle centered in `grid`.
    pub fn inscribed(
        count: usize,
        grid: Grid,
        verboser: &mut impl verboser::Verboser,
    ) -> Result<Self, ParameterError> {
        let circle = Circle::inscribed(grid);
        Self::layout(count, circle.center, circle.radius, verboser)
    }
}

impl<S> PinLayout<S> {
    pub fn pins(&self) -> &[Point<S>] {
        &self.pins
    }

    pub fn circle(&self) -> &Circle<S> {
        &self.circle
    }
}

impl<S> Deref for PinLayout<S> {
    type Target = [Point<S>];

    fn deref(&self) -> &Self::Target {
        &self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verboser::Silent;

    #[test]
    fn rejects_fewer_than_three_pins() {
        let err = PinLayout::<f32>::layout(2, Point::new(0.0, 0.0), 1.0, &mut Silent).unwrap_err();
        assert_eq!(err, ParameterError::TooFewPoints(2));
    }

    #[test]
    fn pins_start_at_angle_zero_and_turn_clockwise_on_screen() {
        let layout = PinLayout::<f64>::inscribed(4, Grid::new(8, 8), &mut Silent).unwrap();
        let expected = [(8.0, 4.0), (4.0, 8.0), (0.0, 4.0), (4.0, 0.0)];
        assert_eq!(layout.len(), 4);
        for (pin, (x, y)) in layout.iter().zip(expected) {
            assert!((pin.x - x).abs() < 1e-9 && (pin.y - y).abs() < 1e-9, "{pin}");
        }
    }

    #[test]
    fn all_pins_lie_on_the_circle() {
        let layout = PinLayout::<f32>::inscribed(37, Grid::new(90, 120), &mut Silent).unwrap();
        assert_eq!(layout.circle().radius, 45.0);
        for pin in layout.iter() {
            assert!((pin.distance(&layout.circle().center) - 45.0).abs() < 1e-3);
            assert!(pin.x >= 0.0 && pin.x <= 120.0 && pin.y >= 0.0 && pin.y <= 90.0);
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let a = PinLayout::<f32>::layout(250, Point::new(3.5, 9.25), 12.0, &mut Silent).unwrap();
        let b = PinLayout::<f32>::layout(250, Point::new(3.5, 9.25), 12.0, &mut Silent).unwrap();
        assert_eq!(a, b);
    }
}
