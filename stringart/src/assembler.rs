//! Maps the scheduler's pin-space steps into caller coordinates.

use num_traits::AsPrimitive;

use crate::{
    generation::Line,
    geometry::{Point, Segment},
    scheduler::Step,
    Float, Grid,
};

/// Rescales working-grid coordinates into the target space, independently on
/// each axis.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler<S> {
    working: Point<S>,
    target: Point<S>,
}

impl<S: Float> ResultAssembler<S>
where
    usize: AsPrimitive<S>,
{
    pub fn new(working: Grid, target: Grid) -> Self {
        Self {
            working: working.as_::<S>().into(),
            target: target.as_::<S>().into(),
        }
    }

    /// `x · W / w`, `y · H / h`. Multiplying first keeps points lying on the
    /// working border exactly on the target border.
    pub fn scale(&self, point: Point<S>) -> Point<S> {
        point * self.target / self.working
    }

    /// Lines for `steps`, in the same order.
    pub fn assemble(&self, steps: &[Step<S>], pins: &[Point<S>]) -> Vec<Line<S>> {
        steps
            .iter()
            .filter_map(|step| {
                let start = *pins.get(step.from)?;
                let end = *pins.get(step.to)?;
                Some(Line {
                    from: step.from,
                    to: step.to,
                    segment: Segment::new(self.scale(start), self.scale(end)),
                })
            })
            .collect()
    }

    pub fn scale_all(&self, pins: &[Point<S>]) -> Vec<Point<S>> {
        pins.iter().map(|&pin| self.scale(pin)).collect()
    }
}
