use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, DivAssign, MulAssign, SubAssign},
};

use num_traits::{ConstOne, ConstZero};

/// Scalar used for coordinates and darkness values.
///
/// Implemented for `f32` and `f64`. Single precision is enough for most
/// images; double precision is available for very large working grids where
/// accumulated scores lose resolution.
pub trait Float:
    'static
    + Debug
    + Display
    + Sync
    + Send
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + num_traits::Float
    + num_traits::NumCast
    + ConstZero
    + ConstOne
    + serde::Serialize
{
    const HALF: Self;
    const TWO: Self;
    const PI: Self;
    const INFINITY: Self;
    const EPSILON: Self;
    /// Darkness of a pure black pixel.
    const TWO_FIVE_FIVE: Self;
}

impl Float for f32 {
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    const PI: Self = core::f32::consts::PI;
    const INFINITY: Self = f32::INFINITY;
    const EPSILON: Self = f32::EPSILON;
    const TWO_FIVE_FIVE: Self = 255.0;
}

impl Float for f64 {
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    const PI: Self = core::f64::consts::PI;
    const INFINITY: Self = f64::INFINITY;
    const EPSILON: Self = f64::EPSILON;
    const TWO_FIVE_FIVE: Self = 255.0;
}
