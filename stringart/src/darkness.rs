use crate::Float;

/// Decay rule applied to every cell a chosen thread covers.
///
/// Implementors must never return a value greater than the input nor lower
/// than zero, otherwise the remaining ink demand stops being monotonic.
pub trait Darkness<S>: Send + Sync {
    fn compute(&self, weight: S) -> S;
}

/// Removes a fixed amount of darkness, saturating at zero.
#[derive(Clone, Copy, Debug)]
pub struct FlatDarkness<S>(pub S);

impl<S: Float> Darkness<S> for FlatDarkness<S> {
    fn compute(&self, weight: S) -> S {
        (weight - self.0).max(S::ZERO)
    }
}
