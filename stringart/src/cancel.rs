use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag used to stop a running generation between iterations.
///
/// Clones observe the same flag. Cancelling is sticky: once set it stays set.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
