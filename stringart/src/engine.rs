//! Long lived generation engine.
//!
//! An [`Engine`] owns the worker pool every run scores its candidates on. It
//! is created once, initialized explicitly, then shared by reference between
//! requests. Background runs are handed out as [`Task`]s that deliver their
//! result through a channel and can be cancelled at any time.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use num_traits::AsPrimitive;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    cancel::CancelToken, config::Config, error::Error, generation::Generation, verboser, Float,
};

pub struct Engine {
    threads: usize,
    pool: Option<ThreadPool>,
}

impl Engine {
    /// Engine running on `threads` workers, or one per logical CPU when
    /// `threads` is 0. Nothing is allocated until [`Self::initialize`].
    pub fn new(threads: usize) -> Self {
        Self {
            threads: if threads == 0 { num_cpus::get() } else { threads },
            pool: None,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn initialize(&mut self) -> Result<(), Error> {
        if self.pool.is_none() {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .thread_name(|idx| format!("stringart-{idx}"))
                .build()?;
            tracing::info!(threads = self.threads, "engine initialized");
            self.pool = Some(pool);
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.pool.is_some()
    }

    fn pool(&self) -> Result<&ThreadPool, Error> {
        self.pool.as_ref().ok_or(Error::NotInitialized)
    }

    /// Runs a generation on the engine's workers, blocking until it is done.
    pub fn generate<S: Float>(&self, image: &[u8], config: &Config) -> Result<Generation<S>, Error>
    where
        usize: AsPrimitive<S>,
        u8: AsPrimitive<S>,
    {
        let pool = self.pool()?;
        pool.install(|| {
            crate::generate(image, config, &mut verboser::Tracing, &CancelToken::new())
        })
    }

    /// Starts a generation in the background.
    ///
    /// Parameters are checked before anything is queued, so a bad `config` is
    /// reported here rather than through the task.
    pub fn spawn<S: Float>(&self, image: Vec<u8>, config: Config) -> Result<Task<S>, Error>
    where
        usize: AsPrimitive<S>,
        u8: AsPrimitive<S>,
    {
        let pool = self.pool()?;
        config.validate()?;
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let cancel = CancelToken::new();
        let token = cancel.clone();
        pool.spawn(move || {
            let result = crate::generate(&image, &config, &mut verboser::Tracing, &token);
            if sender.send(result).is_err() {
                tracing::debug!("task dropped before its result was delivered");
            }
        });
        Ok(Task { receiver, cancel })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Handle on a background generation.
///
/// Dropping the handle cancels the run.
pub struct Task<S> {
    receiver: Receiver<Result<Generation<S>, Error>>,
    cancel: CancelToken,
}

impl<S> Task<S> {
    /// Asks the run to stop after its current iteration. The lines laid so
    /// far are still delivered, marked as cancelled.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn wait(self) -> Result<Generation<S>, Error> {
        self.receiver.recv().map_err(|_| Error::Disconnected)?
    }

    /// `None` if the run is still going after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<Generation<S>, Error>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(Error::Disconnected)),
        }
    }

    pub fn try_wait(&self) -> Option<Result<Generation<S>, Error>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::Disconnected)),
        }
    }
}

impl<S> Drop for Task<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use image::GrayImage;

    use super::*;
    use crate::{error::ParameterError, generation::Completion};

    fn png(size: u32) -> Vec<u8> {
        let image = GrayImage::from_fn(size, size, |x, y| {
            image::Luma([((x * 7 + y * 3) % 256) as u8])
        });
        let mut buf = Vec::new();
        image::ImageEncoder::write_image(
            image::codecs::png::PngEncoder::new(&mut buf),
            image.as_raw(),
            size,
            size,
            image::ExtendedColorType::L8,
        )
        .unwrap();
        buf
    }

    fn ready(threads: usize) -> Engine {
        let mut engine = Engine::new(threads);
        engine.initialize().unwrap();
        engine
    }

    #[test]
    fn refuses_work_before_initialize() {
        let engine = Engine::new(2);
        assert!(!engine.is_ready());
        let result = engine.generate::<f32>(&png(16), &Config::new(8, 4, 10));
        assert!(matches!(result, Err(Error::NotInitialized)));
        assert!(matches!(
            engine.spawn::<f32>(png(16), Config::new(8, 4, 10)),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut engine = Engine::new(3);
        engine.initialize().unwrap();
        engine.initialize().unwrap();
        assert!(engine.is_ready());
        assert_eq!(engine.threads(), 3);
        assert!(Engine::default().threads() > 0);
    }

    #[test]
    fn spawn_validates_eagerly() {
        let engine = ready(2);
        assert!(matches!(
            engine.spawn::<f32>(png(16), Config::new(2, 4, 10)),
            Err(Error::InvalidParameter(ParameterError::TooFewPoints(2)))
        ));
    }

    #[test]
    fn spawned_task_matches_blocking_run() {
        let engine = ready(2);
        let config = Config::new(24, 40, 30);
        let blocking = engine.generate::<f32>(&png(48), &config).unwrap();
        let task = engine.spawn::<f32>(png(48), config).unwrap();
        let spawned = task.wait().unwrap();
        assert_eq!(blocking, spawned);
        assert!(spawned.len() <= 40);
    }

    #[test]
    fn results_do_not_depend_on_thread_count() {
        let config = Config::new(36, 80, 25);
        let single = ready(1).generate::<f64>(&png(64), &config).unwrap();
        let many = ready(4).generate::<f64>(&png(64), &config).unwrap();
        assert_eq!(single.pin_sequence(), many.pin_sequence());
        assert_eq!(single, many);
    }

    #[test]
    fn cancelled_task_still_delivers() {
        let engine = ready(1);
        let task = engine
            .spawn::<f32>(png(128), Config::new(200, 100_000, 1))
            .unwrap();
        task.cancel();
        let result = task.wait().unwrap();
        assert_eq!(result.completion(), Completion::Cancelled);
        assert!(result.len() < 100_000);
    }

    #[test]
    fn wait_timeout_eventually_returns() {
        let engine = ready(2);
        let task = engine.spawn::<f32>(png(24), Config::new(12, 10, 20)).unwrap();
        let mut result = None;
        while result.is_none() {
            result = task.wait_timeout(Duration::from_millis(50));
        }
        assert!(result.unwrap().is_ok());
        assert!(task.try_wait().map_or(true, |r| r.is_err()));
    }
}
