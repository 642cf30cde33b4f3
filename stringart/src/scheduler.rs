use std::ops::Range;

use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    cancel::CancelToken,
    darkness::Darkness,
    distancer::PinDistancer,
    field::DarknessField,
    generation::Completion,
    sampler::LineSampler,
    verboser::{Message, Verboser},
    Float,
};

/// Where the thread currently hangs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunState {
    pub current: usize,
    pub previous: Option<usize>,
    pub emitted: usize,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            current: 0,
            previous: None,
            emitted: 0,
        }
    }
}

/// A thread chosen by the scheduler, in pin space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<S> {
    pub from: usize,
    pub to: usize,
    pub score: S,
}

/// Greedy selection loop.
///
/// Every iteration scores the threads leaving the current pin, lays down the
/// best one and moves to its far end. Candidates are split in one batch per
/// worker thread; each batch keeps its first best candidate and batches are
/// reduced in pin order, so the winner is always the lowest pin among the
/// best scores whatever the number of threads.
pub struct GreedyScheduler<'a, S, D> {
    sampler: &'a LineSampler,
    distancer: PinDistancer,
    darkness: D,
    state: RunState,
    buffers: Vec<BatchBuffer<S>>,
}

impl<'a, S: Float, D: Darkness<S>> GreedyScheduler<'a, S, D> {
    pub fn new(sampler: &'a LineSampler, distancer: PinDistancer, darkness: D) -> Self {
        Self {
            buffers: BatchBuffer::split(sampler.pin_count(), rayon::current_num_threads()),
            sampler,
            distancer,
            darkness,
            state: RunState::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs until `num_lines` threads are laid down, no thread relieves any
    /// darkness, or `cancel` fires. Cancellation is polled once per
    /// iteration.
    pub fn run(
        &mut self,
        field: &mut DarknessField<S>,
        num_lines: usize,
        verboser: &mut impl Verboser,
        cancel: &CancelToken,
    ) -> (Vec<Step<S>>, Completion) {
        let mut steps = Vec::new();
        let completion = loop {
            if self.state.emitted >= num_lines {
                break Completion::Finished;
            }
            if cancel.is_cancelled() {
                tracing::debug!(lines = self.state.emitted, "generation cancelled");
                break Completion::Cancelled;
            }
            verboser.verbose(Message::Computing(self.state.emitted));
            match self.step(field) {
                Some(step) => steps.push(step),
                None => {
                    tracing::debug!(
                        lines = self.state.emitted,
                        "no thread relieves any remaining darkness, stopping early"
                    );
                    break Completion::Exhausted;
                }
            }
        };
        (steps, completion)
    }

    /// Lays down the best thread leaving the current pin.
    ///
    /// Returns `None`, leaving `field` untouched, when no candidate has a
    /// strictly positive score.
    pub fn step(&mut self, field: &mut DarknessField<S>) -> Option<Step<S>> {
        let best = match self.best_candidate(field) {
            Some(best) if best.score > S::ZERO => best,
            _ => return None,
        };
        let from = self.state.current;
        self.sampler.apply(field, from, best.pin, &self.darkness);
        self.state = RunState {
            current: best.pin,
            previous: Some(from),
            emitted: self.state.emitted + 1,
        };
        Some(Step {
            from,
            to: best.pin,
            score: best.score,
        })
    }

    fn best_candidate(&mut self, field: &DarknessField<S>) -> Option<Candidate<S>> {
        let RunState {
            current, previous, ..
        } = self.state;
        let sampler = self.sampler;
        let distancer = self.distancer;

        self.buffers.par_iter_mut().for_each(|buffer| {
            buffer.result = None;
            for pin in buffer.range.clone() {
                if Some(pin) == previous || !distancer.is_valid(current, pin) {
                    continue;
                }
                let score = sampler.score(field, current, pin);
                if buffer.result.map_or(true, |best| score > best.score) {
                    buffer.result = Some(Candidate { pin, score });
                }
            }
        });

        let mut best: Option<Candidate<S>> = None;
        for candidate in self.buffers.iter().filter_map(|buffer| buffer.result) {
            if best.map_or(true, |best| candidate.score > best.score) {
                best = Some(candidate);
            }
        }
        best
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate<S> {
    pin: usize,
    score: S,
}

struct BatchBuffer<S> {
    range: Range<usize>,
    result: Option<Candidate<S>>,
}

impl<S> BatchBuffer<S> {
    fn split(count: usize, batches: usize) -> Vec<Self> {
        let chunk_size = count.div_ceil(batches.max(1)).max(1);
        (0..count)
            .step_by(chunk_size)
            .map(|start| BatchBuffer {
                range: start..count.min(start + chunk_size),
                result: None,
            })
            .collect()
    }
}
