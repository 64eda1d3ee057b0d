use crate::animation::scheduler::{FrameScheduler, FrameTick};
use crate::animation::state::AnimationState;
use crate::foundation::error::PathflowResult;
use crate::geometry::path::PathGeometry;
use crate::sample::sampler::{SampleSet, sample, step_length};
use std::time::Duration;

/// Lifecycle of an [`AnimationLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    /// No frame produced yet.
    Idle,
    /// At least one frame produced; runs until the host stops scheduling frames.
    Running {
        /// Frames produced so far.
        frames: u64,
    },
}

/// Samples for the frame at clock reading `now`.
///
/// This is the whole per-frame update: elapsed time times speed, wrapped into one sample step,
/// then sampled along the path. Zero-length geometry produces an empty (no-op) frame.
pub fn frame_samples(
    geometry: &PathGeometry,
    state: &AnimationState,
    count: usize,
    now: Duration,
) -> SampleSet {
    let Some(offset) = step_length(geometry, count).and_then(|step| state.offset(now, step))
    else {
        tracing::debug!(
            elapsed_ms = state.elapsed(now).as_millis() as u64,
            "degenerate path, skipping frame"
        );
        return SampleSet::empty(0.0);
    };

    let samples = sample(geometry, count, offset);
    tracing::debug!(
        elapsed_ms = state.elapsed(now).as_millis() as u64,
        offset,
        samples = samples.len(),
        "frame sampled"
    );
    samples
}

/// Drives sampling once per scheduled frame.
///
/// The loop holds no stop condition of its own: it keeps requesting frames from its
/// [`FrameScheduler`] and ends when the scheduler stops producing them.
#[derive(Debug)]
pub struct AnimationLoop<'g> {
    geometry: &'g PathGeometry,
    state: AnimationState,
    count: usize,
    phase: LoopPhase,
}

impl<'g> AnimationLoop<'g> {
    /// Create an idle loop sampling `count` points per frame.
    pub fn new(geometry: &'g PathGeometry, state: AnimationState, count: usize) -> Self {
        Self {
            geometry,
            state,
            count,
            phase: LoopPhase::Idle,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Animation timing this loop reads from.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Produce the samples for one frame and advance the phase.
    pub fn tick(&mut self, now: Duration) -> SampleSet {
        let samples = frame_samples(self.geometry, &self.state, self.count, now);
        self.phase = match self.phase {
            LoopPhase::Idle => LoopPhase::Running { frames: 1 },
            LoopPhase::Running { frames } => LoopPhase::Running { frames: frames + 1 },
        };
        samples
    }

    /// Run frames until the scheduler stops, handing each frame's samples to `on_frame`.
    ///
    /// Returns the number of frames produced by this call. An error from `on_frame` stops the
    /// loop and is returned.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut on_frame: F) -> PathflowResult<u64>
    where
        S: FrameScheduler + ?Sized,
        F: FnMut(FrameTick, &SampleSet) -> PathflowResult<()>,
    {
        let mut produced = 0u64;
        while let Some(tick) = scheduler.next_frame() {
            let samples = self.tick(tick.time);
            on_frame(tick, &samples)?;
            produced += 1;
        }
        Ok(produced)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/runner.rs"]
mod tests;
