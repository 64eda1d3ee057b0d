use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Source of monotonic time readings.
pub trait Clock {
    /// Time since the clock's epoch.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// One frame request handed out by a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    /// Frame index in timeline order.
    pub index: FrameIndex,
    /// Clock reading for the frame.
    pub time: Duration,
}

/// Host-side "run on next frame" primitive.
///
/// The animation loop asks for the next frame after finishing each one. The host decides when
/// that frame happens and whether it happens at all; returning `None` ends the loop.
pub trait FrameScheduler {
    /// Wait until the next frame is due and return it, or `None` once the host has stopped.
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Offline scheduler: frames of a fixed range at an exact rate, without sleeping.
#[derive(Clone, Copy, Debug)]
pub struct FixedRateScheduler {
    fps: Fps,
    next: u64,
    end: u64,
}

impl FixedRateScheduler {
    /// Schedule every frame of `range`, timestamped from frame 0 at `fps`.
    pub fn new(fps: Fps, range: FrameRange) -> Self {
        Self {
            fps,
            next: range.start.0,
            end: range.end.0,
        }
    }

    /// Frames not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.next >= self.end {
            return None;
        }
        let index = FrameIndex(self.next);
        self.next += 1;
        Some(FrameTick {
            index,
            time: self.fps.frames_to_duration(index.0),
        })
    }
}

/// Shared flag a host raises to stop a realtime loop.
#[derive(Clone, Debug, Default)]
pub struct HaltHandle(Arc<AtomicBool>);

impl HaltHandle {
    /// Create a handle in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop before its next frame.
    pub fn halt(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Return `true` once [`HaltHandle::halt`] was called on any clone.
    pub fn is_halted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Wall-clock scheduler pacing frames at a target rate.
///
/// Runs until its [`HaltHandle`] is raised or the optional time limit passes. A frame that
/// runs late pushes the next deadline back instead of bursting to catch up.
#[derive(Debug)]
pub struct RealtimeScheduler {
    clock: MonotonicClock,
    interval: Duration,
    next_deadline: Duration,
    frames: u64,
    limit: Option<Duration>,
    halt: HaltHandle,
}

impl RealtimeScheduler {
    /// Pace frames at `fps`, starting now.
    pub fn new(fps: Fps) -> Self {
        Self {
            clock: MonotonicClock::new(),
            interval: fps.interval(),
            next_deadline: Duration::ZERO,
            frames: 0,
            limit: None,
            halt: HaltHandle::new(),
        }
    }

    /// Stop handing out frames once `limit` has passed on this scheduler's clock.
    pub fn with_limit(mut self, limit: Option<Duration>) -> Self {
        self.limit = limit;
        self
    }

    /// Handle the host can use to stop the loop from another thread.
    pub fn halt_handle(&self) -> HaltHandle {
        self.halt.clone()
    }

    /// The clock frame timestamps are read from.
    pub fn clock(&self) -> &MonotonicClock {
        &self.clock
    }

    fn expired(&self, now: Duration) -> bool {
        self.halt.is_halted() || self.limit.is_some_and(|limit| now >= limit)
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn next_frame(&mut self) -> Option<FrameTick> {
        let now = self.clock.now();
        if self.expired(now) {
            return None;
        }
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        }

        let time = self.clock.now();
        if self.expired(time) {
            return None;
        }
        self.next_deadline = time + self.interval;
        let index = FrameIndex(self.frames);
        self.frames += 1;
        Some(FrameTick { index, time })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
