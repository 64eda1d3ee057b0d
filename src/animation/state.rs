use crate::foundation::error::{PathflowError, PathflowResult};
use std::time::Duration;

/// Start time and travel speed of an animation.
///
/// Created once and never mutated; it is only read to turn a clock reading into a distance
/// travelled along the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    start_time: Duration,
    speed: f64,
}

impl AnimationState {
    /// Default travel speed in pixels per second.
    pub const DEFAULT_SPEED: f64 = 500.0;

    /// Create a state from a clock reading and a speed in distance units per second.
    pub fn new(start_time: Duration, speed: f64) -> PathflowResult<Self> {
        if !speed.is_finite() {
            return Err(PathflowError::validation("animation speed must be finite"));
        }
        Ok(Self { start_time, speed })
    }

    /// Clock reading the animation started at.
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Distance units per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time since start; readings before the start count as zero.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start_time)
    }

    /// Raw distance travelled at `now`.
    pub fn distance(&self, now: Duration) -> f64 {
        self.elapsed(now).as_secs_f64() * self.speed
    }

    /// Distance travelled at `now`, wrapped into `[0, step)`.
    ///
    /// Returns `None` when `step` is not a positive finite length.
    pub fn offset(&self, now: Duration, step: f64) -> Option<f64> {
        if !(step.is_finite() && step > 0.0) {
            return None;
        }
        let r = self.distance(now).rem_euclid(step);
        // rem_euclid can round up to `step` for tiny negative distances.
        Some(if r >= step { 0.0 } else { r })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
