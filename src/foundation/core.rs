use crate::foundation::error::{PathflowError, PathflowResult};
use crate::foundation::math::mul_div255_u8;
use std::fmt;
use std::time::Duration;

pub use kurbo::{BezPath, Point};

/// Position of a frame on the animation timeline, starting at 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Range from `start` up to (not including) `end`; fails when `end` comes first.
    pub fn new(start: FrameIndex, end: FrameIndex) -> PathflowResult<Self> {
        if end < start {
            return Err(PathflowError::validation(format!(
                "frame range ends before it starts ({} > {})",
                start.0, end.0
            )));
        }
        Ok(Self { start, end })
    }

    /// Frame count.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` for a range without frames.
    pub fn is_empty(self) -> bool {
        self.len_frames() == 0
    }
}

/// Frame rate `num / den` frames per second.
///
/// Kept rational so NTSC-style rates like 30000/1001 map to exact frame times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames.
    pub num: u32,
    /// Seconds.
    pub den: u32,
}

impl Fps {
    /// Rate with both parts non-zero.
    pub fn new(num: u32, den: u32) -> PathflowResult<Self> {
        if num == 0 || den == 0 {
            return Err(PathflowError::validation(format!(
                "fps must have a non-zero numerator and denominator (got {num}/{den})"
            )));
        }
        Ok(Self { num, den })
    }

    /// Timeline time at which frame number `frames` starts, rounded down to the nanosecond.
    pub fn frames_to_duration(self, frames: u64) -> Duration {
        let nanos = u128::from(frames) * u128::from(self.den) * 1_000_000_000
            / u128::from(self.num.max(1));
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Time between consecutive frames.
    pub fn interval(self) -> Duration {
        self.frames_to_duration(1)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Pixel size of the output surface. The outline and marker layers always share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Pixels per row.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Canvas {
    /// Largest side the rasterizers accept.
    pub const MAX_SIDE: u32 = u16::MAX as u32;

    /// Side lengths as the `u16` pair the raster backend takes.
    pub fn to_u16(self) -> PathflowResult<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return Err(PathflowError::validation(format!(
                "canvas {}x{} has an empty side",
                self.width, self.height
            )));
        }
        match (u16::try_from(self.width), u16::try_from(self.height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(PathflowError::validation(format!(
                "canvas {}x{} exceeds {} px per side",
                self.width,
                self.height,
                Self::MAX_SIDE
            ))),
        }
    }

    /// Byte length of one RGBA8 surface of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// `true` when both sides are even, as 4:2:0 chroma subsampling needs.
    pub fn is_even(self) -> bool {
        self.width.is_multiple_of(2) && self.height.is_multiple_of(2)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// RGBA8 color with r, g and b already scaled by alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red times alpha.
    pub r: u8,
    /// Green times alpha.
    pub g: u8,
    /// Blue times alpha.
    pub b: u8,
    /// Coverage.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Premultiply a straight-alpha `[r, g, b, a]`.
    pub fn from_straight(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// `[r, g, b, a]` as stored.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
