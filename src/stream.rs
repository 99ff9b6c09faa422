// SPDX-License-Identifier: MPL-2.0
//! Stream geometry and timestamp units.
//!
//! A decoded stream is described once at open time: pixel dimensions and the
//! rational time-base that converts presentation-timestamp ticks to seconds.
//! Geometry is immutable for the lifetime of playback; window resizes never
//! change it.

use crate::error::{Error, Result};

/// Presentation timestamp in stream ticks.
pub type Pts = i64;

/// Bytes per pixel of the decoded RGBA frames.
pub const BYTES_PER_PIXEL: usize = 4;

/// Rational duration of one pts tick, in seconds (`num / den`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    pub num: i32,
    pub den: i32,
}

impl TimeBase {
    /// Builds a time-base, rejecting a zero denominator.
    ///
    /// A zero denominator would make every pacing target NaN or infinite, so
    /// a stream advertising one fails at open time instead of misbehaving
    /// mid-playback.
    pub fn new(num: i32, den: i32) -> Result<Self> {
        if den == 0 {
            return Err(Error::SourceOpen(format!(
                "invalid stream time base {num}/{den}"
            )));
        }
        Ok(Self { num, den })
    }

    /// Duration of one tick in seconds.
    #[must_use]
    pub fn tick_secs(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Immutable description of the video stream being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGeometry {
    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Tick duration for this stream's timestamps.
    pub time_base: TimeBase,
}

impl StreamGeometry {
    /// Builds a geometry, rejecting zero dimensions.
    pub fn new(width: u32, height: u32, time_base: TimeBase) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::SourceOpen(format!(
                "invalid video dimensions: {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            time_base,
        })
    }

    /// Size in bytes of one tightly packed RGBA frame.
    #[must_use]
    pub fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_base_rejects_zero_denominator() {
        assert!(TimeBase::new(1, 0).is_err());
    }

    #[test]
    fn time_base_tick_secs() {
        let tb = TimeBase::new(1, 30).unwrap();
        assert!((tb.tick_secs() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn geometry_rejects_zero_dimensions() {
        let tb = TimeBase::new(1, 30).unwrap();
        assert!(StreamGeometry::new(0, 720, tb).is_err());
        assert!(StreamGeometry::new(1280, 0, tb).is_err());
    }

    #[test]
    fn frame_bytes_is_width_height_rgba() {
        let tb = TimeBase::new(1, 30).unwrap();
        let geometry = StreamGeometry::new(1280, 720, tb).unwrap();
        assert_eq!(geometry.frame_bytes(), 1280 * 720 * 4);
    }

    #[test]
    fn negative_numerator_is_allowed() {
        // Odd, but not a division hazard; pacing simply never waits.
        let tb = TimeBase::new(-1, 30).unwrap();
        assert!(tb.tick_secs() < 0.0);
    }
}
