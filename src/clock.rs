// SPDX-License-Identifier: MPL-2.0
//! Playback clock and pacing.
//!
//! Maps a frame's presentation timestamp into a wall-clock offset from the
//! playback origin and tells the driver how much longer to wait. The origin
//! is latched exactly once, on the first frame, so pts zero means "the
//! instant playback started".
//!
//! The clock never sleeps. The driver calls [`PlaybackClock::remaining`] in
//! a loop around its wait-with-timeout primitive, re-measuring `now` after
//! every wake: waits may return early when input events arrive, and
//! re-checking absorbs spurious wakeups and clock drift.

use crate::stream::{Pts, TimeBase};
use std::time::{Duration, Instant};

/// Converts pts ticks into wait decisions against a latched origin.
#[derive(Debug)]
pub struct PlaybackClock {
    time_base: TimeBase,
    origin: Option<Instant>,
}

impl PlaybackClock {
    /// Creates a clock for a stream's time-base.
    ///
    /// The time-base was validated at source open, so the tick duration here
    /// is always finite.
    #[must_use]
    pub fn new(time_base: TimeBase) -> Self {
        Self {
            time_base,
            origin: None,
        }
    }

    /// Wall-clock offset (seconds from the origin) at which `pts` is due.
    #[must_use]
    pub fn target_secs(&self, pts: Pts) -> f64 {
        pts as f64 * self.time_base.tick_secs()
    }

    /// Returns how much longer to wait before `pts` is due, or `None` when
    /// the frame should be presented immediately.
    ///
    /// The first call latches `now` as the playback origin. A frame whose
    /// target is already past (late decode, non-monotonic or negative pts)
    /// gets `None` straight away: frames are never delayed past their
    /// timestamp, and never dropped to catch up.
    pub fn remaining(&mut self, pts: Pts, now: Instant) -> Option<Duration> {
        let origin = *self.origin.get_or_insert(now);
        let target = self.target_secs(pts);
        let elapsed = now.duration_since(origin).as_secs_f64();
        if target > elapsed {
            Some(Duration::from_secs_f64(target - elapsed))
        } else {
            None
        }
    }

    /// The latched origin, if the first frame has been seen.
    #[must_use]
    pub fn origin(&self) -> Option<Instant> {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::TimeBase;

    fn clock(num: i32, den: i32) -> PlaybackClock {
        PlaybackClock::new(TimeBase::new(num, den).unwrap())
    }

    #[test]
    fn maps_pts_to_seconds() {
        let clock = clock(1, 30);
        let targets: Vec<f64> = [0, 30, 60].iter().map(|&p| clock.target_secs(p)).collect();
        assert!((targets[0] - 0.0).abs() < 1e-12);
        assert!((targets[1] - 1.0).abs() < 1e-12);
        assert!((targets[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn origin_latches_on_first_frame_only() {
        let mut clock = clock(1, 30);
        assert!(clock.origin().is_none());

        let start = Instant::now();
        clock.remaining(0, start);
        assert_eq!(clock.origin(), Some(start));

        // A later call must not re-zero the clock.
        clock.remaining(30, start + Duration::from_millis(500));
        assert_eq!(clock.origin(), Some(start));
    }

    #[test]
    fn first_frame_at_pts_zero_is_due_immediately() {
        let mut clock = clock(1, 30);
        assert_eq!(clock.remaining(0, Instant::now()), None);
    }

    #[test]
    fn never_returns_due_before_target() {
        let mut clock = clock(1, 30);
        let start = Instant::now();
        clock.remaining(0, start);

        // pts 30 is due 1s after origin; at +0.25s there is ~0.75s left.
        let wait = clock
            .remaining(30, start + Duration::from_millis(250))
            .expect("frame is not yet due");
        assert!((wait.as_secs_f64() - 0.75).abs() < 1e-9);

        // Re-checked after an early wake: still not due at +0.9s.
        let wait = clock
            .remaining(30, start + Duration::from_millis(900))
            .expect("frame is still not due");
        assert!((wait.as_secs_f64() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn late_frame_waits_zero() {
        let mut clock = clock(1, 30);
        let start = Instant::now();
        clock.remaining(0, start);

        // pts 30 is due at +1s; asking at +2s proceeds immediately.
        assert_eq!(clock.remaining(30, start + Duration::from_secs(2)), None);
    }

    #[test]
    fn non_monotonic_pts_skips_pacing() {
        let mut clock = clock(1, 30);
        let start = Instant::now();
        clock.remaining(0, start);
        clock.remaining(60, start + Duration::from_secs(2));

        // A decreasing pts has a target in the past; no wait, no error.
        assert_eq!(clock.remaining(30, start + Duration::from_secs(2)), None);
    }

    #[test]
    fn negative_pts_skips_pacing() {
        let mut clock = clock(1, 30);
        assert_eq!(clock.remaining(-30, Instant::now()), None);
    }

    #[test]
    fn exact_target_is_due() {
        let mut clock = clock(1, 1);
        let start = Instant::now();
        clock.remaining(0, start);
        assert_eq!(clock.remaining(1, start + Duration::from_secs(1)), None);
    }
}
