// SPDX-License-Identifier: MPL-2.0
//! Playback driver.
//!
//! The driver moves through three phases. Starting: open the source, bring
//! up the window and GPU, acquire the frame buffer — any failure returns
//! early. Running: the [`play`] loop below. Closing: unwinding drops release
//! the buffer, the decoder, and the window/GPU state, each exactly once and
//! only if it was acquired, on every exit path.
//!
//! Per iteration the frame buffer has one writer (the source) and then one
//! reader (the host's presenter), sequenced strictly by this loop; there is
//! no other suspension point than the host's pump.

use crate::clock::PlaybackClock;
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::frame_buffer::{FrameBuffer, FRAME_ALIGNMENT};
use crate::source::{FrameSource, VideoSource};
use crate::window::WinitHost;
use std::time::{Duration, Instant};

/// Display-side collaborator of the playback loop.
///
/// One implementation wraps winit and wgpu; tests substitute a recording
/// fake to observe the loop's timing and lifecycle.
pub trait PresentationHost {
    /// Whether the user asked to close the window.
    fn close_requested(&self) -> bool;

    /// Processes pending host events, blocking for at most `timeout`.
    /// May return early (e.g. when input events arrive); callers re-check
    /// their condition in a loop.
    fn pump(&mut self, timeout: Duration) -> Result<()>;

    /// Uploads and draws one frame, then presents it.
    fn present(&mut self, pixels: &[u8]) -> Result<()>;
}

/// What playback did, for logging and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaybackStats {
    /// Frames handed to the presentation pipeline.
    pub frames_presented: u64,
}

/// Runs the playback loop until the stream ends or the window is closed.
///
/// The frame buffer is acquired here, once, before the first frame; the
/// pacing origin latches on the first decoded frame. Every decoded frame is
/// presented — late ones immediately, early ones after a re-checked
/// wait-with-timeout that keeps the host responsive.
pub fn play<S, H>(source: &mut S, host: &mut H) -> Result<PlaybackStats>
where
    S: FrameSource + ?Sized,
    H: PresentationHost + ?Sized,
{
    let geometry = source.geometry();
    let mut buffer = FrameBuffer::acquire(geometry.frame_bytes(), FRAME_ALIGNMENT)?;
    let mut clock = PlaybackClock::new(geometry.time_base);
    let mut stats = PlaybackStats::default();

    loop {
        host.pump(Duration::ZERO)?;
        if host.close_requested() {
            log::info!("close requested, stopping playback");
            break;
        }

        let Some(pts) = source.read_frame(buffer.as_mut_slice())? else {
            log::info!("end of stream after {} frames", stats.frames_presented);
            break;
        };

        // A close arriving mid-wait is latched by the pump and honored at
        // the top of the next iteration; the decoded frame is still shown.
        while let Some(wait) = clock.remaining(pts, Instant::now()) {
            host.pump(wait)?;
        }

        host.present(buffer.as_slice())?;
        stats.frames_presented += 1;
    }

    Ok(stats)
}

/// Opens the source and display host, then plays to completion.
///
/// Open failures happen before any window exists, matching the startup
/// order: decode source first, then window and GPU.
pub fn run(config: &PlayerConfig) -> Result<PlaybackStats> {
    let mut source = VideoSource::open(&config.source)?;
    let geometry = source.geometry();
    let mut host = WinitHost::new(&config.window_title, geometry)?;
    play(&mut source, &mut host)
}
