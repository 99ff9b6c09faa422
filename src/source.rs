// SPDX-License-Identifier: MPL-2.0
//! Decode source: FFmpeg-backed frame supply.
//!
//! [`VideoSource`] opens a media container, picks the best video stream, and
//! yields successive frames as tightly packed RGBA written into a
//! caller-owned buffer, each tagged with its presentation timestamp. The
//! [`FrameSource`] trait is the seam the driver consumes, so playback can be
//! exercised against synthetic streams in tests.

use crate::error::{Error, Result};
use crate::stream::{Pts, StreamGeometry, TimeBase, BYTES_PER_PIXEL};
use std::path::Path;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with its log level clamped to errors.
///
/// Safe to call multiple times; initialization happens once. The log clamp
/// suppresses container warnings (e.g. odd creation times) that would
/// otherwise land on stderr during playback.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::SourceOpen(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging.
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Supplies decoded frames on demand.
///
/// `read_frame` writes one frame's pixels into the caller-owned buffer
/// (sized per [`StreamGeometry::frame_bytes`]) and returns its timestamp, or
/// `Ok(None)` once the stream is exhausted. After end-of-stream the source
/// must not be asked for further frames without reopening.
pub trait FrameSource {
    /// Stream geometry, immutable once the source is open.
    fn geometry(&self) -> StreamGeometry;

    /// Decodes the next frame into `buffer`, returning its pts.
    fn read_frame(&mut self, buffer: &mut [u8]) -> Result<Option<Pts>>;
}

/// FFmpeg-backed [`FrameSource`] over a media file.
///
/// All held FFmpeg state (container, codec, scaler) is released exactly once
/// when the source is dropped.
pub struct VideoSource {
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    geometry: StreamGeometry,
    flushed: bool,
}

impl VideoSource {
    /// Opens a media file and prepares decoding of its best video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        init_ffmpeg()?;

        let path = path.as_ref();
        let input = ffmpeg_next::format::input(&path)
            .map_err(|e| Error::SourceOpen(format!("{}: {e}", path.display())))?;

        let (stream_index, stream_time_base, parameters) = {
            let stream = input
                .streams()
                .best(ffmpeg_next::media::Type::Video)
                .ok_or_else(|| Error::SourceOpen("no video stream found".to_string()))?;
            (stream.index(), stream.time_base(), stream.parameters())
        };

        let context =
            ffmpeg_next::codec::context::Context::from_parameters(parameters)
                .map_err(|e| Error::SourceOpen(format!("failed to create codec context: {e}")))?;
        let decoder = context
            .decoder()
            .video()
            .map_err(|e| Error::SourceOpen(format!("failed to create video decoder: {e}")))?;

        let time_base = TimeBase::new(stream_time_base.numerator(), stream_time_base.denominator())?;
        let geometry = StreamGeometry::new(decoder.width(), decoder.height(), time_base)?;

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            geometry.width,
            geometry.height,
            ffmpeg_next::format::Pixel::RGBA,
            geometry.width,
            geometry.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::SourceOpen(format!("failed to create scaler: {e}")))?;

        log::info!(
            "opened {}: {}x{}, time base {}/{}",
            path.display(),
            geometry.width,
            geometry.height,
            time_base.num,
            time_base.den
        );

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            geometry,
            flushed: false,
        })
    }

    /// Pulls the next packet belonging to the video stream, skipping others.
    fn next_video_packet(&mut self) -> Option<ffmpeg_next::Packet> {
        let stream_index = self.stream_index;
        for (stream, packet) in self.input.packets() {
            if stream.index() == stream_index {
                return Some(packet);
            }
        }
        None
    }

    /// Copies the scaled frame into `buffer` with rows tightly packed.
    ///
    /// FFmpeg pads rows to its own alignment; the presentation pipeline
    /// expects exactly `width * 4` bytes per row.
    fn copy_packed(&self, frame: &ffmpeg_next::frame::Video, buffer: &mut [u8]) {
        let row_bytes = self.geometry.width as usize * BYTES_PER_PIXEL;
        let stride = frame.stride(0);
        let data = frame.data(0);
        for y in 0..self.geometry.height as usize {
            let src = y * stride;
            buffer[y * row_bytes..(y + 1) * row_bytes]
                .copy_from_slice(&data[src..src + row_bytes]);
        }
    }
}

impl FrameSource for VideoSource {
    fn geometry(&self) -> StreamGeometry {
        self.geometry
    }

    fn read_frame(&mut self, buffer: &mut [u8]) -> Result<Option<Pts>> {
        let expected = self.geometry.frame_bytes();
        if buffer.len() < expected {
            return Err(Error::Decode(format!(
                "frame buffer holds {} bytes, stream needs {expected}",
                buffer.len()
            )));
        }

        loop {
            let mut decoded = ffmpeg_next::frame::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let mut converted = ffmpeg_next::frame::Video::empty();
                self.scaler
                    .run(&decoded, &mut converted)
                    .map_err(|e| Error::Decode(format!("pixel conversion failed: {e}")))?;
                self.copy_packed(&converted, buffer);

                let pts = decoded.timestamp().or_else(|| decoded.pts()).unwrap_or(0);
                return Ok(Some(pts));
            }

            if self.flushed {
                // Decoder drained after EOF: the stream is exhausted.
                return Ok(None);
            }

            match self.next_video_packet() {
                Some(packet) => {
                    self.decoder
                        .send_packet(&packet)
                        .map_err(|e| Error::Decode(format!("packet send failed: {e}")))?;
                }
                None => {
                    // No packets left; flush the decoder so buffered frames
                    // (codec delay) still come out before end-of-stream.
                    self.decoder
                        .send_eof()
                        .map_err(|e| Error::Decode(format!("decoder flush failed: {e}")))?;
                    self.flushed = true;
                }
            }
        }
    }
}
