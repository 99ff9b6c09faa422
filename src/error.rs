// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Playback errors.
///
/// Every variant is fatal: the diagnostic is printed once and the process
/// exits with a non-zero status. End-of-stream is not an error; sources
/// report it as `Ok(None)` from `read_frame`.
#[derive(Debug, Clone)]
pub enum Error {
    /// The windowing host (event loop) could not be initialized.
    HostInit(String),

    /// The media container could not be opened or has no usable video stream.
    SourceOpen(String),

    /// The event loop never delivered a window.
    WindowCreate(String),

    /// GPU surface, adapter, device, or pipeline setup failed.
    GraphicsInit(String),

    /// The frame buffer allocation could not be satisfied.
    Allocation(String),

    /// Decoding failed mid-playback.
    Decode(String),

    /// Presenting a frame failed mid-playback.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HostInit(msg) => write!(f, "host initialization failed: {msg}"),
            Error::SourceOpen(msg) => write!(f, "couldn't open video source: {msg}"),
            Error::WindowCreate(msg) => write!(f, "couldn't open window: {msg}"),
            Error::GraphicsInit(msg) => write!(f, "graphics initialization failed: {msg}"),
            Error::Allocation(msg) => write!(f, "frame buffer allocation failed: {msg}"),
            Error::Decode(msg) => write!(f, "decode error: {msg}"),
            Error::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
