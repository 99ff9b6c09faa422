// SPDX-License-Identifier: MPL-2.0
//! `cineview` is a minimal real-time video player.
//!
//! Frames are decoded with FFmpeg into a single aligned buffer, paced to the
//! stream's presentation timestamps against a wall-clock origin, and drawn as
//! a textured quad with wgpu. The whole program is one cooperative loop; see
//! [`player::run`] for the driver.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame_buffer;
pub mod player;
pub mod render;
pub mod source;
pub mod stream;
pub mod window;
