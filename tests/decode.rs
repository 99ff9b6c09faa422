// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the FFmpeg-backed source.
//!
//! The real-media test runs only when a sample file is present next to the
//! tests; everything else works without fixtures.

use cineview::error::Error;
use cineview::source::{FrameSource, VideoSource};

#[test]
fn open_fails_for_nonexistent_file() {
    let result = VideoSource::open("/nonexistent/video.mp4");
    assert!(matches!(result, Err(Error::SourceOpen(_))));
}

#[test]
fn open_fails_for_non_media_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-video.mp4");
    std::fs::write(&path, b"plain text, not a container").unwrap();

    let result = VideoSource::open(&path);
    assert!(matches!(result, Err(Error::SourceOpen(_))));
}

#[test]
fn sample_file_decodes_first_frames_with_nondecreasing_pts() {
    let path = "tests/data/sample.mp4";
    if !std::path::Path::new(path).exists() {
        return; // Skip if test media doesn't exist
    }

    let mut source = VideoSource::open(path).unwrap();
    let geometry = source.geometry();
    assert!(geometry.width > 0);
    assert!(geometry.height > 0);

    let mut buffer = vec![0u8; geometry.frame_bytes()];
    let mut last_pts = None;
    for _ in 0..3 {
        match source.read_frame(&mut buffer).unwrap() {
            Some(pts) => {
                if let Some(last) = last_pts {
                    assert!(pts >= last, "pts went backwards: {last} -> {pts}");
                }
                last_pts = Some(pts);
            }
            None => break,
        }
    }
    assert!(last_pts.is_some(), "no frames decoded from sample");
}

#[test]
fn read_frame_rejects_undersized_buffer() {
    let path = "tests/data/sample.mp4";
    if !std::path::Path::new(path).exists() {
        return;
    }

    let mut source = VideoSource::open(path).unwrap();
    let mut tiny = vec![0u8; 16];
    assert!(matches!(
        source.read_frame(&mut tiny),
        Err(Error::Decode(_))
    ));
}
