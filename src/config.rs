// SPDX-License-Identifier: MPL-2.0
//! Playback configuration supplied by the CLI layer.

use std::path::PathBuf;

/// Title used when the CLI does not override it.
pub const DEFAULT_WINDOW_TITLE: &str = "Video Player";

/// Everything the player needs to start: where the media lives and how the
/// window is labelled. The window's initial size comes from the stream
/// geometry, not from configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Path of the media container to play.
    pub source: PathBuf,

    /// Window title.
    pub window_title: String,
}

impl PlayerConfig {
    /// Creates a configuration for the given media path with default title.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_title() {
        let config = PlayerConfig::new("movie.mov");
        assert_eq!(config.window_title, DEFAULT_WINDOW_TITLE);
        assert_eq!(config.source, PathBuf::from("movie.mov"));
    }

    #[test]
    fn title_can_be_overridden() {
        let mut config = PlayerConfig::new("movie.mov");
        config.window_title = "My Player".to_string();
        assert_eq!(config.window_title, "My Player");
    }
}
