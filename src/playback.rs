//! Playback session state
//!
//! The player widget reports seeks through a callback registered when the
//! session is created.

use log::debug;

use crate::models::Video;

/// Seek notification callback, receives the new position in whole seconds
pub type SeekCallback = Box<dyn Fn(&Video, u64) + Send + Sync>;

/// The video currently playing and its live position
pub struct PlaybackSession {
    video: Video,
    on_seek: Option<SeekCallback>,
}

impl PlaybackSession {
    /// Start a session without seek notifications
    pub fn new(video: Video) -> Self {
        Self {
            video,
            on_seek: None,
        }
    }

    /// Start a session that notifies `on_seek` on every seek
    pub fn with_seek_callback(video: Video, on_seek: SeekCallback) -> Self {
        Self {
            video,
            on_seek: Some(on_seek),
        }
    }

    pub fn video(&self) -> &Video {
        &self.video
    }

    /// Position the player should start from
    pub fn start_position(&self) -> u64 {
        self.video.last_played_position.unwrap_or(0)
    }

    /// Record a seek reported by the player, in fractional seconds
    pub fn handle_seek(&mut self, current_time: f64) -> u64 {
        let seconds = whole_seconds(current_time);
        self.video.last_played_position = Some(seconds);
        debug!("Seek to {}s in {:?}", seconds, self.video.name);
        if let Some(callback) = &self.on_seek {
            callback(&self.video, seconds);
        }
        seconds
    }

    /// End the session, returning the video with its last position
    pub fn finish(self) -> Video {
        self.video
    }
}

/// Truncate a player timestamp to whole non-negative seconds
pub fn whole_seconds(current_time: f64) -> u64 {
    if current_time.is_finite() && current_time > 0.0 {
        current_time.trunc() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn video() -> Video {
        Video::from_path(PathBuf::from("/lib/01:00 clip.mp4"))
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(90.9), 90);
        assert_eq!(whole_seconds(0.2), 0);
        assert_eq!(whole_seconds(-3.0), 0);
        assert_eq!(whole_seconds(f64::NAN), 0);
    }

    #[test]
    fn test_seek_invokes_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut session = PlaybackSession::with_seek_callback(
            video(),
            Box::new(move |video, seconds| {
                sink.lock().unwrap().push((video.name.clone(), seconds));
            }),
        );

        assert_eq!(session.start_position(), 60);
        assert_eq!(session.handle_seek(125.7), 125);
        session.handle_seek(3.0);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("clip".to_string(), 125), ("clip".to_string(), 3)]
        );
        assert_eq!(session.finish().last_played_position, Some(3));
    }

    #[test]
    fn test_seek_without_callback() {
        let mut session = PlaybackSession::new(video());
        session.handle_seek(10.0);
        assert_eq!(session.video().last_played_position, Some(10));
    }
}
