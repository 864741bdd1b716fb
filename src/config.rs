//! Configuration for the video shelf

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Default container extension recognized as a video
pub const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Default key-value store file name
pub const DEFAULT_STORE_FILE: &str = "video_shelf.db";

/// Configuration for scanning and persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// The single video extension to list (lowercase, without dot)
    pub video_extension: String,

    /// Extensions of sidecar subtitle files
    pub subtitle_extensions: HashSet<String>,

    /// Directory names to ignore
    pub ignore_dirs: HashSet<String>,

    /// Whether videos directly under the root are listed
    pub include_root_videos: bool,

    /// Whether decoded indices drive the order inside a folder
    pub sort_by_index: bool,

    /// Key-value store location
    pub store_path: Option<PathBuf>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            video_extension: DEFAULT_VIDEO_EXTENSION.to_string(),
            subtitle_extensions: Self::default_subtitle_extensions(),
            ignore_dirs: Self::default_ignore_dirs(),
            include_root_videos: true,
            sort_by_index: true,
            store_path: None,
        }
    }
}

impl ShelfConfig {
    /// Create a config builder
    pub fn builder() -> ShelfConfigBuilder {
        ShelfConfigBuilder::new()
    }

    /// Get the default subtitle extensions
    pub fn default_subtitle_extensions() -> HashSet<String> {
        ["vtt", "srt"].iter().map(|s| s.to_string()).collect()
    }

    /// Get the default directories to ignore
    pub fn default_ignore_dirs() -> HashSet<String> {
        [
            "$RECYCLE.BIN",
            "System Volume Information",
            "@eaDir",
            "lost+found",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Check if an extension marks a video
    pub fn is_video_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(&self.video_extension)
    }

    /// Check if an extension marks a subtitle
    pub fn is_subtitle_extension(&self, ext: &str) -> bool {
        self.subtitle_extensions.contains(&ext.to_lowercase())
    }

    /// Check if a directory should be ignored
    pub fn should_ignore_dir(&self, name: &str) -> bool {
        // Ignore hidden directories (starting with .)
        if name.starts_with('.') {
            return true;
        }
        self.ignore_dirs.contains(name)
    }

    /// Store path, falling back to the default file in the working directory
    pub fn effective_store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}

/// Builder for ShelfConfig
#[derive(Debug, Default)]
pub struct ShelfConfigBuilder {
    config: ShelfConfig,
}

impl ShelfConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the video extension
    pub fn video_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.video_extension = ext.into().trim_start_matches('.').to_lowercase();
        self
    }

    /// Set the subtitle extensions
    pub fn subtitle_extensions(mut self, extensions: HashSet<String>) -> Self {
        self.config.subtitle_extensions = extensions;
        self
    }

    /// Add a directory to ignore
    pub fn add_ignore_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.ignore_dirs.insert(dir.into());
        self
    }

    /// List or skip root-level videos
    pub fn include_root_videos(mut self, enabled: bool) -> Self {
        self.config.include_root_videos = enabled;
        self
    }

    /// Enable or disable index ordering
    pub fn sort_by_index(mut self, enabled: bool) -> Self {
        self.config.sort_by_index = enabled;
        self
    }

    /// Set the store path
    pub fn store_path(mut self, path: PathBuf) -> Self {
        self.config.store_path = Some(path);
        self
    }

    /// Build the config
    pub fn build(self) -> ShelfConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShelfConfig::default();
        assert_eq!(config.video_extension, "mp4");
        assert!(config.include_root_videos);
        assert!(config.sort_by_index);
        assert_eq!(config.effective_store_path(), PathBuf::from(DEFAULT_STORE_FILE));
    }

    #[test]
    fn test_extension_checks() {
        let config = ShelfConfig::default();
        assert!(config.is_video_extension("mp4"));
        assert!(config.is_video_extension("MP4"));
        assert!(!config.is_video_extension("mkv"));
        assert!(config.is_subtitle_extension("VTT"));
        assert!(!config.is_subtitle_extension("txt"));
    }

    #[test]
    fn test_should_ignore_dir() {
        let config = ShelfConfig::default();
        assert!(config.should_ignore_dir(".git"));
        assert!(config.should_ignore_dir("$RECYCLE.BIN"));
        assert!(!config.should_ignore_dir("Season 1"));
    }

    #[test]
    fn test_config_builder() {
        let config = ShelfConfig::builder()
            .video_extension(".MKV")
            .include_root_videos(false)
            .sort_by_index(false)
            .add_ignore_dir("extras")
            .store_path(PathBuf::from("/tmp/shelf.db"))
            .build();

        assert_eq!(config.video_extension, "mkv");
        assert!(!config.include_root_videos);
        assert!(!config.sort_by_index);
        assert!(config.should_ignore_dir("extras"));
        assert_eq!(config.effective_store_path(), PathBuf::from("/tmp/shelf.db"));
    }
}
