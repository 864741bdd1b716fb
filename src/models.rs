//! Core data models for the video shelf
//!
//! Field names serialize in camelCase so persisted structures keep the
//! `mainFolder` layout the front-end reads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codec;

/// A single video file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Clean name (codec prefixes and extension stripped)
    pub name: String,
    /// Absolute path to the file
    pub path: PathBuf,
    /// Last playback position in whole seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played_position: Option<u64>,
    /// Ordering hint, >= 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Subtitle file sharing the video's clean name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_path: Option<PathBuf>,
}

impl Video {
    /// Build a video from its path, decoding the codec prefixes of the file name
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (stem, _) = codec::split_extension(&file_name);
        let decoded = codec::decode_index_and_time(stem);
        Self {
            name: decoded.name,
            path,
            last_played_position: decoded.position,
            index: decoded.index,
            subtitle_path: None,
        }
    }

    /// Set the subtitle path
    pub fn with_subtitle(mut self, subtitle: Option<PathBuf>) -> Self {
        self.subtitle_path = subtitle;
        self
    }

    /// Set the playback position
    pub fn with_position(mut self, position: Option<u64>) -> Self {
        self.last_played_position = position;
        self
    }

    /// File name on disk
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// A first-level subfolder of the main folder
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subfolder {
    pub name: String,
    #[serde(default)]
    pub videos_seq: Vec<Video>,
}

impl Subfolder {
    pub fn new(name: impl Into<String>, videos_seq: Vec<Video>) -> Self {
        Self {
            name: name.into(),
            videos_seq,
        }
    }

    /// Return a copy with the video at `from` moved to position `to`.
    ///
    /// Out-of-range positions are clamped; `to` refers to the final position.
    pub fn reordered(&self, from: usize, to: usize) -> Self {
        let mut videos = self.videos_seq.clone();
        if from < videos.len() {
            let video = videos.remove(from);
            let to = to.min(videos.len());
            videos.insert(to, video);
        }
        Self::new(self.name.clone(), videos)
    }

    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.videos_seq.iter().position(|v| v.path == path)
    }
}

/// The folder the user picked, scanned one level deep
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainFolder {
    /// Root path of the library
    pub path: PathBuf,
    /// Videos directly under the root
    #[serde(default)]
    pub videos_seq: Vec<Video>,
    /// Immediate subfolders in listing order
    #[serde(default)]
    pub subfolders_with_videos: Vec<Subfolder>,
    /// Subfolders that contain further subfolders (never traversed)
    #[serde(default)]
    pub sub_subfolder_names: Vec<String>,
}

impl MainFolder {
    /// Create an empty main folder for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Iterate over every video, root-level first
    pub fn all_videos(&self) -> impl Iterator<Item = &Video> {
        self.videos_seq
            .iter()
            .chain(self.subfolders_with_videos.iter().flat_map(|s| s.videos_seq.iter()))
    }

    /// Total number of videos
    pub fn video_count(&self) -> usize {
        self.all_videos().count()
    }

    /// Find a video by its current path
    pub fn find_video(&self, path: &Path) -> Option<&Video> {
        self.all_videos().find(|v| v.path == path)
    }

    pub fn subfolder(&self, name: &str) -> Option<&Subfolder> {
        self.subfolders_with_videos.iter().find(|s| s.name == name)
    }

    /// Return a copy where the video at `old_path` is replaced by `video`
    pub fn with_video_replaced(&self, old_path: &Path, video: Video) -> Self {
        let replace = |videos: &[Video]| -> Vec<Video> {
            videos
                .iter()
                .map(|v| if v.path == old_path { video.clone() } else { v.clone() })
                .collect()
        };
        Self {
            path: self.path.clone(),
            videos_seq: replace(&self.videos_seq),
            subfolders_with_videos: self
                .subfolders_with_videos
                .iter()
                .map(|s| Subfolder::new(s.name.clone(), replace(&s.videos_seq)))
                .collect(),
            sub_subfolder_names: self.sub_subfolder_names.clone(),
        }
    }

    /// Return a copy where the named subfolder is replaced by `subfolder`
    pub fn with_subfolder_replaced(&self, subfolder: Subfolder) -> Self {
        let mut folder = self.clone();
        if let Some(slot) = folder
            .subfolders_with_videos
            .iter_mut()
            .find(|s| s.name == subfolder.name)
        {
            *slot = subfolder;
        }
        folder
    }

    /// Check whether any subfolder nests deeper than one level
    pub fn has_nested_subfolders(&self) -> bool {
        !self.sub_subfolder_names.is_empty()
    }
}
