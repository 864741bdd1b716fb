//! Reconciliation of a persisted folder structure against the filesystem
//!
//! The fresh scan decides which videos exist and where. The previous
//! structure only contributes playback positions, matched by clean name,
//! for videos whose filename does not already encode one.

use log::{debug, info};
use std::collections::HashMap;

use crate::config::ShelfConfig;
use crate::error::Result;
use crate::models::{MainFolder, Subfolder, Video};
use crate::scanner;

/// Clean name -> last known playback position
pub type PositionIndex = HashMap<String, u64>;

/// Collect every known position of `folder`, keyed by clean name.
///
/// When two videos share a clean name the first one in folder order wins.
pub fn position_index(folder: &MainFolder) -> PositionIndex {
    let mut index = PositionIndex::new();
    for video in folder.all_videos() {
        if let Some(position) = video.last_played_position {
            index.entry(video.name.clone()).or_insert(position);
        }
    }
    index
}

/// Copy known positions onto a freshly scanned structure
pub fn merge_positions(fresh: MainFolder, index: &PositionIndex) -> MainFolder {
    let merge = |videos: Vec<Video>| -> Vec<Video> {
        videos
            .into_iter()
            .map(|video| match (video.last_played_position, index.get(&video.name)) {
                (None, Some(&position)) => {
                    debug!("Restored position {}s for {:?}", position, video.name);
                    video.with_position(Some(position))
                }
                _ => video,
            })
            .collect()
    };

    MainFolder {
        path: fresh.path,
        videos_seq: merge(fresh.videos_seq),
        subfolders_with_videos: fresh
            .subfolders_with_videos
            .into_iter()
            .map(|s| Subfolder::new(s.name, merge(s.videos_seq)))
            .collect(),
        sub_subfolder_names: fresh.sub_subfolder_names,
    }
}

/// Rescan `previous.path` and carry its positions over to the result
pub fn reconcile(previous: &MainFolder, config: &ShelfConfig) -> Result<MainFolder> {
    let index = position_index(previous);
    let fresh = scanner::scan(&previous.path, config)?;
    let reconciled = merge_positions(fresh, &index);

    info!(
        "Reconciled {:?}: {} videos now, {} before",
        reconciled.path,
        reconciled.video_count(),
        previous.video_count()
    );
    Ok(reconciled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn video(path: &str, position: Option<u64>) -> Video {
        Video::from_path(PathBuf::from(path)).with_position(position)
    }

    #[test]
    fn test_position_index() {
        let folder = MainFolder {
            path: PathBuf::from("/l"),
            videos_seq: vec![video("/l/a.mp4", Some(10)), video("/l/b.mp4", None)],
            subfolders_with_videos: vec![
                Subfolder::new("s1", vec![video("/l/s1/c.mp4", Some(30))]),
                Subfolder::new("s2", vec![video("/l/s2/a.mp4", Some(99))]),
            ],
            sub_subfolder_names: Vec::new(),
        };
        let index = position_index(&folder);
        assert_eq!(index.len(), 2);
        assert_eq!(index["a"], 10);
        assert_eq!(index["c"], 30);
    }

    #[test]
    fn test_merge_prefers_filename_position() {
        let mut index = PositionIndex::new();
        index.insert("a".to_string(), 10);
        index.insert("b".to_string(), 20);

        let fresh = MainFolder {
            path: PathBuf::from("/l"),
            videos_seq: vec![
                video("/l/00:05 a.mp4", Some(5)),
                video("/l/b.mp4", None),
                video("/l/new.mp4", None),
            ],
            subfolders_with_videos: Vec::new(),
            sub_subfolder_names: Vec::new(),
        };
        let merged = merge_positions(fresh, &index);
        let positions: Vec<_> = merged
            .videos_seq
            .iter()
            .map(|v| v.last_played_position)
            .collect();
        assert_eq!(positions, [Some(5), Some(20), None]);
    }
}
