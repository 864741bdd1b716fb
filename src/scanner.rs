//! Scanner module - lists a main folder one level deep

use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::codec;
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::models::{MainFolder, Subfolder, Video};

/// Scan `root` and its immediate subfolders.
///
/// Deeper subfolders are never read for videos; their parents are reported in
/// `sub_subfolder_names`. Any filesystem error aborts the scan.
pub fn scan(root: &Path, config: &ShelfConfig) -> Result<MainFolder> {
    ensure_dir(root)?;

    let mut root_files: Vec<PathBuf> = Vec::new();
    let mut subfolders: Vec<(String, Vec<PathBuf>)> = Vec::new();
    let mut nested: Vec<String> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, config));

    // Pre-order walk: a subfolder's entries directly follow the subfolder itself
    for entry in walker {
        let entry = entry?;
        let is_dir = entry.file_type().is_dir();

        match (entry.depth(), is_dir) {
            (1, true) => {
                let name = entry.file_name().to_string_lossy().into_owned();
                subfolders.push((name, Vec::new()));
            }
            (1, false) => {
                if config.include_root_videos {
                    root_files.push(entry.into_path());
                }
            }
            (_, true) => {
                if let Some((name, _)) = subfolders.last() {
                    if nested.last() != Some(name) {
                        warn!(
                            "Subfolder {:?} contains nested folders which are not scanned",
                            name
                        );
                        nested.push(name.clone());
                    }
                }
            }
            (_, false) => {
                if let Some((_, files)) = subfolders.last_mut() {
                    files.push(entry.into_path());
                }
            }
        }
    }

    let folder = MainFolder {
        path: root.to_path_buf(),
        videos_seq: collect_videos(root_files, config),
        subfolders_with_videos: subfolders
            .into_iter()
            .map(|(name, files)| Subfolder::new(name, collect_videos(files, config)))
            .collect(),
        sub_subfolder_names: nested,
    };

    info!(
        "Scanned {:?}: {} videos in {} subfolders",
        root,
        folder.video_count(),
        folder.subfolders_with_videos.len()
    );
    Ok(folder)
}

fn ensure_dir(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| ShelfError::from_io(e, path))?;
    if !metadata.is_dir() {
        return Err(ShelfError::invalid_path(
            path.to_path_buf(),
            format!("Not a directory: {:?}", path),
        ));
    }
    Ok(())
}

/// Only first-level folders are filtered; deeper ones still count as nesting
fn is_ignored_dir(entry: &DirEntry, config: &ShelfConfig) -> bool {
    entry.depth() == 1
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.should_ignore_dir(name))
}

enum FileKind {
    Video,
    Subtitle(String),
    Other,
}

fn classify(path: &Path, config: &ShelfConfig) -> FileKind {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        warn!("Skipping non UTF-8 file name: {:?}", path);
        return FileKind::Other;
    };
    let (stem, ext) = codec::split_extension(file_name);
    let ext = ext.trim_start_matches('.');
    if config.is_video_extension(ext) {
        FileKind::Video
    } else if config.is_subtitle_extension(ext) {
        FileKind::Subtitle(codec::clean_name(stem))
    } else {
        FileKind::Other
    }
}

/// Turn a folder listing into ordered videos with their subtitles attached
fn collect_videos(files: Vec<PathBuf>, config: &ShelfConfig) -> Vec<Video> {
    let mut videos = Vec::new();
    let mut subtitles: HashMap<String, PathBuf> = HashMap::new();

    for path in files {
        match classify(&path, config) {
            FileKind::Video => videos.push(Video::from_path(path)),
            FileKind::Subtitle(clean) => {
                subtitles.entry(clean).or_insert(path);
            }
            FileKind::Other => {}
        }
    }

    let mut videos: Vec<Video> = videos
        .into_iter()
        .map(|video| {
            let subtitle = subtitles.get(&video.name).cloned();
            video.with_subtitle(subtitle)
        })
        .collect();

    if config.sort_by_index && videos.iter().any(|v| v.index.is_some()) {
        // Stable: unindexed videos trail in listing order
        videos.sort_by_key(|v| (v.index.is_none(), v.index));
    }

    debug!("Collected {} videos", videos.len());
    videos
}
