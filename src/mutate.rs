//! Mutation operations
//!
//! Every operation renames a file on disk and returns the new path. The
//! filename stays the only record of position and order, so callers update
//! their in-memory structures from the returned path after the rename
//! succeeded.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::{Result, ShelfError};
use crate::models::{Subfolder, Video};

/// Rename `path` so its filename carries `seconds` as playback position
pub fn rename_with_position(path: &Path, seconds: u64) -> Result<PathBuf> {
    let file_name = file_name_of(path)?;
    let target = path.with_file_name(codec::with_position(file_name, seconds));
    rename_checked(path, target)
}

/// Rename `path` so its filename carries `index` as ordering index
pub fn update_index(path: &Path, index: u32) -> Result<PathBuf> {
    if index == 0 {
        return Err(ShelfError::invalid_argument("Index must be at least 1"));
    }
    let file_name = file_name_of(path)?;
    let target = path.with_file_name(codec::with_index(file_name, index));
    rename_checked(path, target)
}

/// Move `path` (root/subfolder/file) into the sibling subfolder `target_folder`
pub fn move_between_folders(path: &Path, target_folder: &str) -> Result<PathBuf> {
    let file_name = file_name_of(path)?;
    if !is_plain_folder_name(target_folder) {
        return Err(ShelfError::invalid_path(
            PathBuf::from(target_folder),
            format!("Not a folder name: {:?}", target_folder),
        ));
    }

    let main_root = path
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| ShelfError::invalid_path(path.to_path_buf(), "Path has no grandparent"))?;
    let target_dir = main_root.join(target_folder);
    if !target_dir.is_dir() {
        return Err(ShelfError::not_found(target_dir));
    }

    rename_checked(path, target_dir.join(file_name))
}

/// Rewrite the index tokens of `paths` to `1..=N` in sequence order
///
/// Stops at the first failure; files renamed before it keep their new names.
pub fn reindex(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| update_index(path, sequence_index(i)?))
        .collect()
}

/// Reindex a subfolder on disk and return it with refreshed videos
pub fn reindex_subfolder(subfolder: &Subfolder) -> Result<Subfolder> {
    let mut videos = Vec::with_capacity(subfolder.videos_seq.len());
    for (i, video) in subfolder.videos_seq.iter().enumerate() {
        let new_path = update_index(&video.path, sequence_index(i)?)?;
        videos.push(refreshed(video, new_path));
    }
    debug!("Reindexed {} videos in {:?}", videos.len(), subfolder.name);
    Ok(Subfolder::new(subfolder.name.clone(), videos))
}

/// Rebuild `video` from its new path, keeping metadata the filename lacks
pub fn refreshed(video: &Video, new_path: PathBuf) -> Video {
    let fresh = Video::from_path(new_path);
    let position = fresh.last_played_position.or(video.last_played_position);
    fresh
        .with_position(position)
        .with_subtitle(video.subtitle_path.clone())
}

fn sequence_index(i: usize) -> Result<u32> {
    u32::try_from(i + 1).map_err(|_| ShelfError::invalid_argument("Too many videos to index"))
}

fn file_name_of(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ShelfError::invalid_path(path.to_path_buf(), "No UTF-8 file name"))
}

fn is_plain_folder_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Rename without ever overwriting an existing file
fn rename_checked(from: &Path, to: PathBuf) -> Result<PathBuf> {
    fs::symlink_metadata(from).map_err(|e| ShelfError::from_io(e, from))?;
    if to == from {
        return Ok(to);
    }
    if to.exists() {
        return Err(ShelfError::rename_failed(
            to.clone(),
            format!("Target already exists: {:?}", to),
        ));
    }

    fs::rename(from, &to).map_err(|e| ShelfError::from_rename(e, from))?;
    info!("Renamed {:?} -> {:?}", from, to);
    Ok(to)
}
