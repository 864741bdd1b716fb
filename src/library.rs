//! Request/response surface used by the front-end
//!
//! Each call takes plain arguments and either returns a result or fails with
//! a labeled `ShelfError`. Structures are never mutated in place: operations
//! return an updated copy, which is also persisted.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::models::{MainFolder, Subfolder};
use crate::mutate;
use crate::reconcile;
use crate::scanner;
use crate::store::ConfigStore;

/// Video library bound to a persisted key-value store
pub struct Library {
    config: ShelfConfig,
    store: ConfigStore,
}

impl Library {
    /// Open the library with the store configured in `config`
    pub fn open(config: ShelfConfig) -> Result<Self> {
        let store = ConfigStore::open(&config.effective_store_path())?;
        Ok(Self { config, store })
    }

    /// Use an already opened store
    pub fn with_store(config: ShelfConfig, store: ConfigStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Scan `root` and make it the persisted main folder
    pub fn set_folder(&mut self, root: &Path) -> Result<MainFolder> {
        let folder = scanner::scan(root, &self.config)?;
        self.store.save_main_folder(&folder)?;
        info!("Main folder set to {:?}", root);
        Ok(folder)
    }

    /// Load the persisted main folder, reconciled against the filesystem
    pub fn load_config(&mut self) -> Result<Option<MainFolder>> {
        let Some(previous) = self.store.load_main_folder()? else {
            return Ok(None);
        };
        let folder = reconcile::reconcile(&previous, &self.config)?;
        self.store.save_main_folder(&folder)?;
        Ok(Some(folder))
    }

    /// Persist a structure the caller already updated
    pub fn update_main_folder(&mut self, folder: &MainFolder) -> Result<()> {
        self.store.save_main_folder(folder)
    }

    pub fn rename_with_position(&self, path: &Path, seconds: u64) -> Result<PathBuf> {
        mutate::rename_with_position(path, seconds)
    }

    pub fn update_index(&self, path: &Path, index: u32) -> Result<PathBuf> {
        mutate::update_index(path, index)
    }

    pub fn move_between_folders(&self, path: &Path, target_folder: &str) -> Result<PathBuf> {
        mutate::move_between_folders(path, target_folder)
    }

    /// Encode `seconds` into the video's filename and return the updated folder
    pub fn save_position(
        &mut self,
        folder: &MainFolder,
        video_path: &Path,
        seconds: u64,
    ) -> Result<MainFolder> {
        let video = folder
            .find_video(video_path)
            .ok_or_else(|| ShelfError::not_found(video_path.to_path_buf()))?;

        let new_path = mutate::rename_with_position(video_path, seconds)?;
        let updated = mutate::refreshed(video, new_path).with_position(Some(seconds));
        let folder = folder.with_video_replaced(video_path, updated);

        self.store.save_main_folder(&folder)?;
        Ok(folder)
    }

    /// Move a video inside a subfolder and rewrite the folder's indices
    pub fn reorder(
        &mut self,
        folder: &MainFolder,
        subfolder_name: &str,
        from: usize,
        to: usize,
    ) -> Result<MainFolder> {
        let subfolder = find_subfolder(folder, subfolder_name)?;
        if from >= subfolder.videos_seq.len() {
            return Err(ShelfError::invalid_argument(format!(
                "No video at position {} in {:?}",
                from, subfolder_name
            )));
        }

        let reindexed = mutate::reindex_subfolder(&subfolder.reordered(from, to))?;
        let folder = folder.with_subfolder_replaced(reindexed);

        self.store.save_main_folder(&folder)?;
        Ok(folder)
    }

    /// Move a video into another subfolder at `insert_at`.
    ///
    /// Both folders get their indices rewritten to `1..N` afterwards. A
    /// matching subtitle follows the video when it can be moved.
    pub fn move_video(
        &mut self,
        folder: &MainFolder,
        video_path: &Path,
        target_folder: &str,
        insert_at: usize,
    ) -> Result<MainFolder> {
        let source = folder
            .subfolders_with_videos
            .iter()
            .find(|s| s.position_of(video_path).is_some())
            .ok_or_else(|| {
                ShelfError::invalid_path(video_path.to_path_buf(), "Video is not in a subfolder")
            })?;
        let target = find_subfolder(folder, target_folder)?;
        if source.name == target.name {
            return Err(ShelfError::invalid_argument(
                "Source and target folder are the same, use reorder",
            ));
        }

        let position = source.position_of(video_path).unwrap_or_default();
        let video = &source.videos_seq[position];

        let new_path = mutate::move_between_folders(video_path, target_folder)?;
        let subtitle = video.subtitle_path.as_ref().map(|subtitle| {
            match mutate::move_between_folders(subtitle, target_folder) {
                Ok(moved) => moved,
                Err(e) => {
                    warn!("Subtitle {:?} stays behind: {}", subtitle, e);
                    subtitle.clone()
                }
            }
        });
        let moved = mutate::refreshed(video, new_path).with_subtitle(subtitle);

        let mut source_videos = source.videos_seq.clone();
        source_videos.remove(position);
        let mut target_videos = target.videos_seq.clone();
        target_videos.insert(insert_at.min(target_videos.len()), moved);

        let source = mutate::reindex_subfolder(&Subfolder::new(source.name.clone(), source_videos))?;
        let target = mutate::reindex_subfolder(&Subfolder::new(target.name.clone(), target_videos))?;
        let folder = folder
            .with_subfolder_replaced(source)
            .with_subfolder_replaced(target);

        self.store.save_main_folder(&folder)?;
        Ok(folder)
    }
}

fn find_subfolder<'a>(folder: &'a MainFolder, name: &str) -> Result<&'a Subfolder> {
    folder
        .subfolder(name)
        .ok_or_else(|| ShelfError::not_found(folder.path.join(name)))
}
