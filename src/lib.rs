//! Local video library browser core
//!
//! Scans a main folder one level deep for videos and keeps playback position
//! and ordering in the filenames themselves. A persisted snapshot of the
//! folder is reconciled against the filesystem on every load.

pub mod codec;
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod mutate;
pub mod playback;
pub mod reconcile;
pub mod scanner;
pub mod store;

pub use config::ShelfConfig;
pub use error::{Result, ShelfError, ShelfErrorKind};
pub use library::Library;
pub use models::{MainFolder, Subfolder, Video};
pub use mutate::{move_between_folders, rename_with_position, update_index};
pub use playback::{PlaybackSession, SeekCallback};
pub use reconcile::reconcile;
pub use scanner::scan;
pub use store::ConfigStore;
