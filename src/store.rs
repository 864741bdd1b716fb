//! Key-value store for persisted library state

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::MainFolder;

/// Key holding the last opened main folder
pub const MAIN_FOLDER_KEY: &str = "mainFolder";

/// SQLite backed key-value store with JSON values
pub struct ConfigStore {
    conn: Connection,
}

impl ConfigStore {
    /// Open or create the store
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        debug!("Opened store at {:?}", path);
        Ok(store)
    }

    /// Open in-memory store (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Raw JSON text stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Store raw JSON text under `key`, replacing any previous value
    pub fn set_raw(&mut self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Decode the value stored under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Encode and store `value` under `key`
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json)
    }

    /// Remove `key`; returns whether it existed
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(removed > 0)
    }

    /// When `key` was last written
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let stamp: Option<String> = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        // Unparseable stamps are treated as unknown
        Ok(stamp
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc)))
    }

    pub fn load_main_folder(&self) -> Result<Option<MainFolder>> {
        self.get(MAIN_FOLDER_KEY)
    }

    pub fn save_main_folder(&mut self, folder: &MainFolder) -> Result<()> {
        self.set(MAIN_FOLDER_KEY, folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfErrorKind;
    use crate::models::{Subfolder, Video};
    use std::path::PathBuf;

    #[test]
    fn test_raw_values() {
        let mut store = ConfigStore::open_memory().unwrap();
        assert_eq!(store.get_raw("k").unwrap(), None);
        assert!(store.updated_at("k").unwrap().is_none());

        store.set_raw("k", "1").unwrap();
        store.set_raw("k", "2").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("2"));
        assert!(store.updated_at("k").unwrap().is_some());

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn test_main_folder_round_trip() {
        let mut store = ConfigStore::open_memory().unwrap();
        assert!(store.load_main_folder().unwrap().is_none());

        let folder = MainFolder {
            path: PathBuf::from("/lib"),
            videos_seq: vec![Video::from_path(PathBuf::from("/lib/00:10 a.mp4"))],
            subfolders_with_videos: vec![Subfolder::new(
                "s",
                vec![Video::from_path(PathBuf::from("/lib/s/b.mp4")).with_position(Some(7))],
            )],
            sub_subfolder_names: Vec::new(),
        };
        store.save_main_folder(&folder).unwrap();
        assert_eq!(store.load_main_folder().unwrap(), Some(folder));

        let raw = store.get_raw(MAIN_FOLDER_KEY).unwrap().unwrap();
        assert!(raw.contains("\"subfoldersWithVideos\""));
    }

    #[test]
    fn test_corrupt_value() {
        let mut store = ConfigStore::open_memory().unwrap();
        store.set_raw(MAIN_FOLDER_KEY, "not json").unwrap();
        let err = store.load_main_folder().unwrap_err();
        assert_eq!(err.kind, ShelfErrorKind::SerializationError);
    }

    #[test]
    fn test_open_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shelf.db");
        {
            let mut store = ConfigStore::open(&path).unwrap();
            store.set(MAIN_FOLDER_KEY, &MainFolder::new("/lib")).unwrap();
        }
        let store = ConfigStore::open(&path).unwrap();
        assert_eq!(store.load_main_folder().unwrap(), Some(MainFolder::new("/lib")));
    }
}
