use std::path::PathBuf;

use thiserror::Error;

use crate::models::{settings::Settings, store::Store};

pub mod json;
pub mod migrations;
pub mod settings;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create backup at '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to cleanup old backups in '{dir}': {source}")]
    CleanupFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Member file has an invalid layout: {0}")]
    InvalidLayout(String),

    #[error(
        "Member file was created by a newer version of tzguide (version {0}). Please upgrade tzguide to open this file."
    )]
    FutureVersion(u32),

    #[error("Member file has unsupported version {0}. This version of tzguide cannot read this file.")]
    UnsupportedVersion(u32),
}

/// Repository for the member collection. Every mutation saves the whole store.
pub trait Storage {
    fn load(&self) -> Result<Store, StorageError>;
    fn save(&self, store: &Store) -> Result<(), StorageError>;
}

/// Independent key for user preferences.
pub trait SettingsStorage {
    fn load_settings(&self) -> Result<Settings, StorageError>;
    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;
}
