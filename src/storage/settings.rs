use std::{fs, path::PathBuf};

use crate::{
    models::settings::Settings,
    storage::{SettingsStorage, StorageError, json::write_json_atomically},
};

pub struct JsonSettingsStorage {
    path: PathBuf,
}

impl JsonSettingsStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStorage for JsonSettingsStorage {
    fn load_settings(&self) -> Result<Settings, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: self.path.clone(),
                source: e,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        write_json_atomically(&self.path, settings, || Ok(()))
    }
}
