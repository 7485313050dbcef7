use std::{
    fs::{self, OpenOptions, rename, write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde::Serialize;
use serde_json::to_string_pretty;
use uuid::Uuid;

use crate::{
    models::store::{CURRENT_VERSION, Store},
    storage::{
        Storage, StorageError,
        migrations::{apply_migrations, detect_version},
    },
};

const BACKUPS_TO_KEEP: usize = 5;

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn create_backup_dir(&self) -> Result<(), StorageError> {
        let backups_dir = self.get_backup_dir();
        fs::create_dir(&backups_dir).map_err(|e| StorageError::BackupFailed {
            path: backups_dir,
            source: e,
        })?;
        Ok(())
    }

    fn create_backup(&self) -> Result<u64, StorageError> {
        let file_exists = fs::exists(&self.path).map_err(|e| StorageError::BackupFailed {
            path: self.path.clone(),
            source: e,
        })?;
        if !file_exists {
            return Ok(0);
        }

        let backup_path = self.get_backup_path();
        match fs::copy(&self.path, &backup_path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.create_backup_dir()?;
                self.create_backup()
            }
            Err(e) => Err(StorageError::BackupFailed {
                path: backup_path,
                source: e,
            }),
            Ok(bytes) => {
                tracing::debug!(backup = %backup_path.display(), bytes, "backed up member file");
                Ok(bytes)
            }
        }
    }

    fn cleanup_old_backups(&self) -> Result<(), StorageError> {
        let backup_dir = self.get_backup_dir();
        let backup_dir_exists =
            fs::exists(&backup_dir).map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?;
        if !backup_dir_exists {
            return Ok(());
        }

        let mut file_entries = fs::read_dir(&backup_dir)
            .map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?
            .flatten()
            .filter(|entry| entry.metadata().map(|m| m.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect::<Vec<_>>();

        // Names end in a zero-padded timestamp, so lexical order is age order
        file_entries.sort();

        let number_of_files_to_delete = file_entries.len().saturating_sub(BACKUPS_TO_KEEP);
        for file_path in &file_entries[..number_of_files_to_delete] {
            fs::remove_file(file_path).map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?;
        }

        Ok(())
    }

    fn get_backup_dir(&self) -> PathBuf {
        let parent_store_path = self.path.parent().unwrap_or(Path::new("."));
        parent_store_path.join("backups")
    }

    fn get_backup_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("members");
        let nanos = jiff::Timestamp::now().as_nanosecond();

        self.get_backup_dir().join(format!("{}-{:020}.json", stem, nanos))
    }
}

/// Writes `value` to a unique temp file next to `path`, then renames it
/// over `path` while holding an exclusive lock on `path.lock`.
/// `before_rename` runs under the lock.
pub(crate) fn write_json_atomically<T: Serialize>(
    path: &Path,
    value: &T,
    before_rename: impl FnOnce() -> Result<(), StorageError>,
) -> Result<(), StorageError> {
    let json = to_string_pretty(value).map_err(|e| StorageError::SerializeFailed { source: e })?;

    let temp_path = PathBuf::from(format!("{}.tmp.{}", path.display(), Uuid::new_v4()));
    write(&temp_path, json).map_err(|e| StorageError::SaveFailed {
        path: temp_path.clone(),
        source: e,
    })?;

    let lock_file_path = path.with_extension("lock");
    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_file_path)
        .and_then(|lock_file| lock_file.lock_exclusive().map(|_| lock_file))
        .map_err(|e| StorageError::SaveFailed {
            path: lock_file_path,
            source: e,
        })
        .and_then(|lock_file| {
            before_rename()?;
            rename(&temp_path, path).map_err(|e| StorageError::SaveFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(lock_file)
        });

    let lock_file = match result {
        Ok(lock_file) => lock_file,
        Err(e) => {
            // The lock, if taken, is released when the file handle drops
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    lock_file.unlock().map_err(|e| StorageError::SaveFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Store, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no member file yet, starting empty");
                return Ok(Store::default());
            }
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let mut data: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: self.path.clone(),
                source: e,
            })?;

        let file_version = detect_version(&data)?;
        if file_version > CURRENT_VERSION {
            return Err(StorageError::FutureVersion(file_version));
        }

        if file_version < CURRENT_VERSION {
            data = apply_migrations(data, file_version, CURRENT_VERSION)?;
        }

        if let Some(obj) = data.as_object_mut() {
            obj.insert("version".to_string(), serde_json::json!(CURRENT_VERSION));
        }

        let store: Store = serde_json::from_value(data).map_err(|e| StorageError::ParseFailed {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %self.path.display(), members = store.members.len(), "loaded member file");
        Ok(store)
    }

    fn save(&self, store: &Store) -> Result<(), StorageError> {
        write_json_atomically(&self.path, store, || {
            self.create_backup()?;
            self.cleanup_old_backups()
        })?;
        tracing::debug!(path = %self.path.display(), members = store.members.len(), "saved member file");
        Ok(())
    }
}
