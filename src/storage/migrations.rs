use serde_json::{Value, json};

use crate::storage::StorageError;

type MigrationFn = fn(Value) -> Result<Value, StorageError>;

fn get_migrations() -> Vec<MigrationFn> {
    vec![migrate_v0_to_v1]
}

/// Version 0 is the legacy layout: a bare JSON array of members with no
/// envelope. Any object without a version field is treated as version 1.
pub fn detect_version(data: &Value) -> Result<u32, StorageError> {
    match data {
        Value::Array(_) => Ok(0),
        Value::Object(obj) => match obj.get("version") {
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    StorageError::InvalidLayout(format!("version field is not a valid number: {}", v))
                }),
            None => Ok(1),
        },
        other => Err(StorageError::InvalidLayout(format!(
            "expected an object or an array, found {}",
            kind_of(other)
        ))),
    }
}

/// Migrations are applied sequentially: v0→v1→v2→...→target
pub fn apply_migrations(
    mut data: Value,
    from_version: u32,
    to_version: u32,
) -> Result<Value, StorageError> {
    if from_version == to_version {
        return Ok(data);
    }

    if from_version > to_version {
        return Err(StorageError::FutureVersion(from_version));
    }

    let migrations = get_migrations();

    for version in from_version..to_version {
        let migration_idx = version as usize; // v0→v1 is at index 0

        if migration_idx >= migrations.len() {
            return Err(StorageError::UnsupportedVersion(version));
        }

        tracing::debug!(from = version, to = version + 1, "applying store migration");
        data = migrations[migration_idx](data)?;
    }

    Ok(data)
}

fn migrate_v0_to_v1(value: Value) -> Result<Value, StorageError> {
    match value {
        Value::Array(members) => Ok(json!({ "version": 1, "members": members })),
        other => Err(StorageError::InvalidLayout(format!(
            "legacy member list must be an array, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
