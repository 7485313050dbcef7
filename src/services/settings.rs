use thiserror::Error;

use crate::{
    models::{
        member::{MemberValidationError, validate_location},
        settings::Settings,
    },
    storage::{SettingsStorage, StorageError},
};

#[derive(Debug, Error)]
pub enum SetTimezoneError {
    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct SetTimezoneParameters {
    pub timezone: String,
}

pub fn set_timezone(
    settings: &mut Settings,
    storage: &impl SettingsStorage,
    parameters: SetTimezoneParameters,
) -> Result<Settings, SetTimezoneError> {
    let timezone = validate_location(&parameters.timezone).map_err(|e| match e {
        MemberValidationError::UnknownTimeZone(name) => SetTimezoneError::UnknownTimeZone(name),
        _ => SetTimezoneError::UnknownTimeZone(parameters.timezone.clone()),
    })?;

    settings.timezone = Some(timezone);
    storage.save_settings(settings)?;

    tracing::info!(timezone = ?settings.timezone, "updated time zone preference");
    Ok(settings.clone())
}
