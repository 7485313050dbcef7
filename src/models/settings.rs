use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// Preferences stored apart from the member collection.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Preferred IANA zone used as "local time" for status checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Settings {
    /// The zone the user is looking at the dashboard from. Falls back to the
    /// system zone when no preference is stored or it no longer resolves.
    pub fn local_time_zone(&self) -> TimeZone {
        match &self.timezone {
            Some(name) => TimeZone::get(name).unwrap_or_else(|e| {
                tracing::warn!(timezone = %name, error = %e, "stored time zone does not resolve, using system zone");
                TimeZone::system()
            }),
            None => TimeZone::system(),
        }
    }
}
