use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// UUID assigned when the member is added, never changed afterwards
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// IANA time zone identifier (e.g. "Europe/Paris")
    pub location: String,
    /// Local daily availability window
    pub working_hours: WorkingHours,
    /// Preferred time of day, informational only
    pub productivity_peak: ProductivityPeak,
}

/// Wall-clock window stored as zero-padded `HH:MM` strings.
///
/// `start < end` is expected but not enforced: an inverted window just never
/// contains any slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: String::from("09:00"),
            end: String::from("17:00"),
        }
    }
}

impl WorkingHours {
    pub fn start_hour_minute(&self) -> Option<(i8, i8)> {
        parse_wall_clock(&self.start)
    }

    pub fn end_hour_minute(&self) -> Option<(i8, i8)> {
        parse_wall_clock(&self.end)
    }

    pub fn is_inverted(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[derive(
    Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityPeak {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for ProductivityPeak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProductivityPeak::Morning => "Morning",
            ProductivityPeak::Afternoon => "Afternoon",
            ProductivityPeak::Evening => "Evening",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberValidationError {
    #[error("Member name cannot be blank")]
    BlankName,

    #[error("Invalid time '{0}', expected HH:MM (24-hour)")]
    InvalidTime(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

/// Parses a strict zero-padded `HH:MM` 24-hour label.
pub fn parse_wall_clock(value: &str) -> Option<(i8, i8)> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return None;
    }

    let hour: i8 = value[..2].parse().ok()?;
    let minute: i8 = value[3..].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

pub fn validate_name(name: &str) -> Result<String, MemberValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MemberValidationError::BlankName);
    }
    Ok(trimmed.to_string())
}

pub fn validate_time(value: &str) -> Result<String, MemberValidationError> {
    parse_wall_clock(value)
        .map(|_| value.to_string())
        .ok_or_else(|| MemberValidationError::InvalidTime(value.to_string()))
}

pub fn validate_location(location: &str) -> Result<String, MemberValidationError> {
    jiff::tz::TimeZone::get(location)
        .map(|_| location.to_string())
        .map_err(|_| MemberValidationError::UnknownTimeZone(location.to_string()))
}

impl TeamMember {
    /// Builds a new member from raw form input, generating its id.
    pub fn from_input(
        name: &str,
        location: &str,
        start: &str,
        end: &str,
        productivity_peak: ProductivityPeak,
    ) -> Result<TeamMember, MemberValidationError> {
        Ok(TeamMember {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            location: validate_location(location)?,
            working_hours: WorkingHours {
                start: validate_time(start)?,
                end: validate_time(end)?,
            },
            productivity_peak,
        })
    }
}
