use std::{fmt, str::FromStr};

use thiserror::Error;

/// A candidate meeting window on today's grid. Derived on every render,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSlot {
    pub start_time: String,
    pub end_time: String,
    /// Names of the members available for the whole window, in collection order
    pub available_members: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MeetingDuration {
    HalfHour,
    #[default]
    OneHour,
    NinetyMinutes,
    TwoHours,
}

impl MeetingDuration {
    pub fn minutes(self) -> i32 {
        match self {
            MeetingDuration::HalfHour => 30,
            MeetingDuration::OneHour => 60,
            MeetingDuration::NinetyMinutes => 90,
            MeetingDuration::TwoHours => 120,
        }
    }
}

impl fmt::Display for MeetingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeetingDuration::HalfHour => "30 minutes",
            MeetingDuration::OneHour => "1 hour",
            MeetingDuration::NinetyMinutes => "1.5 hours",
            MeetingDuration::TwoHours => "2 hours",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported meeting duration '{0}', expected one of 30, 60, 90, 120")]
pub struct InvalidDurationError(pub String);

impl FromStr for MeetingDuration {
    type Err = InvalidDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "30" => Ok(MeetingDuration::HalfHour),
            "60" => Ok(MeetingDuration::OneHour),
            "90" => Ok(MeetingDuration::NinetyMinutes),
            "120" => Ok(MeetingDuration::TwoHours),
            other => Err(InvalidDurationError(other.to_string())),
        }
    }
}
