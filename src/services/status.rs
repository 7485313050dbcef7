use jiff::Zoned;

use crate::models::member::{TeamMember, parse_wall_clock};

/// Whether `now` falls inside the member's working hours, bounds included.
///
/// The bounds are `now` with its hour and minute replaced by the member's,
/// so they are read in the caller's zone (the zone of `now`), not in the
/// member's `location`.
pub fn is_working(member: &TeamMember, now: &Zoned) -> bool {
    let (Some(start), Some(end)) = (
        member.working_hours.start_hour_minute(),
        member.working_hours.end_hour_minute(),
    ) else {
        return false;
    };

    match (at_wall_clock(now, start), at_wall_clock(now, end)) {
        (Some(work_start), Some(work_end)) => {
            now.timestamp() >= work_start.timestamp() && now.timestamp() <= work_end.timestamp()
        }
        _ => false,
    }
}

/// Reads `time` as a wall-clock label on today's date in the caller's zone
/// and renders the same instant as `HH:MM` in `time_zone`. Any failure
/// returns `time` unchanged.
pub fn format_time_in_zone(time: &str, time_zone: &str, now: &Zoned) -> String {
    let converted = parse_wall_clock(time)
        .and_then(|hour_minute| at_wall_clock(now, hour_minute))
        .and_then(|local| match local.in_tz(time_zone) {
            Ok(zoned) => Some(zoned),
            Err(e) => {
                tracing::debug!(time_zone, error = %e, "could not convert time to zone");
                None
            }
        });

    match converted {
        Some(zoned) => zoned.strftime("%H:%M").to_string(),
        None => time.to_string(),
    }
}

fn at_wall_clock(now: &Zoned, (hour, minute): (i8, i8)) -> Option<Zoned> {
    now.with().hour(hour).minute(minute).build().ok()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::member::WorkingHours;

    fn member(start: &str, end: &str) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            name: String::from("Ana"),
            location: String::from("Asia/Tokyo"),
            working_hours: WorkingHours {
                start: start.to_string(),
                end: end.to_string(),
            },
            ..TeamMember::default()
        }
    }

    fn berlin_now() -> Zoned {
        "2026-03-10T10:15:42+01:00[Europe/Berlin]".parse().unwrap()
    }

    #[test]
    fn test_is_working_within_hours() {
        let now = berlin_now();
        assert!(is_working(&member("09:00", "17:00"), &now));
        assert!(!is_working(&member("11:00", "17:00"), &now));
        assert!(!is_working(&member("06:00", "10:00"), &now));
    }

    #[test]
    fn test_is_working_bounds_are_inclusive_at_minute_level() {
        let now = berlin_now();
        assert!(is_working(&member("10:15", "11:00"), &now));
        assert!(is_working(&member("08:00", "10:15"), &now));
        assert!(!is_working(&member("10:16", "11:00"), &now));
    }

    #[test]
    fn test_is_working_uses_callers_zone() {
        // 10:15 in Berlin; a Tokyo member's 09:00-17:00 still reads as Berlin time
        let now = berlin_now();
        let tokyo = member("09:00", "17:00");
        assert!(is_working(&tokyo, &now));

        let now_in_tokyo = now.in_tz("Asia/Tokyo").unwrap();
        assert!(!is_working(&tokyo, &now_in_tokyo));
    }

    #[test]
    fn test_is_working_malformed_hours() {
        assert!(!is_working(&member("nine", "17:00"), &berlin_now()));
    }

    #[test]
    fn test_format_time_in_zone() {
        let now = berlin_now();
        assert_eq!(format_time_in_zone("09:00", "Asia/Tokyo", &now), "17:00");
        assert_eq!(format_time_in_zone("09:00", "Europe/Berlin", &now), "09:00");
        assert_eq!(format_time_in_zone("23:30", "UTC", &now), "22:30");
    }

    #[test]
    fn test_format_time_in_zone_falls_back() {
        let now = berlin_now();
        assert_eq!(format_time_in_zone("09:00", "Mars/Olympus", &now), "09:00");
        assert_eq!(format_time_in_zone("9h", "UTC", &now), "9h");
    }
}
