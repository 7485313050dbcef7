use crate::models::{
    member::TeamMember,
    slot::{MeetingDuration, MeetingSlot},
};

/// First candidate start, in minutes after midnight (09:00)
const GRID_START: i32 = 9 * 60;
/// Candidates start strictly before this (17:00)
const GRID_END: i32 = 17 * 60;
const GRID_STEP: i32 = 30;

/// Lists every grid slot for which strictly more than half of the members
/// are available, in ascending start order.
///
/// Availability compares the slot's `HH:MM` labels directly against each
/// member's own working-hours labels. Members' time zones are not taken
/// into account.
pub fn recommend_slots(members: &[TeamMember], duration: MeetingDuration) -> Vec<MeetingSlot> {
    if members.is_empty() {
        return vec![];
    }

    (GRID_START..GRID_END)
        .step_by(GRID_STEP as usize)
        .filter_map(|start| {
            let start_time = format_minutes(start);
            let end_time = end_time_after(start, duration);

            let available_members: Vec<String> = members
                .iter()
                .filter(|m| is_available(m, &start_time, &end_time))
                .map(|m| m.name.clone())
                .collect();

            has_majority(available_members.len(), members.len()).then(|| MeetingSlot {
                start_time,
                end_time,
                available_members,
            })
        })
        .collect()
}

pub fn is_available(member: &TeamMember, start_time: &str, end_time: &str) -> bool {
    start_time >= member.working_hours.start.as_str()
        && end_time <= member.working_hours.end.as_str()
}

fn has_majority(available: usize, total: usize) -> bool {
    available * 2 > total
}

fn format_minutes(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The end label rolls over into the next hour at most once: the minute is
/// `(minute + duration) % 60` and the hour advances by one when that sum
/// reaches 60.
fn end_time_after(start: i32, duration: MeetingDuration) -> String {
    let (hour, minute) = (start / 60, start % 60);
    let rolled = minute + duration.minutes();
    let end_hour = if rolled >= 60 { hour + 1 } else { hour };
    format!("{:02}:{:02}", end_hour, rolled % 60)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::models::member::{TeamMember, WorkingHours};

    fn member(name: &str, start: &str, end: &str) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: String::from("UTC"),
            working_hours: WorkingHours {
                start: start.to_string(),
                end: end.to_string(),
            },
            ..TeamMember::default()
        }
    }

    fn find<'a>(slots: &'a [MeetingSlot], start: &str) -> Option<&'a MeetingSlot> {
        slots.iter().find(|s| s.start_time == start)
    }

    #[rstest]
    #[case(MeetingDuration::HalfHour)]
    #[case(MeetingDuration::OneHour)]
    #[case(MeetingDuration::NinetyMinutes)]
    #[case(MeetingDuration::TwoHours)]
    fn test_no_members_no_slots(#[case] duration: MeetingDuration) {
        assert!(recommend_slots(&[], duration).is_empty());
    }

    #[rstest]
    #[case(MeetingDuration::HalfHour, 16)]
    #[case(MeetingDuration::OneHour, 15)]
    #[case(MeetingDuration::NinetyMinutes, 15)]
    #[case(MeetingDuration::TwoHours, 15)]
    fn test_slots_stay_on_grid(#[case] duration: MeetingDuration, #[case] expected: usize) {
        let members = [member("Ana", "00:00", "23:59")];
        let starts: Vec<_> = recommend_slots(&members, duration)
            .into_iter()
            .map(|s| s.start_time)
            .collect();

        assert_eq!(
            starts,
            vec![
                "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00",
                "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
            ]
        );

        // With a 09:00-17:00 day the slot must also end by 17:00
        let office = [member("Ben", "09:00", "17:00")];
        assert_eq!(recommend_slots(&office, duration).len(), expected);
    }

    #[rstest]
    #[case(MeetingDuration::HalfHour, "09:00", "09:30")]
    #[case(MeetingDuration::HalfHour, "16:30", "17:00")]
    #[case(MeetingDuration::OneHour, "09:30", "10:30")]
    #[case(MeetingDuration::NinetyMinutes, "09:00", "10:30")]
    #[case(MeetingDuration::NinetyMinutes, "15:30", "16:00")]
    #[case(MeetingDuration::NinetyMinutes, "16:30", "17:00")]
    #[case(MeetingDuration::TwoHours, "09:00", "10:00")]
    #[case(MeetingDuration::TwoHours, "09:30", "10:30")]
    #[case(MeetingDuration::TwoHours, "16:30", "17:30")]
    fn test_end_time_rolls_over_one_hour(
        #[case] duration: MeetingDuration,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        let members = [member("Ana", "00:00", "23:59")];
        let slots = recommend_slots(&members, duration);
        assert_eq!(find(&slots, start).unwrap().end_time, end);
    }

    #[test]
    fn test_office_day_two_hour_slots() {
        let office = [member("Ben", "09:00", "17:00")];
        let slots = recommend_slots(&office, MeetingDuration::TwoHours);

        let last = find(&slots, "16:00").unwrap();
        assert_eq!(last.end_time, "17:00");
        assert!(find(&slots, "15:30").is_some());
        // 16:30 ends at 17:30
        assert!(find(&slots, "16:30").is_none());
    }

    #[test]
    fn test_two_members_tie_does_not_qualify() {
        let members = [member("Ana", "09:00", "17:00"), member("Ben", "09:00", "12:00")];
        let slots = recommend_slots(&members, MeetingDuration::OneHour);

        let morning = find(&slots, "09:00").unwrap();
        assert_eq!(morning.available_members, vec!["Ana", "Ben"]);
        assert!(find(&slots, "11:00").is_some());
        assert!(find(&slots, "11:30").is_none());
        assert!(find(&slots, "14:00").is_none());
    }

    #[test]
    fn test_three_member_majority() {
        let members = [
            member("A", "09:00", "17:00"),
            member("B", "09:00", "12:00"),
            member("C", "13:00", "17:00"),
        ];
        let slots = recommend_slots(&members, MeetingDuration::OneHour);

        let nine = find(&slots, "09:00").unwrap();
        assert_eq!(nine.end_time, "10:00");
        assert_eq!(nine.available_members, vec!["A", "B"]);

        let two = find(&slots, "14:00").unwrap();
        assert_eq!(two.end_time, "15:00");
        assert_eq!(two.available_members, vec!["A", "C"]);

        // 12:30-13:30 only fits A's window
        assert!(find(&slots, "12:30").is_none());
        assert!(find(&slots, "12:00").is_none());
        assert!(find(&slots, "11:00").is_some());
        assert!(find(&slots, "13:00").is_some());
    }

    #[test]
    fn test_every_slot_has_strict_majority() {
        let members = [
            member("A", "08:00", "12:00"),
            member("B", "10:00", "15:00"),
            member("C", "11:30", "18:00"),
            member("D", "13:00", "17:00"),
        ];
        for duration in [
            MeetingDuration::HalfHour,
            MeetingDuration::OneHour,
            MeetingDuration::NinetyMinutes,
            MeetingDuration::TwoHours,
        ] {
            let slots = recommend_slots(&members, duration);
            for slot in &slots {
                assert!(slot.available_members.len() * 2 > members.len());
            }
            let starts: Vec<_> = slots.iter().map(|s| s.start_time.clone()).collect();
            let mut sorted = starts.clone();
            sorted.sort();
            assert_eq!(starts, sorted);
        }
    }

    #[test]
    fn test_zones_are_ignored() {
        let mut tokyo = member("Kenji", "09:00", "17:00");
        tokyo.location = String::from("Asia/Tokyo");
        let mut paris = member("Lea", "09:00", "17:00");
        paris.location = String::from("Europe/Paris");

        let slots = recommend_slots(&[tokyo, paris], MeetingDuration::OneHour);
        assert_eq!(slots.len(), 15);
    }

    #[test]
    fn test_inverted_hours_never_available() {
        let night = member("Owl", "22:00", "06:00");
        assert!(!is_available(&night, "09:00", "10:00"));
        assert!(recommend_slots(&[night], MeetingDuration::HalfHour).is_empty());
    }
}
