use jiff::civil::Date;
use urlencoding::encode;

use crate::models::slot::MeetingSlot;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";
const OUTLOOK_COMPOSE_URL: &str = "https://outlook.office.com/calendar/0/deeplink/compose";
const EVENT_TITLE: &str = "Team Meeting";
const INVITATION_SUBJECT: &str = "Team Meeting Invitation";

/// The three export links offered for a recommended slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLinks {
    pub google: String,
    pub outlook: String,
    pub email: String,
}

impl CalendarLinks {
    pub fn for_slot(slot: &MeetingSlot, today: Date) -> Self {
        let attendees = &slot.available_members;
        Self {
            google: google_calendar_link(&slot.start_time, &slot.end_time, attendees, today),
            outlook: outlook_link(&slot.start_time, &slot.end_time, attendees, today),
            email: email_link(&slot.start_time, &slot.end_time, attendees),
        }
    }
}

fn event_details(attendees: &[String]) -> String {
    format!("Team meeting with: {}", attendees.join(", "))
}

/// Google "create event" template. The date range is
/// `YYYYMMDDTHHMMSS/YYYYMMDDTHHMMSS` on `today`.
pub fn google_calendar_link(
    start_time: &str,
    end_time: &str,
    attendees: &[String],
    today: Date,
) -> String {
    let dates = format!("{today}T{start_time}:00/{today}T{end_time}:00").replace(['-', ':'], "");

    format!(
        "{}&text={}&details={}&dates={}",
        GOOGLE_CALENDAR_URL,
        encode(EVENT_TITLE),
        encode(&event_details(attendees)),
        dates
    )
}

pub fn outlook_link(start_time: &str, end_time: &str, attendees: &[String], today: Date) -> String {
    format!(
        "{}?subject={}&body={}&startdt={today}T{start_time}&enddt={today}T{end_time}",
        OUTLOOK_COMPOSE_URL,
        encode(EVENT_TITLE),
        encode(&event_details(attendees)),
    )
}

pub fn email_link(start_time: &str, end_time: &str, attendees: &[String]) -> String {
    let body = format!(
        "\nHello,\n\nI'd like to schedule a team meeting for {} - {}.\n\nAttendees:\n{}\n\nPlease let me know if this time works for you.\n\nBest regards",
        start_time,
        end_time,
        attendees.join("\n")
    );

    format!(
        "mailto:?subject={}&body={}",
        encode(INVITATION_SUBJECT),
        encode(&body)
    )
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn attendees() -> Vec<String> {
        vec![String::from("Ana"), String::from("Ben")]
    }

    #[test]
    fn test_google_calendar_link() {
        let link = google_calendar_link("09:30", "10:30", &attendees(), date(2026, 3, 10));
        assert_eq!(
            link,
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &text=Team%20Meeting\
             &details=Team%20meeting%20with%3A%20Ana%2C%20Ben\
             &dates=20260310T093000/20260310T103000"
        );
    }

    #[test]
    fn test_outlook_link_keeps_separators() {
        let link = outlook_link("14:00", "15:00", &attendees(), date(2026, 3, 10));
        assert_eq!(
            link,
            "https://outlook.office.com/calendar/0/deeplink/compose\
             ?subject=Team%20Meeting\
             &body=Team%20meeting%20with%3A%20Ana%2C%20Ben\
             &startdt=2026-03-10T14:00&enddt=2026-03-10T15:00"
        );
    }

    #[test]
    fn test_email_link_lists_attendees_one_per_line() {
        let link = email_link("09:00", "10:00", &attendees());
        let (subject, body) = link
            .strip_prefix("mailto:?subject=")
            .and_then(|rest| rest.split_once("&body="))
            .unwrap();

        assert_eq!(subject, "Team%20Meeting%20Invitation");
        let body = urlencoding::decode(body).unwrap();
        assert!(body.contains("a team meeting for 09:00 - 10:00."));
        assert!(body.contains("Attendees:\nAna\nBen\n\n"));
        assert!(body.ends_with("Best regards"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_links_for_slot() {
        let slot = MeetingSlot {
            start_time: String::from("11:00"),
            end_time: String::from("11:30"),
            available_members: attendees(),
        };
        let links = CalendarLinks::for_slot(&slot, date(2026, 1, 2));

        assert!(links.google.ends_with("&dates=20260102T110000/20260102T113000"));
        assert!(links.outlook.ends_with("&startdt=2026-01-02T11:00&enddt=2026-01-02T11:30"));
        assert!(links.email.starts_with("mailto:?subject="));
    }
}
