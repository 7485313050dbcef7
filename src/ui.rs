use std::io::{self, BufRead, Write};

use colored::*;
use jiff::Zoned;

use crate::{
    models::{member::TeamMember, slot::MeetingSlot},
    services::{
        calendar::CalendarLinks,
        status::{format_time_in_zone, is_working},
    },
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, singular: &str, plural_noun: &str) {
    println!(
        "\n  {} ({})\n",
        title.cyan().bold(),
        plural(count, singular, plural_noun)
    );
}

/// Render a section header (e.g., "Meeting Time Recommendations")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Status badge shown next to each member
pub fn get_status_badge(member: &TeamMember, now: &Zoned) -> ColoredString {
    if is_working(member, now) {
        "● Working".green()
    } else {
        "○ Off Hours".dimmed()
    }
}

/// Working hours as seen in the member's own zone
pub fn format_member_hours(member: &TeamMember, now: &Zoned) -> String {
    format!(
        "{} - {}",
        format_time_in_zone(&member.working_hours.start, &member.location, now),
        format_time_in_zone(&member.working_hours.end, &member.location, now)
    )
}

/// Render one member per block: name and status, then zone, hours and peak
pub fn render_member(member: &TeamMember, now: &Zoned) {
    println!(
        "  {} {}  {}",
        "•".green(),
        member.name.bold(),
        get_status_badge(member, now)
    );
    println!(
        "    {} {}  {} {}  {} {}",
        "Location:".dimmed(),
        member.location.blue(),
        "Hours:".dimmed(),
        format_member_hours(member, now),
        "Peak:".dimmed(),
        member.productivity_peak
    );
    println!("    {}", member.id.to_string().dimmed());
    println!();
}

pub fn render_members(members: &[TeamMember], now: &Zoned) {
    if members.is_empty() {
        println!("  No team members yet. Add one with `tzguide add`.");
        return;
    }

    render_view_header("TEAM", members.len(), "member", "members");
    for member in members {
        render_member(member, now);
    }
}

/// Render a slot line with its window and right-aligned attendee names
pub fn render_slot_line(slot: &MeetingSlot) {
    let terminal_width = get_terminal_width();

    let window = format!("{} - {}", slot.start_time, slot.end_time);
    let count = plural(
        slot.available_members.len(),
        "team member available",
        "team members available",
    );
    let left_visible = format!("  {}  {}", window, count);
    let names = slot.available_members.join(", ");

    let styled_left = format!("  {}  {}", window.bold(), count.dimmed());
    let total_content = left_visible.chars().count() + names.chars().count();

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), names.dimmed());
    } else {
        // Not enough space for right alignment, put names below
        println!("{}", styled_left);
        println!("      {}", names.dimmed());
    }
}

pub fn render_slots(slots: &[MeetingSlot], duration_label: &str) {
    render_section_header(&format!("Meeting Time Recommendations ({})", duration_label));

    if slots.is_empty() {
        println!("  No suitable meeting times found for the selected duration.");
        return;
    }

    for slot in slots {
        render_slot_line(slot);
    }
    println!();
    println!(
        "  {}",
        "Use `tzguide schedule <HH:MM>` to get calendar and email links.".dimmed()
    );
}

pub fn render_links(slot: &MeetingSlot, links: &CalendarLinks) {
    println!(
        "\n  {} {} - {}\n",
        "Schedule Meeting".cyan().bold(),
        slot.start_time,
        slot.end_time
    );
    println!("  {}", "Add to Google Calendar".bold());
    println!("    {}\n", links.google);
    println!("  {}", "Add to Outlook Calendar".bold());
    println!("    {}\n", links.outlook);
    println!("  {}", "Send Email Invitation".bold());
    println!("    {}\n", links.email);
}

/// Format the current time for display (e.g., "2026-03-10 10:15:42 CET")
pub fn format_current_time(now: &Zoned) -> String {
    now.strftime("%Y-%m-%d %H:%M:%S %Z").to_string()
}

/// Ask a yes/no question on stdout and read the answer from stdin.
/// Anything other than "y" or "yes" counts as no, including read errors.
pub fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
