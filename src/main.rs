use std::{path::PathBuf, thread, time::Duration};

use clap::{Parser, Subcommand};
use colored::*;
use jiff::Zoned;
use tracing_subscriber::EnvFilter;

use crate::{
    models::{
        member::{MemberValidationError, ProductivityPeak, TeamMember, parse_wall_clock},
        settings::Settings,
        slot::MeetingDuration,
        store::Store,
    },
    services::{
        calendar::CalendarLinks,
        members::{
            AddMemberError, AddMemberParameters, DeleteMemberError, DeleteMemberParameters,
            UpdateMemberError, UpdateMemberParameters, add_member, delete_member, update_member,
        },
        recommend::recommend_slots,
        settings::{SetTimezoneError, SetTimezoneParameters, set_timezone},
    },
    storage::{
        SettingsStorage, Storage, json::JsonFileStorage, settings::JsonSettingsStorage,
    },
};

mod models;
mod services;
mod storage;
mod ui;

/// How often `dashboard --watch` refreshes the working-hours status
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(
    name = "tzguide",
    about = "Find meeting times that work for a team spread across time zones"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding members.json and settings.json
    #[arg(long, env = "TZGUIDE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the team with live status and meeting recommendations
    Dashboard {
        /// Meeting duration in minutes (30, 60, 90 or 120)
        #[arg(short, long, default_value = "60")]
        duration: MeetingDuration,

        /// Refresh every minute until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// Add a team member
    Add {
        /// Display name
        name: String,

        /// IANA time zone (e.g., "America/New_York", "Asia/Tokyo")
        #[arg(short, long)]
        location: String,

        /// Start of working hours (HH:MM)
        #[arg(short, long, default_value = "09:00")]
        start: String,

        /// End of working hours (HH:MM)
        #[arg(short, long, default_value = "17:00")]
        end: String,

        /// Time of day when this member is most productive
        #[arg(short, long, value_enum, default_value_t = ProductivityPeak::Morning)]
        peak: ProductivityPeak,
    },

    /// Edit a team member
    Edit {
        /// Member id or part of the name
        id_or_name: String,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New IANA time zone
        #[arg(short, long)]
        location: Option<String>,

        /// New start of working hours (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// New end of working hours (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// New productivity peak
        #[arg(short, long, value_enum)]
        peak: Option<ProductivityPeak>,
    },

    /// Delete a team member
    Delete {
        /// Member id or part of the name
        id_or_name: String,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List team members
    List,

    /// Show recommended meeting slots
    Slots {
        /// Meeting duration in minutes (30, 60, 90 or 120)
        #[arg(short, long, default_value = "60")]
        duration: MeetingDuration,
    },

    /// Show calendar and email links for a recommended slot
    Schedule {
        /// Start time of the slot (HH:MM)
        start: String,

        /// Meeting duration in minutes (30, 60, 90 or 120)
        #[arg(short, long, default_value = "60")]
        duration: MeetingDuration,
    },

    /// Manage preferences
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Show current preferences
    Show,
    /// Set the time zone used as local time
    Timezone { name: String },
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

fn current_time(settings: &Settings) -> Zoned {
    Zoned::now().with_time_zone(settings.local_time_zone())
}

fn render_dashboard(store: &Store, settings: &Settings, duration: MeetingDuration) {
    let now = current_time(settings);

    println!(
        "\n  {}  {}",
        "Team Dashboard".cyan().bold(),
        ui::format_current_time(&now).dimmed()
    );
    ui::render_members(&store.members, &now);

    let slots = recommend_slots(&store.members, duration);
    ui::render_slots(&slots, &duration.to_string());
}

fn print_validation_hint(error: &MemberValidationError) {
    match error {
        MemberValidationError::BlankName => {}
        MemberValidationError::InvalidTime(_) => {
            eprintln!("\nExpected format: HH:MM, 24-hour (e.g., 09:00, 17:30)");
        }
        MemberValidationError::UnknownTimeZone(_) => {
            eprintln!("\nUse an IANA time zone name, for example:");
            eprintln!("  America/New_York  Europe/London  Asia/Tokyo  Australia/Sydney");
        }
    }
}

fn print_member_names(store: &Store) {
    if !store.members.is_empty() {
        eprintln!("\nTeam members:");
        for member in &store.members {
            eprintln!("  - {} ({})", member.name, member.id);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tzguide")
    });

    std::fs::create_dir_all(&data_dir).unwrap_or_else(|e| {
        eprintln!("Error: Failed to create data directory: {}", e);
        std::process::exit(1);
    });
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let storage = JsonFileStorage::new(data_dir.join("members.json"));
    let settings_storage = JsonSettingsStorage::new(data_dir.join("settings.json"));

    let mut store = match storage.load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load team members: {}", e);
            std::process::exit(1);
        }
    };

    let mut settings = match settings_storage.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Dashboard { duration, watch }) => {
            render_dashboard(&store, &settings, duration);

            if watch {
                loop {
                    thread::sleep(REFRESH_INTERVAL);
                    tracing::trace!("refreshing dashboard");
                    // Clear the screen and move the cursor home before redrawing
                    print!("\x1B[2J\x1B[H");
                    render_dashboard(&store, &settings, duration);
                }
            }
        }
        Some(Commands::Add {
            name,
            location,
            start,
            end,
            peak,
        }) => {
            let params = AddMemberParameters {
                name,
                location,
                start,
                end,
                productivity_peak: peak,
            };

            match add_member(&mut store, &storage, params) {
                Ok(member) => {
                    println!("✓ Team member added: {}", member.name);
                    println!(
                        "  {} · {} · {}",
                        member.location, member.working_hours, member.productivity_peak
                    );
                    println!("  {}", member.id.to_string().dimmed());
                    if member.working_hours.is_inverted() {
                        println!(
                            "  {}",
                            "Working hours end before they start; this member will never be available."
                                .yellow()
                        );
                    }
                }
                Err(AddMemberError::Invalid(e)) => {
                    eprintln!("Error: {}", e);
                    print_validation_hint(&e);
                    std::process::exit(1);
                }
                Err(AddMemberError::Storage(e)) => {
                    eprintln!("Error: Failed to save team member: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Edit {
            id_or_name,
            name,
            location,
            start,
            end,
            peak,
        }) => {
            let params = UpdateMemberParameters {
                id_or_name,
                name,
                location,
                start,
                end,
                productivity_peak: peak,
            };

            match update_member(&mut store, &storage, params) {
                Ok(member) => {
                    println!("✓ Team member updated: {}", member.name);
                    println!(
                        "  {} · {} · {}",
                        member.location, member.working_hours, member.productivity_peak
                    );
                }
                Err(UpdateMemberError::MemberNotFound(identifier)) => {
                    eprintln!("Error: Team member '{}' not found", identifier);
                    print_member_names(&store);
                    std::process::exit(1);
                }
                Err(UpdateMemberError::AmbiguousMemberName(names)) => {
                    eprintln!("Error: Member name is ambiguous. Multiple members found:");
                    for name in names {
                        eprintln!("  - {}", name);
                    }
                    eprintln!("\nPlease be more specific or use the member id.");
                    std::process::exit(1);
                }
                Err(UpdateMemberError::Invalid(e)) => {
                    eprintln!("Error: {}", e);
                    print_validation_hint(&e);
                    std::process::exit(1);
                }
                Err(UpdateMemberError::Storage(e)) => {
                    eprintln!("Error: Failed to save team member: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Delete { id_or_name, yes }) => {
            let params = DeleteMemberParameters { id_or_name };
            let confirm = |member: &TeamMember| {
                yes || ui::confirm(&format!("Delete team member '{}'?", member.name))
            };

            match delete_member(&mut store, &storage, params, confirm) {
                Ok(member) => {
                    println!("✓ Team member deleted: {}", member.name);
                }
                Err(DeleteMemberError::MemberNotFound(identifier)) => {
                    eprintln!("Error: Team member '{}' not found", identifier);
                    print_member_names(&store);
                    std::process::exit(1);
                }
                Err(DeleteMemberError::AmbiguousMemberName(names)) => {
                    eprintln!("Error: Member name is ambiguous. Multiple members found:");
                    for name in names {
                        eprintln!("  - {}", name);
                    }
                    eprintln!("\nPlease be more specific or use the member id.");
                    std::process::exit(1);
                }
                Err(DeleteMemberError::NotConfirmed(name)) => {
                    println!("Kept team member: {}", name);
                }
                Err(DeleteMemberError::Storage(e)) => {
                    eprintln!("Error: Failed to delete team member: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::List) => {
            let now = current_time(&settings);
            ui::render_members(&store.members, &now);
        }
        Some(Commands::Slots { duration }) => {
            let slots = recommend_slots(&store.members, duration);
            ui::render_slots(&slots, &duration.to_string());
        }
        Some(Commands::Schedule { start, duration }) => {
            if parse_wall_clock(&start).is_none() {
                eprintln!("Error: Invalid start time '{}'", start);
                eprintln!("\nExpected format: HH:MM, 24-hour (e.g., 09:30)");
                std::process::exit(1);
            }

            let slots = recommend_slots(&store.members, duration);
            match slots.iter().find(|s| s.start_time == start) {
                Some(slot) => {
                    let today = current_time(&settings).date();
                    let links = CalendarLinks::for_slot(slot, today);
                    ui::render_links(slot, &links);
                }
                None => {
                    eprintln!(
                        "Error: {} is not a recommended start time for a {} meeting",
                        start, duration
                    );
                    if slots.is_empty() {
                        eprintln!("\nNo suitable meeting times found for the selected duration.");
                    } else {
                        eprintln!("\nRecommended start times:");
                        for slot in &slots {
                            eprintln!("  - {} - {}", slot.start_time, slot.end_time);
                        }
                    }
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Settings(SettingsCommands::Show)) => {
            let now = current_time(&settings);
            println!("\n  {}\n", "SETTINGS".cyan());
            println!(
                "  {} {}",
                "Time zone:".dimmed(),
                settings
                    .timezone
                    .as_deref()
                    .unwrap_or("system default")
                    .bold()
            );
            println!(
                "  {} {}",
                "Current time:".dimmed(),
                ui::format_current_time(&now)
            );
            println!("  {} {}", "Data directory:".dimmed(), data_dir.display());
        }
        Some(Commands::Settings(SettingsCommands::Timezone { name })) => {
            let params = SetTimezoneParameters { timezone: name };

            match set_timezone(&mut settings, &settings_storage, params) {
                Ok(updated) => {
                    let now = current_time(&updated);
                    println!(
                        "✓ Time zone set to {}",
                        updated.timezone.as_deref().unwrap_or_default()
                    );
                    println!("  Current time: {}", ui::format_current_time(&now));
                }
                Err(SetTimezoneError::UnknownTimeZone(name)) => {
                    eprintln!("Error: Unknown time zone '{}'", name);
                    print_validation_hint(&MemberValidationError::UnknownTimeZone(name));
                    std::process::exit(1);
                }
                Err(SetTimezoneError::Storage(e)) => {
                    eprintln!("Error: Failed to save settings: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            // Default: show the dashboard with a one-hour meeting
            render_dashboard(&store, &settings, MeetingDuration::default());
        }
    }
}
