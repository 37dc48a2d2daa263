//! Notification preference CLI commands.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use motivator_core::config::AppConfig;
use motivator_core::error::AppError;
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::device::{DeviceInfo, Platform};
use motivator_core::types::id::{DeviceId, UserId};
use motivator_entity::notification::{
    NotificationPreference, PreferenceDocument, TimeOfDay, TimeSlot,
};
use motivator_service::{NotificationPreferenceManager, SessionContext, next_eligible_at};

/// Arguments for preference commands
#[derive(Debug, Args)]
pub struct PrefsArgs {
    /// Preference subcommand
    #[command(subcommand)]
    pub command: PrefsCommand,
}

/// The session a write is performed on behalf of
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// User ID
    #[arg(short, long)]
    pub user: UserId,
    /// Device ID to register for push
    #[arg(short, long, default_value = "cli")]
    pub device: DeviceId,
    /// Device platform (ios, android, web)
    #[arg(short, long, default_value = "ios")]
    pub platform: Platform,
    /// Treat the device as a simulator or emulator
    #[arg(long)]
    pub emulator: bool,
    /// IANA timezone of the device
    #[arg(long)]
    pub tz: Option<String>,
}

/// Preference subcommands
#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// List every stored preference
    List,
    /// Show one user's preference
    Show {
        /// User ID
        #[arg(short, long)]
        user: UserId,
    },
    /// Replace a user's preference
    Set {
        #[command(flatten)]
        session: SessionArgs,
        /// Enable delivery (requires a push registration)
        #[arg(long)]
        enable: bool,
        /// Window start, HH:MM
        #[arg(long)]
        start: Option<String>,
        /// Window end, HH:MM
        #[arg(long)]
        end: Option<String>,
        /// Active days, comma separated (e.g. monday,friday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        /// Active time slots, comma separated (e.g. morning,evening)
        #[arg(long, value_delimiter = ',')]
        slots: Vec<String>,
    },
    /// Turn notifications off, keeping the schedule
    Disable {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Remove a user's stored preference
    Delete {
        /// User ID
        #[arg(short, long)]
        user: UserId,
    },
    /// Check whether a notification may fire
    Check {
        /// User ID
        #[arg(short, long)]
        user: UserId,
        /// IANA timezone used for the local clock
        #[arg(long)]
        tz: Option<String>,
        /// Instant to evaluate, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Find the next instant a notification may fire
    Next {
        /// User ID
        #[arg(short, long)]
        user: UserId,
        /// IANA timezone used for the local clock
        #[arg(long)]
        tz: Option<String>,
        /// Search start, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

/// Preference display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PreferenceRow {
    /// User ID
    user: String,
    /// Master switch
    enabled: bool,
    /// Active window
    window: String,
    /// Active days
    days: String,
    /// Active time slots
    slots: String,
}

impl PreferenceRow {
    fn new(user_id: &UserId, pref: &NotificationPreference) -> Self {
        Self {
            user: user_id.to_string(),
            enabled: pref.enabled,
            window: pref.active_window.to_string(),
            days: join(pref.active_days.iter().map(|d| d.as_str())),
            slots: join(pref.active_time_slots.iter().map(|s| s.as_str())),
        }
    }
}

/// Eligibility check result
#[derive(Debug, Serialize)]
struct EligibilityReport {
    user: String,
    instant: DateTime<Utc>,
    timezone: String,
    local_time: String,
    time_slot: TimeSlot,
    eligible: bool,
}

/// Execute preference commands
pub async fn execute(
    args: &PrefsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let (manager, store) = super::create_manager(&config).await?;

    match &args.command {
        PrefsCommand::List => {
            let users = store.list_users().await?;
            let mut rows = Vec::with_capacity(users.len());
            for user_id in &users {
                let pref = manager.load(user_id).await?;
                rows.push(PreferenceRow::new(user_id, &pref));
            }
            output::print_list(&rows, format);
        }
        PrefsCommand::Show { user } => {
            let pref = manager.load(user).await?;
            print_preference(user, &pref, format);
        }
        PrefsCommand::Set {
            session,
            enable,
            start,
            end,
            days,
            slots,
        } => {
            let ctx = session_context(session, &config)?;
            let document = PreferenceDocument {
                enabled: *enable,
                start_time: start.clone(),
                end_time: end.clone(),
                days: days.clone(),
                time_slots: slots.clone(),
            };
            let saved = manager.save_document(&ctx, document).await?;
            output::print_success(&format!("Preference saved for '{}'", ctx.user_id));
            print_preference(&ctx.user_id, &saved, format);
        }
        PrefsCommand::Disable { session } => {
            let ctx = session_context(session, &config)?;
            let saved = manager.disable(&ctx).await?;
            output::print_success(&format!("Notifications disabled for '{}'", ctx.user_id));
            print_preference(&ctx.user_id, &saved, format);
        }
        PrefsCommand::Delete { user } => {
            if store.delete(user).await? {
                output::print_success(&format!("Preference for '{}' deleted", user));
            } else {
                output::print_warning(&format!("No stored preference for '{}'", user));
            }
        }
        PrefsCommand::Check { user, tz, at } => {
            let pref = manager.load(user).await?;
            let timezone = resolve_timezone(tz.as_deref(), &config)?;
            let instant = at.unwrap_or_else(Utc::now);
            let local = TimeOfDay::from_naive(instant.with_timezone(&timezone).time());

            let report = EligibilityReport {
                user: user.to_string(),
                instant,
                timezone: timezone.name().to_string(),
                local_time: local.to_string(),
                time_slot: TimeSlot::containing(local),
                eligible: NotificationPreferenceManager::is_eligible_at(&pref, instant, timezone),
            };

            match format {
                OutputFormat::Json => output::print_item(&report, format),
                OutputFormat::Table => {
                    output::print_kv("User", &report.user);
                    output::print_kv("Instant", &report.instant.to_rfc3339());
                    output::print_kv("Timezone", &report.timezone);
                    output::print_kv("Local time", &report.local_time);
                    output::print_kv("Time slot", report.time_slot.as_str());
                    output::print_kv("Eligible", if report.eligible { "yes" } else { "no" });
                }
            }
        }
        PrefsCommand::Next { user, tz, at } => {
            let pref = manager.load(user).await?;
            let timezone = resolve_timezone(tz.as_deref(), &config)?;
            let from = at.unwrap_or_else(Utc::now);

            match next_eligible_at(&pref, from, timezone) {
                Some(next) => {
                    let local = next.with_timezone(&timezone);
                    match format {
                        OutputFormat::Json => output::print_item(&next, format),
                        OutputFormat::Table => {
                            output::print_kv("Next (UTC)", &next.to_rfc3339());
                            output::print_kv("Next (local)", &local.to_rfc3339());
                        }
                    }
                }
                None => output::print_warning(&format!(
                    "No eligible instant within the next week for '{}'",
                    user
                )),
            }
        }
    }

    Ok(())
}

fn print_preference(user_id: &UserId, pref: &NotificationPreference, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(&PreferenceDocument::from(pref), format),
        OutputFormat::Table => output::print_list(&[PreferenceRow::new(user_id, pref)], format),
    }
}

fn session_context(args: &SessionArgs, config: &AppConfig) -> Result<SessionContext, AppError> {
    let timezone = resolve_timezone(args.tz.as_deref(), config)?;
    let device = DeviceInfo {
        device_id: args.device.clone(),
        platform: args.platform,
        is_physical_device: !args.emulator,
    };
    Ok(SessionContext::new(args.user.clone(), device, timezone))
}

fn resolve_timezone(name: Option<&str>, config: &AppConfig) -> Result<Tz, AppError> {
    match name {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|e| AppError::validation(format!("Invalid timezone '{name}': {e}"))),
        None => config.notifications.timezone(),
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
