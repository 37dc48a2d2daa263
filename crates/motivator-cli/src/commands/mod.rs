//! CLI command definitions and dispatch.

pub mod config;
pub mod prefs;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use motivator_core::config::AppConfig;
use motivator_core::error::AppError;
use motivator_push::RegistrarManager;
use motivator_service::{NotificationPreferenceManager, SystemClock};
use motivator_store::StoreManager;

/// Motivator: notification preference administration
#[derive(Debug, Parser)]
#[command(name = "motivator", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Notification preference management
    Prefs(prefs::PrefsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Prefs(args) => prefs::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: wire a preference manager from configuration
pub async fn create_manager(
    config: &AppConfig,
) -> Result<(NotificationPreferenceManager, StoreManager), AppError> {
    let store = StoreManager::new(&config.store).await?;
    let registrar = RegistrarManager::new(&config.push)?;

    let manager = NotificationPreferenceManager::new(
        Arc::new(store.clone()),
        Arc::new(registrar),
        Arc::new(SystemClock),
        Duration::from_millis(config.notifications.registration_timeout_ms),
    );
    Ok((manager, store))
}
