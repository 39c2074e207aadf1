use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/cli.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scan_url: String,
    pub sync_url: String,
    pub state_path: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan_url: "https://enki-service.vercel.app/api/share-fare-service".to_string(),
            sync_url: "https://enki-service.vercel.app/api/splitwise-add-expense".to_string(),
            state_path: "config/sharefare_state.json".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sharefare", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the bill-scan service URL.
    #[arg(long)]
    scan_url: Option<String>,
    /// Override the ledger-sync service URL.
    #[arg(long)]
    sync_url: Option<String>,
    /// Override the session state file path.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SHAREFARE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(scan_url) = args.scan_url {
        settings.scan_url = scan_url;
    }
    if let Some(sync_url) = args.sync_url {
        settings.sync_url = sync_url;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
