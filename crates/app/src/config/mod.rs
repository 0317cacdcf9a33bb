use std::num::NonZeroUsize;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/spendview.toml";
const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file with the employee directory and every transaction.
    pub data_path: String,
    /// Transactions per page. Zero is rejected while parsing.
    pub page_size: NonZeroUsize,
    /// Delay added before every API response.
    pub latency_ms: u64,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: "fixtures/data.json".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            latency_ms: 0,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "spendview", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the fixture data set path.
    #[arg(long)]
    data_path: Option<String>,
    /// Override the number of transactions per page.
    #[arg(long)]
    page_size: Option<NonZeroUsize>,
    /// Override the simulated API latency, in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDVIEW"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_path) = args.data_path {
        settings.data_path = data_path;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(latency_ms) = args.latency_ms {
        settings.latency_ms = latency_ms;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
