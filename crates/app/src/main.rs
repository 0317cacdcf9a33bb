use std::{sync::Arc, time::Duration};

use engine::ViewController;
use tokio::io::BufReader;

use crate::{api::FixtureApi, error::Result};

mod api;
mod config;
mod error;
mod session;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "spendview={level},engine={level}",
            level = config.level
        ))
        .init();

    tracing::info!(data_path = %config.data_path, "loading fixture data");
    let api = FixtureApi::from_path(
        &config.data_path,
        config.page_size,
        Duration::from_millis(config.latency_ms),
    )
    .await?;

    let controller = ViewController::builder().api(Arc::new(api)).build()?;
    session::run(
        &controller,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    )
    .await
}
