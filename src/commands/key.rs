use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_key(
    config: &Config,
    url: String,
    key: String,
    format: OutputFormat,
) -> Result<()> {
    info!("Pressing {} on {}", key, url);

    let session = utils::open_page(config, &url).await?;
    let result = session.press_key(&key).await;
    utils::finish(session, result).await?;

    utils::report_action(format, "key", &format!("Pressed {}", key))
}
