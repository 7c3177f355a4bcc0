use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_select(
    config: &Config,
    url: String,
    index: usize,
    option: usize,
    format: OutputFormat,
) -> Result<()> {
    info!("Selecting option {} of element {} on {}", option, index, url);

    let session = utils::open_page(config, &url).await?;
    let result = session.select_option(index, option).await;
    utils::finish(session, result).await?;

    utils::report_action(
        format,
        "select",
        &format!("Selected option {} of element {}", option, index),
    )
}
