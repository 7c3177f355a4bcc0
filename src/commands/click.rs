use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat, Target};

use super::utils;

pub async fn handle_click(
    config: &Config,
    url: String,
    target: Target,
    format: OutputFormat,
) -> Result<()> {
    let described = utils::describe_target(target);
    info!("Clicking {} on {}", described, url);

    let session = utils::open_page(config, &url).await?;
    let result = session.click(target).await;
    utils::finish(session, result).await?;

    utils::report_action(format, "click", &format!("Clicked {}", described))
}
