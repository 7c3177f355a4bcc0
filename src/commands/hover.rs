use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_hover(
    config: &Config,
    url: String,
    x: f64,
    y: f64,
    format: OutputFormat,
) -> Result<()> {
    info!("Moving mouse to ({}, {}) on {}", x, y, url);

    let session = utils::open_page(config, &url).await?;
    let result = session.move_mouse(x, y).await;
    utils::finish(session, result).await?;

    utils::report_action(format, "hover", &format!("Moved mouse to ({}, {})", x, y))
}
