use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat, Target};

use super::utils;

pub async fn handle_type(
    config: &Config,
    url: String,
    index: usize,
    text: String,
    press_enter: bool,
    format: OutputFormat,
) -> Result<()> {
    info!("Typing into element {} on {}", index, url);

    let session = utils::open_page(config, &url).await?;
    let result = session.input(Target::Index(index), &text, press_enter).await;
    utils::finish(session, result).await?;

    let mut detail = format!(
        "Typed {} character(s) into element {}",
        text.chars().count(),
        index
    );
    if press_enter {
        detail.push_str(" and pressed Enter");
    }
    utils::report_action(format, "type", &detail)
}
