use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_screenshot(
    config: &Config,
    url: String,
    output: PathBuf,
    full_page: bool,
    format: OutputFormat,
) -> Result<()> {
    info!(
        "Taking {} screenshot of {}",
        if full_page { "full-page" } else { "viewport" },
        url
    );

    let session = utils::open_page(config, &url).await?;
    let result = session.screenshot(full_page).await;
    let png = utils::finish(session, result).await?;

    std::fs::write(&output, &png)
        .with_context(|| format!("Failed to write screenshot to {}", output.display()))?;

    match format {
        OutputFormat::Json => utils::print_json(&json!({
            "saved_to": output.display().to_string(),
            "bytes": png.len(),
        })),
        OutputFormat::Simple => {
            println!("Screenshot saved to: {}", output.display());
            println!("Size: {} bytes", png.len());
            Ok(())
        }
    }
}
