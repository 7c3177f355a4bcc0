use anyhow::Result;
use serde_json::json;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_content(config: &Config, url: String, format: OutputFormat) -> Result<()> {
    info!("Extracting visible content from {}", url);

    let session = utils::open_page(config, &url).await?;
    let result = session.extract_html().await;
    let content = utils::finish(session, result).await?;

    match format {
        OutputFormat::Json => utils::print_json(&json!({
            "url": url,
            "content": content,
        })),
        OutputFormat::Simple => {
            println!("{}", content);
            Ok(())
        }
    }
}
