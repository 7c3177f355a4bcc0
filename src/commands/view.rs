use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat, PageView};

use super::utils;

pub async fn handle_view(config: &Config, url: String, format: OutputFormat) -> Result<()> {
    info!("Viewing {}", url);

    let mut session = utils::open_page(config, &url).await?;
    let result = session.view_page().await;
    let view = utils::finish(session, result).await?;

    print_view(&view, format)
}

fn print_view(view: &PageView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => utils::print_json(view),
        OutputFormat::Simple => {
            println!("{}", view.content);
            println!();
            for line in &view.interactive_elements {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
