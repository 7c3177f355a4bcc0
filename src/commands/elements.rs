use anyhow::Result;
use tracing::info;

use pagelens::session::format_element_line;
use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_elements(config: &Config, url: String, format: OutputFormat) -> Result<()> {
    info!("Listing interactive elements on {}", url);

    // Loading the page already indexed it
    let session = utils::open_page(config, &url).await?;
    let records = session.interactive_elements().records().to_vec();
    utils::finish(session, Ok(())).await?;

    match format {
        OutputFormat::Json => utils::print_json(&records),
        OutputFormat::Simple => {
            for record in &records {
                println!("{}", format_element_line(record));
            }
            Ok(())
        }
    }
}
