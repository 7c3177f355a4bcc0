use anyhow::Result;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

/// Scroll direction from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

pub async fn handle_scroll(
    config: &Config,
    url: String,
    direction: Direction,
    to_end: bool,
    format: OutputFormat,
) -> Result<()> {
    info!("Scrolling {:?} on {}", direction, url);

    let session = utils::open_page(config, &url).await?;
    let result = match direction {
        Direction::Up => session.scroll_up(to_end).await,
        Direction::Down => session.scroll_down(to_end).await,
    };
    // The viewport moved, so the old index no longer matches what is visible
    let lines = match result {
        Ok(()) => reindex(session).await,
        Err(e) => utils::finish(session, Err(e)).await,
    }?;

    match format {
        OutputFormat::Json => utils::print_json(&serde_json::json!({
            "success": true,
            "action": "scroll",
            "detail": scroll_detail(direction, to_end),
            "interactive_elements": lines,
        })),
        OutputFormat::Simple => {
            println!("{}", scroll_detail(direction, to_end));
            for line in &lines {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

async fn reindex(mut session: pagelens::PageSession) -> Result<Vec<String>> {
    let result = session.extract_interactive_elements().await;
    utils::finish(session, result).await
}

pub fn scroll_detail(direction: Direction, to_end: bool) -> String {
    match (direction, to_end) {
        (Direction::Up, false) => "Scrolled up one viewport".to_string(),
        (Direction::Up, true) => "Scrolled to the top".to_string(),
        (Direction::Down, false) => "Scrolled down one viewport".to_string(),
        (Direction::Down, true) => "Scrolled to the bottom".to_string(),
    }
}
