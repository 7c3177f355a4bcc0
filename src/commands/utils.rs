use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use pagelens::{Config, OutputFormat, PageSession};

/// Connect, load `url`, and index it
pub async fn open_page(config: &Config, url: &str) -> Result<PageSession> {
    let mut session = PageSession::open(config).await?;
    match session.navigate(url).await {
        Ok(lines) => {
            info!("Loaded {} with {} interactive element(s)", url, lines.len());
            Ok(session)
        }
        Err(e) => {
            finish(session, Ok(())).await?;
            Err(e)
        }
    }
}

/// Close the browser and hand back the command's own result
pub async fn finish<T>(session: PageSession, result: Result<T>) -> Result<T> {
    if let Err(e) = session.close().await {
        warn!("Failed to close browser: {:#}", e);
    }
    result
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Outcome line for commands that act on the page
pub fn action_report(action: &str, detail: &str) -> serde_json::Value {
    json!({
        "success": true,
        "action": action,
        "detail": detail,
    })
}

pub fn report_action(format: OutputFormat, action: &str, detail: &str) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&action_report(action, detail)),
        OutputFormat::Simple => {
            println!("{}", detail);
            Ok(())
        }
    }
}

/// `pagelens::Target` from either an index or a coordinate pair
pub fn target_from_args(
    index: Option<usize>,
    x: Option<f64>,
    y: Option<f64>,
) -> Result<pagelens::Target> {
    match (index, x, y) {
        (Some(index), None, None) => Ok(pagelens::Target::Index(index)),
        (None, Some(x), Some(y)) => Ok(pagelens::Target::Point { x, y }),
        (None, _, _) => anyhow::bail!("Give either --index or both --x and --y"),
        (Some(_), _, _) => anyhow::bail!("--index cannot be combined with --x/--y"),
    }
}

pub fn describe_target(target: pagelens::Target) -> String {
    match target {
        pagelens::Target::Index(index) => format!("element {}", index),
        pagelens::Target::Point { x, y } => format!("point ({}, {})", x, y),
    }
}
