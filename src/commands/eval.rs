use anyhow::Result;
use serde_json::json;
use tracing::info;

use pagelens::{Config, OutputFormat};

use super::utils;

pub async fn handle_eval(
    config: &Config,
    url: String,
    code: String,
    unsafe_eval: bool,
    max_lines: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    // Security check: require explicit flag
    if !unsafe_eval {
        anyhow::bail!(
            "The eval command requires the --unsafe-eval flag to acknowledge security risks. \
             JavaScript execution can be dangerous; only use it with trusted code."
        );
    }

    info!("Executing JavaScript on {}", url);

    let mut session = utils::open_page(config, &url).await?;
    let result = match session.console_exec(&code).await {
        Ok(value) => session
            .console_view(max_lines)
            .await
            .map(|console| (value, console)),
        Err(e) => Err(e),
    };
    let (value, console) = utils::finish(session, result).await?;

    match format {
        OutputFormat::Json => utils::print_json(&json!({
            "result": value,
            "console": console,
        })),
        OutputFormat::Simple => {
            for line in &console {
                println!("{}", line);
            }
            println!("{}", simple_value(&value));
            Ok(())
        }
    }
}

/// Scalars without JSON quoting, everything else as compact JSON
pub fn simple_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
