#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::scroll::Direction;
use pagelens::errors::PagelensError;
use pagelens::{BrowserType, Config, ConfigOverrides, OutputFormat, ViewportSize};

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "pagelens")]
#[command(about = "Visible content and indexed interactive elements for LLM agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.pagelens/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Browser to use
    #[arg(short, long, global = true)]
    browser: Option<BrowserType>,

    /// WebDriver endpoint (defaults to the browser's usual local port)
    #[arg(long, global = true)]
    webdriver_url: Option<String>,

    /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
    #[arg(long, global = true, value_parser = ViewportSize::parse)]
    viewport: Option<ViewportSize>,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless", global = true)]
    no_headless: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Visible content plus the indexed interactive elements
    View {
        /// URL to load
        url: String,
    },

    /// Visible content as one HTML fragment
    Content {
        /// URL to load
        url: String,
    },

    /// Indexed interactive elements
    Elements {
        /// URL to load
        url: String,
    },

    /// Click an indexed element or a viewport point
    Click {
        /// URL to load
        url: String,

        /// Index from the element list
        #[arg(long)]
        index: Option<usize>,

        /// Viewport x coordinate
        #[arg(long, requires = "y")]
        x: Option<f64>,

        /// Viewport y coordinate
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },

    /// Type text into an indexed element
    Type {
        /// URL to load
        url: String,

        /// Index from the element list
        #[arg(long)]
        index: usize,

        /// Text to type
        text: String,

        /// Press Enter afterwards
        #[arg(long)]
        enter: bool,
    },

    /// Pick an option of an indexed <select>
    Select {
        /// URL to load
        url: String,

        /// Index from the element list
        #[arg(long)]
        index: usize,

        /// Zero-based option position
        #[arg(long)]
        option: usize,
    },

    /// Execute JavaScript and show what it logged
    Eval {
        /// URL to load
        url: String,

        /// JavaScript code to execute
        code: String,

        /// Acknowledge security risks of executing arbitrary JavaScript
        #[arg(long = "unsafe-eval")]
        unsafe_eval: bool,

        /// Only show the last N console lines
        #[arg(long)]
        max_lines: Option<usize>,
    },

    /// Scroll the page one viewport, or to the top or bottom
    Scroll {
        /// URL to load
        url: String,

        #[arg(long, conflicts_with = "down", required_unless_present = "down")]
        up: bool,

        #[arg(long)]
        down: bool,

        /// Scroll all the way instead of one viewport
        #[arg(long)]
        to_end: bool,
    },

    /// Press a named key (Enter, Tab, Escape, ArrowDown, ...)
    Key {
        /// URL to load
        url: String,

        /// Key name
        key: String,
    },

    /// Move the mouse to viewport coordinates
    Hover {
        /// URL to load
        url: String,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,
    },

    /// Take a screenshot
    Screenshot {
        /// URL to load
        url: String,

        /// Output file path
        #[arg(short, long, default_value = "screenshot.png")]
        output: PathBuf,

        /// Capture the whole document instead of the viewport
        #[arg(long)]
        full_page: bool,
    },
}

#[tokio::main]
async fn main() {
    // Handle exit codes based on error type
    match run().await {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let pagelens_err: PagelensError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": pagelens_err.to_string(),
                "exit_code": pagelens_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", pagelens_err);
            std::process::exit(pagelens_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagelens=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        browser: cli.browser,
        webdriver_url: cli.webdriver_url,
        viewport: cli.viewport,
        no_headless: cli.no_headless,
    });
    let format = cli.format;

    match cli.command {
        Commands::View { url } => commands::view::handle_view(&config, url, format).await?,

        Commands::Content { url } => {
            commands::content::handle_content(&config, url, format).await?
        }

        Commands::Elements { url } => {
            commands::elements::handle_elements(&config, url, format).await?
        }

        Commands::Click { url, index, x, y } => {
            let target = commands::utils::target_from_args(index, x, y)?;
            commands::click::handle_click(&config, url, target, format).await?
        }

        Commands::Type {
            url,
            index,
            text,
            enter,
        } => commands::r#type::handle_type(&config, url, index, text, enter, format).await?,

        Commands::Select { url, index, option } => {
            commands::select::handle_select(&config, url, index, option, format).await?
        }

        Commands::Eval {
            url,
            code,
            unsafe_eval,
            max_lines,
        } => {
            commands::eval::handle_eval(&config, url, code, unsafe_eval, max_lines, format)
                .await?
        }

        Commands::Scroll {
            url,
            up,
            down: _,
            to_end,
        } => {
            let direction = if up { Direction::Up } else { Direction::Down };
            commands::scroll::handle_scroll(&config, url, direction, to_end, format).await?
        }

        Commands::Key { url, key } => {
            commands::key::handle_key(&config, url, key, format).await?
        }

        Commands::Hover { url, x, y } => {
            commands::hover::handle_hover(&config, url, x, y, format).await?
        }

        Commands::Screenshot {
            url,
            output,
            full_page,
        } => {
            commands::screenshot::handle_screenshot(&config, url, output, full_page, format)
                .await?
        }
    }

    Ok(())
}
