//! Settings loaded from `~/.pagelens/config.json` and the command line

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::types::ViewportSize;
use crate::webdriver::BrowserType;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Browser to drive
    pub browser: BrowserType,
    /// WebDriver endpoint; the browser's usual local port when absent
    pub webdriver_url: Option<String>,
    pub headless: bool,
    pub viewport: Option<ViewportSize>,
    /// Longest content string handed back, in characters
    pub max_content_length: usize,
    /// How long to wait for `document.readyState == "complete"`
    pub page_load_timeout_secs: u64,
    /// Connection attempts before giving up
    pub connect_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            browser: BrowserType::Chrome,
            webdriver_url: None,
            headless: true,
            viewport: None,
            max_content_length: 50_000,
            page_load_timeout_secs: 15,
            connect_retries: 3,
        }
    }
}

/// Values given on the command line win over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub browser: Option<BrowserType>,
    pub webdriver_url: Option<String>,
    pub viewport: Option<ViewportSize>,
    pub no_headless: bool,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pagelens").join("config.json"))
    }

    /// Load from `path`, or from the default location if it exists.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(browser) = overrides.browser {
            self.browser = browser;
        }
        if let Some(url) = overrides.webdriver_url {
            self.webdriver_url = Some(url);
        }
        if let Some(viewport) = overrides.viewport {
            self.viewport = Some(viewport);
        }
        if overrides.no_headless {
            self.headless = false;
        }
    }

    pub fn webdriver_url(&self) -> String {
        self.webdriver_url
            .clone()
            .unwrap_or_else(|| self.browser.default_webdriver_url().to_string())
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
