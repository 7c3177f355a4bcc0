use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::console::{INSTALL_CONSOLE_MIRROR, READ_CONSOLE_LOGS};
use crate::dom::Document;
use crate::errors::PagelensError;
use crate::indexer::{InteractiveElements, MARKER_ATTRIBUTE};
use crate::types::ViewportSize;

const CLICK_TIMEOUT: Duration = Duration::from_secs(5);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Collects every element under `<body>` with the facts the core needs.
/// `parent` is the parent's position in the same list, or null below body.
/// The list itself stays on the page so markers can find the same nodes.
const COLLECT_DOCUMENT_SCRIPT: &str = r#"
    const all = Array.from(document.querySelectorAll("body *"));
    window.__pagelensCollected = all;
    const positions = new Map(all.map((element, i) => [element, i]));
    const formControls = ["input", "textarea", "select"];
    return {
        viewport: { width: window.innerWidth, height: window.innerHeight },
        elements: all.map((element) => {
            const rect = element.getBoundingClientRect();
            const style = window.getComputedStyle(element);
            const tag = element.tagName.toLowerCase();
            const parent = positions.has(element.parentElement)
                ? positions.get(element.parentElement)
                : null;
            return {
                tag: tag,
                attributes: Array.from(element.attributes).map((a) => [a.name, a.value]),
                value: formControls.includes(tag) ? String(element.value ?? "") : null,
                innerText: typeof element.innerText === "string" ? element.innerText : "",
                outerHTML: element.outerHTML,
                rect: {
                    top: rect.top,
                    left: rect.left,
                    bottom: rect.bottom,
                    right: rect.right,
                    width: rect.width,
                    height: rect.height
                },
                style: {
                    display: style.display,
                    visibility: style.visibility,
                    opacity: style.opacity
                },
                parent: parent
            };
        })
    };
"#;

/// Clears old markers, then tags `[position, tag, marker]` triples against
/// the list the last collection kept. Returns how many could not be placed
/// because the node is gone or no longer has the collected tag.
const APPLY_MARKERS_SCRIPT: &str = r#"
    const triples = arguments[0];
    const attribute = arguments[1];
    document.querySelectorAll("[" + attribute + "]").forEach((el) => el.removeAttribute(attribute));
    const collected = window.__pagelensCollected || [];
    let stale = 0;
    for (const [position, tag, marker] of triples) {
        const element = collected[position];
        if (element && element.isConnected && element.tagName.toLowerCase() === tag) {
            element.setAttribute(attribute, marker);
        } else {
            stale++;
        }
    }
    return stale;
"#;

/// Size and style checks only; position is ignored so scrolled-away
/// elements still count as rendered
const IS_RENDERED_SCRIPT: &str = r#"
    const element = document.querySelector(arguments[0]);
    if (!element) return false;
    const rect = element.getBoundingClientRect();
    const style = window.getComputedStyle(element);
    return !(
        rect.width === 0 ||
        rect.height === 0 ||
        style.display === 'none' ||
        style.visibility === 'hidden' ||
        style.opacity === '0'
    );
"#;

const SCROLL_INTO_VIEW_SCRIPT: &str = r#"
    const element = document.querySelector(arguments[0]);
    if (element) {
        element.scrollIntoView({ behavior: 'auto', block: 'center' });
    }
"#;

const POINTER_EVENT_SCRIPT: &str = r#"
    const [x, y, kinds] = [arguments[0], arguments[1], arguments[2]];
    const target = document.elementFromPoint(x, y);
    if (!target) return false;
    for (const kind of kinds) {
        target.dispatchEvent(new MouseEvent(kind, {
            bubbles: true, cancelable: true, view: window, clientX: x, clientY: y
        }));
    }
    if (kinds.includes('click') && typeof target.focus === 'function') {
        target.focus();
    }
    return true;
"#;

const SELECT_OPTION_SCRIPT: &str = r#"
    const element = document.querySelector(arguments[0]);
    const option = arguments[1];
    if (!element || element.tagName !== 'SELECT') return 'not a select element';
    if (option < 0 || option >= element.options.length) {
        return 'option ' + option + ' out of range (' + element.options.length + ' options)';
    }
    element.selectedIndex = option;
    element.dispatchEvent(new Event('input', { bubbles: true }));
    element.dispatchEvent(new Event('change', { bubbles: true }));
    return null;
"#;

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    #[value(alias = "chromium")]
    Chrome,
}

impl BrowserType {
    /// Port the driver listens on when started without options
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }

    pub fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }
}

/// Where a scroll should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    /// One viewport up
    PageUp,
    /// One viewport down
    PageDown,
    Top,
    Bottom,
}

impl Scroll {
    fn script(&self) -> &'static str {
        match self {
            Scroll::PageUp => "window.scrollBy(0, -window.innerHeight);",
            Scroll::PageDown => "window.scrollBy(0, window.innerHeight);",
            Scroll::Top => "window.scrollTo(0, 0);",
            Scroll::Bottom => "window.scrollTo(0, document.body.scrollHeight);",
        }
    }
}

/// Translate a key name such as `Enter` into what WebDriver's send-keys
/// expects. Unknown names are typed literally.
pub fn key_sequence(key: &str) -> String {
    let code = match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => '\u{E007}',
        "tab" => '\u{E004}',
        "escape" | "esc" => '\u{E00C}',
        "backspace" => '\u{E003}',
        "delete" => '\u{E017}',
        "space" => ' ',
        "arrowup" | "up" => '\u{E013}',
        "arrowdown" | "down" => '\u{E015}',
        "arrowleft" | "left" => '\u{E012}',
        "arrowright" | "right" => '\u{E014}',
        "pageup" => '\u{E00E}',
        "pagedown" => '\u{E00F}',
        "home" => '\u{E011}',
        "end" => '\u{E010}',
        _ => return key.to_string(),
    };
    code.to_string()
}

/// Build WebDriver capabilities for a session
pub fn capabilities(
    browser_type: BrowserType,
    headless: bool,
    viewport: Option<ViewportSize>,
    profile_dir: Option<&Path>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();

    match browser_type {
        BrowserType::Firefox => {
            let mut args = Vec::new();
            if headless {
                args.push("--headless".to_string());
            }
            if let Some(vp) = viewport {
                args.push(format!("--width={}", vp.width));
                args.push(format!("--height={}", vp.height));
            }
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
        }
        BrowserType::Chrome => {
            let mut args = vec!["--no-sandbox".to_string()];
            if headless {
                args.push("--headless=new".to_string());
                args.push("--disable-gpu".to_string());
                args.push("--disable-dev-shm-usage".to_string());
            }
            if let Some(vp) = viewport {
                args.push(format!("--window-size={},{}", vp.width, vp.height));
            }
            if let Some(dir) = profile_dir {
                args.push(format!("--user-data-dir={}", dir.display()));
            }
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        }
    }

    caps
}

/// `[position, tag, marker]` for every indexed element
pub fn marker_payload(elements: &InteractiveElements) -> serde_json::Value {
    elements
        .markers()
        .into_iter()
        .map(|marker| json!([marker.node.0, marker.tag, marker.value]))
        .collect()
}

/// Browser session driven over WebDriver
pub struct Browser {
    client: Client,
    // Chrome refuses to share a profile directory between sessions
    _profile_dir: Option<TempDir>,
}

impl Browser {
    /// Connect to the configured WebDriver, retrying with a doubling delay
    pub async fn connect(config: &Config) -> Result<Self> {
        let browser_type = config.browser;
        let webdriver_url = config.webdriver_url();
        info!("Connecting to {:?} WebDriver at {}", browser_type, webdriver_url);

        if !Self::is_webdriver_running(&webdriver_url).await {
            return Err(PagelensError::WebDriverFailed(format!(
                "Cannot reach {} at {}. Start it with: {} --port {}",
                browser_type.driver_name(),
                webdriver_url,
                browser_type.driver_name(),
                url::Url::parse(&webdriver_url)
                    .ok()
                    .and_then(|u| u.port())
                    .unwrap_or(4444)
            ))
            .into());
        }

        let profile_dir = match browser_type {
            BrowserType::Chrome => Some(
                tempfile::Builder::new()
                    .prefix("pagelens-chrome-")
                    .tempdir()?,
            ),
            BrowserType::Firefox => None,
        };
        let caps = capabilities(
            browser_type,
            config.headless,
            config.viewport,
            profile_dir.as_ref().map(|d| d.path()),
        );

        let attempts = config.connect_retries.max(1);
        let mut delay = Duration::from_secs(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match ClientBuilder::rustls()
                .capabilities(caps.clone())
                .connect(&webdriver_url)
                .await
            {
                Ok(client) => {
                    if let Some(vp) = config.viewport {
                        debug!("Setting viewport to {}x{}", vp.width, vp.height);
                        if let Err(e) = client.set_window_size(vp.width, vp.height).await {
                            // Best effort; the launch arguments usually did it already
                            debug!("Could not set window size: {}", e);
                        }
                    }
                    return Ok(Browser {
                        client,
                        _profile_dir: profile_dir,
                    });
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        warn!(
                            "Connecting to WebDriver failed (attempt {}/{}): {}",
                            attempt, attempts, e
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(PagelensError::WebDriverFailed(format!(
            "Failed to connect to WebDriver after {} attempt(s): {}",
            attempts, last_error
        ))
        .into())
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url.trim_end_matches('/'));

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        Ok(())
    }

    /// Poll `document.readyState` until complete. Returns false on timeout.
    pub async fn wait_for_page_load(&self, timeout: Duration) -> Result<bool> {
        let started = Instant::now();
        loop {
            let ready = self
                .client
                .execute("return document.readyState === 'complete';", vec![])
                .await
                .context("Failed to read document.readyState")?;
            if ready.as_bool().unwrap_or(false) {
                return Ok(true);
            }
            if started.elapsed() >= timeout {
                return Ok(false);
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    /// Collect the page model in one script evaluation
    pub async fn capture_document(&self) -> Result<Document> {
        let snapshot = self
            .client
            .execute(COLLECT_DOCUMENT_SCRIPT, vec![])
            .await
            .context("Failed to collect page elements")?;
        let document = Document::from_snapshot(snapshot)?;
        debug!("Collected {} element(s)", document.len());
        Ok(document)
    }

    /// Write the index markers so each record's selector resolves to the
    /// element it was built from. Markers from earlier passes are removed
    /// first. Returns the number of markers that could not be placed.
    pub async fn apply_markers(&self, elements: &InteractiveElements) -> Result<usize> {
        let stale = self
            .client
            .execute(
                APPLY_MARKERS_SCRIPT,
                vec![marker_payload(elements), json!(MARKER_ATTRIBUTE)],
            )
            .await
            .context("Failed to tag interactive elements")?;

        Ok(stale.as_u64().unwrap_or(elements.len() as u64) as usize)
    }

    async fn find(&self, selector: &str) -> Result<fantoccini::elements::Element> {
        self.client
            .find(Locator::Css(selector))
            .await
            .with_context(|| format!("Element not found: {}", selector))
    }

    pub async fn is_rendered(&self, selector: &str) -> Result<bool> {
        let rendered = self
            .client
            .execute(IS_RENDERED_SCRIPT, vec![json!(selector)])
            .await?;
        Ok(rendered.as_bool().unwrap_or(false))
    }

    pub async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        self.client
            .execute(SCROLL_INTO_VIEW_SCRIPT, vec![json!(selector)])
            .await?;
        Ok(())
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        let element = self.find(selector).await?;
        debug!("Clicking {}", selector);
        match tokio::time::timeout(CLICK_TIMEOUT, element.click()).await {
            Ok(result) => result.with_context(|| format!("Failed to click {}", selector)),
            Err(_) => Err(PagelensError::Timeout(format!(
                "clicking {} took longer than {}s",
                selector,
                CLICK_TIMEOUT.as_secs()
            ))
            .into()),
        }
    }

    async fn pointer_event(&self, x: f64, y: f64, kinds: &[&str]) -> Result<()> {
        let hit = self
            .client
            .execute(POINTER_EVENT_SCRIPT, vec![json!(x), json!(y), json!(kinds)])
            .await?;
        if !hit.as_bool().unwrap_or(false) {
            anyhow::bail!("No element at ({}, {})", x, y);
        }
        Ok(())
    }

    pub async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        debug!("Clicking at ({}, {})", x, y);
        self.pointer_event(x, y, &["mousedown", "mouseup", "click"])
            .await
    }

    pub async fn move_mouse(&self, x: f64, y: f64) -> Result<()> {
        self.pointer_event(x, y, &["mouseover", "mousemove"]).await
    }

    /// Clear the field and type; if clearing fails, click it and type
    pub async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.find(selector).await?;
        if let Err(e) = element.clear().await {
            debug!("Could not clear {}: {}, clicking instead", selector, e);
            element.click().await?;
        }
        element
            .send_keys(text)
            .await
            .with_context(|| format!("Failed to type into {}", selector))?;
        Ok(())
    }

    /// Send keys to whatever has focus
    pub async fn type_text(&self, text: &str) -> Result<()> {
        let target = match self.client.find(Locator::Css("*:focus")).await {
            Ok(element) => element,
            Err(_) => self.find("body").await?,
        };
        target.send_keys(text).await?;
        Ok(())
    }

    pub async fn press_key(&self, key: &str) -> Result<()> {
        debug!("Pressing {}", key);
        self.type_text(&key_sequence(key)).await
    }

    pub async fn select_option(&self, selector: &str, option: usize) -> Result<()> {
        let outcome = self
            .client
            .execute(SELECT_OPTION_SCRIPT, vec![json!(selector), json!(option)])
            .await?;
        if let Some(problem) = outcome.as_str() {
            anyhow::bail!("Cannot select option {} in {}: {}", option, selector, problem);
        }
        Ok(())
    }

    pub async fn scroll(&self, scroll: Scroll) -> Result<()> {
        debug!("Scrolling: {:?}", scroll);
        self.client.execute(scroll.script(), vec![]).await?;
        Ok(())
    }

    /// PNG screenshot. A full-page capture grows the window to the
    /// document size for the shot and restores it afterwards.
    pub async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        if !full_page {
            return Ok(self.client.screenshot().await?);
        }

        let sizes = self
            .client
            .execute(
                "return [window.outerWidth, window.outerHeight, \
                 document.documentElement.scrollWidth, document.documentElement.scrollHeight];",
                vec![],
            )
            .await?;
        let size = |i: usize| sizes.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        let (window_width, window_height) = (size(0), size(1));
        let (page_width, page_height) = (size(2), size(3));

        self.client
            .set_window_size(page_width.max(window_width), page_height.max(window_height))
            .await?;
        let shot = self.client.screenshot().await;
        if let Err(e) = self
            .client
            .set_window_size(window_width, window_height)
            .await
        {
            warn!("Could not restore window size: {}", e);
        }
        Ok(shot?)
    }

    pub async fn execute(&self, script: &str) -> Result<serde_json::Value> {
        self.client
            .execute(script, vec![])
            .await
            .context("Failed to execute script")
    }

    pub async fn install_console_mirror(&self) -> Result<()> {
        self.client
            .execute(INSTALL_CONSOLE_MIRROR, vec![])
            .await
            .context("Failed to install console mirror")?;
        Ok(())
    }

    /// Everything the page has mirrored so far
    pub async fn console_logs(&self) -> Result<Vec<String>> {
        let logs = self.client.execute(READ_CONSOLE_LOGS, vec![]).await?;
        serde_json::from_value(logs).context("Malformed console buffer")
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
