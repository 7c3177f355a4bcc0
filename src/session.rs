//! Page-session context: one browser page, its latest index, and its
//! console buffer.

use anyhow::{Context, Result};
use htmd::HtmlToMarkdown;
use htmd::options::{HeadingStyle, Options};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::console::{Console, ConsoleBuffer, ConsoleMirror, TracingConsole, tail};
use crate::errors::PagelensError;
use crate::indexer::{Indexer, InteractiveElements};
use crate::snapshot::capture_visible_content;
use crate::types::{InteractiveElement, PageView};
use crate::webdriver::{Browser, Scroll};

const INDEX_ATTEMPTS: usize = 3;

/// What a click or input goes to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// An index from the latest indexing pass
    Index(usize),
    /// Viewport coordinates
    Point { x: f64, y: f64 },
}

/// `index:<tag>text</tag>`
pub fn format_element_line(element: &InteractiveElement) -> String {
    format!(
        "{}:<{}>{}</{}>",
        element.index, element.tag, element.text, element.tag
    )
}

/// First `max_chars` characters of `content`
pub fn truncate_content(content: String, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => content[..byte_offset].to_string(),
        None => content,
    }
}

/// Convert a visible-content fragment to Markdown, then cut it to
/// `max_chars` characters
pub fn markdown_content(fragment_html: &str, max_chars: usize) -> Result<String> {
    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .build();
    let markdown = converter
        .convert(fragment_html)
        .context("Failed to convert page content to Markdown")?;
    Ok(truncate_content(markdown.trim().to_string(), max_chars))
}

pub struct PageSession {
    browser: Browser,
    indexer: Indexer,
    index: InteractiveElements,
    console: ConsoleMirror<TracingConsole>,
    /// Page console lines already forwarded
    console_seen: usize,
    max_content_length: usize,
    page_load_timeout: Duration,
}

impl PageSession {
    pub fn new(browser: Browser, config: &Config) -> Self {
        PageSession {
            browser,
            indexer: Indexer::default(),
            index: InteractiveElements::default(),
            console: ConsoleMirror::install(TracingConsole, ConsoleBuffer::new()),
            console_seen: 0,
            max_content_length: config.max_content_length,
            page_load_timeout: config.page_load_timeout(),
        }
    }

    pub async fn open(config: &Config) -> Result<Self> {
        let browser = Browser::connect(config).await?;
        Ok(Self::new(browser, config))
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Lines forwarded from the page console during this session
    pub fn console_buffer(&self) -> &ConsoleBuffer {
        self.console.buffer()
    }

    /// The latest indexing result
    pub fn interactive_elements(&self) -> &InteractiveElements {
        &self.index
    }

    /// Go to `url` and index the new page
    pub async fn navigate(&mut self, url: &str) -> Result<Vec<String>> {
        self.index = InteractiveElements::default();
        self.console_seen = 0;
        self.browser.goto(url).await?;
        self.extract_interactive_elements().await
    }

    /// Content plus interactive elements of the current page
    pub async fn view_page(&mut self) -> Result<PageView> {
        if !self.browser.wait_for_page_load(self.page_load_timeout).await? {
            warn!(
                "Page not fully loaded after {}s, continuing",
                self.page_load_timeout.as_secs()
            );
        }

        let interactive_elements = self.extract_interactive_elements().await?;
        let content = self.extract_content().await?;
        Ok(PageView {
            content,
            interactive_elements,
        })
    }

    /// Visible content as Markdown, cut to the configured length
    pub async fn extract_content(&self) -> Result<String> {
        let html = capture_visible_content(&self.browser.capture_document().await?).to_html();
        markdown_content(&html, self.max_content_length)
    }

    /// Visible content as the raw HTML fragment, cut to the configured length
    pub async fn extract_html(&self) -> Result<String> {
        let html = capture_visible_content(&self.browser.capture_document().await?).to_html();
        Ok(truncate_content(html, self.max_content_length))
    }

    /// Re-index the page, tag the live elements, and cache the result.
    ///
    /// A pass whose elements left the page before their markers were
    /// written is thrown away and collected again; the cache stays empty
    /// if that keeps happening.
    pub async fn index_elements(&mut self) -> Result<&InteractiveElements> {
        self.index = InteractiveElements::default();

        for attempt in 1..=INDEX_ATTEMPTS {
            let document = self.browser.capture_document().await?;
            let found = self.indexer.capture(&document);
            let stale = self.browser.apply_markers(&found).await?;
            if stale == 0 {
                info!("Indexed {} interactive element(s)", found.len());
                self.index = found;
                return Ok(&self.index);
            }
            warn!(
                "Page changed while indexing: {} of {} marker(s) stale (attempt {}/{})",
                stale,
                found.len(),
                attempt,
                INDEX_ATTEMPTS
            );
        }

        anyhow::bail!(
            "Page kept changing while indexing; gave up after {} attempts",
            INDEX_ATTEMPTS
        )
    }

    pub async fn extract_interactive_elements(&mut self) -> Result<Vec<String>> {
        let found = self.index_elements().await?;
        Ok(found.records().iter().map(format_element_line).collect())
    }

    /// Selector for an index of the latest pass
    pub fn element_by_index(&self, index: usize) -> Result<&str, PagelensError> {
        self.index
            .get(index)
            .map(|record| record.selector.as_str())
            .ok_or(PagelensError::ElementNotFound {
                index,
                available: self.index.len(),
            })
    }

    pub async fn click(&self, target: Target) -> Result<()> {
        match target {
            Target::Point { x, y } => self.browser.click_at(x, y).await,
            Target::Index(index) => {
                let selector = self.element_by_index(index)?;
                if !self.browser.is_rendered(selector).await? {
                    debug!("Element {} not rendered, scrolling it into view", index);
                    self.browser.scroll_into_view(selector).await?;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
                self.browser.click(selector).await
            }
        }
    }

    pub async fn input(&self, target: Target, text: &str, press_enter: bool) -> Result<()> {
        match target {
            Target::Point { x, y } => {
                self.browser.click_at(x, y).await?;
                self.browser.type_text(text).await?;
            }
            Target::Index(index) => {
                let selector = self.element_by_index(index)?;
                self.browser.type_into(selector, text).await?;
            }
        }

        if press_enter {
            self.browser.press_key("Enter").await?;
        }
        Ok(())
    }

    /// Pick the `option`-th entry of the `<select>` at `index`
    pub async fn select_option(&self, index: usize, option: usize) -> Result<()> {
        let selector = self.element_by_index(index)?;
        self.browser.select_option(selector, option).await
    }

    pub async fn scroll_up(&self, to_top: bool) -> Result<()> {
        let scroll = if to_top { Scroll::Top } else { Scroll::PageUp };
        self.browser.scroll(scroll).await
    }

    pub async fn scroll_down(&self, to_bottom: bool) -> Result<()> {
        let scroll = if to_bottom {
            Scroll::Bottom
        } else {
            Scroll::PageDown
        };
        self.browser.scroll(scroll).await
    }

    pub async fn press_key(&self, key: &str) -> Result<()> {
        self.browser.press_key(key).await
    }

    pub async fn move_mouse(&self, x: f64, y: f64) -> Result<()> {
        self.browser.move_mouse(x, y).await
    }

    pub async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        self.browser.screenshot(full_page).await
    }

    /// Run `javascript` with the console mirror installed
    pub async fn console_exec(&mut self, javascript: &str) -> Result<serde_json::Value> {
        if let Err(e) = self.browser.install_console_mirror().await {
            warn!("Failed to install console mirror: {:#}", e);
        }
        // Installing resets the page buffer
        self.console_seen = 0;
        self.browser.execute(javascript).await
    }

    /// The page's mirrored console lines, newest last
    pub async fn console_view(&mut self, max_lines: Option<usize>) -> Result<Vec<String>> {
        let logs = self.browser.console_logs().await?;
        for line in logs.iter().skip(self.console_seen) {
            self.console.log(&[line.as_str()]);
        }
        self.console_seen = self.console_seen.max(logs.len());
        Ok(tail(logs, max_lines))
    }

    pub async fn close(self) -> Result<()> {
        self.browser.close().await
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
