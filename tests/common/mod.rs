// Common test utilities and fixtures
#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

use pagelens::{BrowserType, Config};

/// Browser under test, from TEST_BROWSER (chrome unless set to firefox)
pub fn get_test_browser() -> BrowserType {
    match std::env::var("TEST_BROWSER") {
        Ok(browser) if browser == "firefox" => BrowserType::Firefox,
        _ => BrowserType::Chrome,
    }
}

/// Headless config for the test browser at its usual WebDriver port
pub fn test_config() -> Config {
    Config {
        browser: get_test_browser(),
        webdriver_url: std::env::var("WEBDRIVER_URL").ok(),
        ..Config::default()
    }
}

/// Whether a WebDriver answers at the test config's URL
pub async fn webdriver_available() -> bool {
    let status_url = format!("{}/status", test_config().webdriver_url());
    match reqwest::get(&status_url).await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Mock HTML pages for testing
pub mod fixtures {
    pub const SIMPLE_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Test Page</title></head>
    <body>
        <h1>Test Header</h1>
        <div id="content">Test content</div>
        <button class="btn">Click me</button>
    </body>
    </html>
    "#;

    pub const FORM_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Form Page</title></head>
    <body>
        <label for="email">Email</label>
        <input id="email" placeholder="you@example.com">
        <label>Name <input id="name" value="Ada"></label>
        <select id="color">
            <option>Red</option>
            <option>Green</option>
            <option>Blue</option>
        </select>
        <button id="go" onclick="document.title = 'Sent ' + document.getElementById('email').value">Send</button>
    </body>
    </html>
    "#;

    pub const HIDDEN_PAGE: &str = r##"
    <!DOCTYPE html>
    <html>
    <head><title>Hidden Page</title></head>
    <body>
        <button id="shown">Shown</button>
        <button style="display: none">Display none</button>
        <button style="visibility: hidden">Visibility hidden</button>
        <button style="opacity: 0">Transparent</button>
        <div style="height: 5000px"></div>
        <a id="far" href="#bottom">Below the fold</a>
    </body>
    </html>
    "##;

    pub const PAGE_WITH_CONSOLE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Console Test</title></head>
    <body>
        <div id="app">App</div>
    </body>
    </html>
    "#;
}

/// Helper to create a test HTML file
pub fn create_test_html(content: &str) -> PathBuf {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test.html");
    std::fs::write(&file_path, content).expect("Failed to write test HTML");

    // Leak the temp_dir to keep it alive for the test
    std::mem::forget(temp_dir);
    file_path
}

/// `file://` URL for a fixture page
pub fn fixture_url(content: &str) -> String {
    format!("file://{}", create_test_html(content).display())
}
