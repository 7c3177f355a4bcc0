// Tests for CLI error reporting; none of these reach a browser
use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run pagelens and parse the JSON it prints
fn run_command(args: &[&str]) -> Result<(Value, i32)> {
    let output = Command::new(env!("CARGO_BIN_EXE_pagelens"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let exit_code = output.status.code().unwrap_or(-1);

    let json = match serde_json::from_str(&stdout) {
        Ok(json) => json,
        Err(_) => {
            // If not JSON, combine stdout and stderr for the message
            let message = if !stdout.is_empty() {
                stdout.to_string()
            } else {
                stderr.to_string()
            };

            serde_json::json!({
                "error": exit_code != 0,
                "message": message,
                "exit_code": exit_code
            })
        }
    };

    Ok((json, exit_code))
}

#[test]
fn test_eval_requires_unsafe_flag() -> Result<()> {
    let (result, exit_code) = run_command(&["eval", "https://example.com", "1 + 1"])?;

    assert_eq!(exit_code, 1);
    assert_eq!(result["error"].as_bool(), Some(true));
    assert!(result["message"].as_str().unwrap().contains("--unsafe-eval"));
    Ok(())
}

#[test]
fn test_click_without_target() -> Result<()> {
    let (result, exit_code) = run_command(&["click", "https://example.com"])?;

    assert_eq!(exit_code, 1);
    assert!(result["message"].as_str().unwrap().contains("--index"));
    Ok(())
}

#[test]
fn test_unreachable_webdriver() -> Result<()> {
    let (result, exit_code) = run_command(&[
        "view",
        "https://example.com",
        "--webdriver-url",
        "http://127.0.0.1:9",
    ])?;

    assert_eq!(exit_code, 4);
    assert_eq!(result["exit_code"].as_i64(), Some(4));
    assert!(result["message"].as_str().unwrap().contains("WebDriver"));
    Ok(())
}

#[test]
fn test_missing_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.json");

    let (result, exit_code) = run_command(&[
        "view",
        "https://example.com",
        "--config",
        missing.to_str().unwrap(),
    ])?;

    assert_eq!(exit_code, 1);
    assert!(
        result["message"]
            .as_str()
            .unwrap()
            .contains("Failed to read config file")
    );
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "browser": "netscape" }"#)?;

    let (result, exit_code) =
        run_command(&["view", "https://example.com", "--config", path.to_str().unwrap()])?;

    assert_eq!(exit_code, 1);
    assert!(result["message"].as_str().unwrap().contains("Invalid config file"));
    Ok(())
}

#[test]
fn test_invalid_viewport_is_rejected() -> Result<()> {
    let (_, exit_code) = run_command(&["view", "https://example.com", "--viewport", "wide"])?;
    assert_ne!(exit_code, 0);
    Ok(())
}
