use super::*;
use anyhow::Context;

#[test]
fn test_exit_codes() {
    let not_found = PagelensError::ElementNotFound {
        index: 4,
        available: 2,
    };
    assert_eq!(not_found.exit_code(), 2);
    assert_eq!(
        not_found.to_string(),
        "No interactive element with index 4 (2 indexed)"
    );

    assert_eq!(PagelensError::WebDriverFailed("x".into()).exit_code(), 4);
    assert_eq!(PagelensError::Timeout("x".into()).exit_code(), 5);
    assert_eq!(
        PagelensError::Other(anyhow::anyhow!("boom")).exit_code(),
        1
    );
}

#[test]
fn test_typed_errors_survive_anyhow() {
    let err: anyhow::Error = PagelensError::ElementNotFound {
        index: 1,
        available: 0,
    }
    .into();
    let err = PagelensError::from(err.context("clicking element"));
    // Context wraps the error, so downcasting still finds it
    assert!(matches!(err, PagelensError::ElementNotFound { index: 1, .. }));
}

#[test]
fn test_snapshot_errors_map_to_exit_code_6() {
    let snapshot = crate::dom::Document::from_snapshot(serde_json::json!({})).unwrap_err();
    let err = PagelensError::from(anyhow::Error::new(snapshot));
    assert!(matches!(err, PagelensError::Snapshot(_)));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_message_classification() {
    let err: Result<(), anyhow::Error> = Err(anyhow::anyhow!("connection refused"));
    let err = PagelensError::from(err.context("Failed to connect to WebDriver").unwrap_err());
    assert_eq!(err.exit_code(), 4);

    let err = PagelensError::from(anyhow::anyhow!("click timed out after 5s"));
    assert_eq!(err.exit_code(), 5);

    let err = PagelensError::from(anyhow::anyhow!("something else"));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "something else");
}
