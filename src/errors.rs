use thiserror::Error;

use crate::dom::SnapshotError;

/// Error type that carries a process exit code
#[derive(Debug, Error)]
pub enum PagelensError {
    /// No indexed element at the requested index (exit code 2)
    #[error("No interactive element with index {index} ({available} indexed)")]
    ElementNotFound { index: usize, available: usize },
    /// WebDriver connection failed (exit code 4)
    #[error("WebDriver connection failed: {0}")]
    WebDriverFailed(String),
    /// Operation timeout (exit code 5)
    #[error("Operation timed out: {0}")]
    Timeout(String),
    /// The page collector returned something unusable (exit code 6)
    #[error("Malformed page snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    /// Generic error (exit code 1)
    #[error(transparent)]
    Other(anyhow::Error),
}

impl PagelensError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PagelensError::ElementNotFound { .. } => 2,
            PagelensError::WebDriverFailed(_) => 4,
            PagelensError::Timeout(_) => 5,
            PagelensError::Snapshot(_) => 6,
            PagelensError::Other(_) => 1,
        }
    }
}

impl From<anyhow::Error> for PagelensError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<PagelensError>() {
            Ok(typed) => return typed,
            Err(err) => err,
        };
        let err = match err.downcast::<SnapshotError>() {
            Ok(snapshot) => return PagelensError::Snapshot(snapshot),
            Err(err) => err,
        };

        // Fall back to the message for errors raised by fantoccini or reqwest
        let msg = format!("{err:#}");
        if msg.contains("Failed to connect to WebDriver")
            || msg.contains("WebDriver")
            || msg.contains("geckodriver")
            || msg.contains("chromedriver")
        {
            PagelensError::WebDriverFailed(msg)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            PagelensError::Timeout(msg)
        } else {
            PagelensError::Other(err)
        }
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
