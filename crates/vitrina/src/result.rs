//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur in Vitrina
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// A wait condition was never satisfied within its deadline.
    ///
    /// The only error the synchronized accessor raises on its own; every
    /// other variant is a fault propagated verbatim from the browser backend
    /// or the report sink.
    #[error("timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Deadline in milliseconds
        ms: u64,
        /// Description of the condition that never held
        waiting_for: String,
    },

    /// Browser launch error
    #[error("failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation against the render tree failed
    #[error("evaluation failed: {message}")]
    Evaluation {
        /// Error message
        message: String,
    },

    /// An interaction (click, fill) faulted after the element resolved
    #[error("interaction failed: {message}")]
    Interaction {
        /// Error message
        message: String,
    },

    /// Screenshot capture error
    #[error("screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Dialog handling error
    #[error("dialog error: {message}")]
    Dialog {
        /// Error message
        message: String,
    },

    /// Report sink error
    #[error("report error: {message}")]
    Report {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitrinaError {
    /// Whether this error is a wait deadline expiry.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
