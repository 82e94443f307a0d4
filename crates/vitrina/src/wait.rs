//! Wait mechanisms for render-tree synchronization.
//!
//! The target page mutates asynchronously (network calls, JS timers) with no
//! deterministic ready signal, so every resolving operation is a bounded
//! polling loop: re-query at a fixed interval until a [`Condition`] holds or
//! the deadline passes.

use crate::driver::ElementSnapshot;
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default wait deadline (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Deadline in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get the deadline as a Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the polling interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// CONDITION
// =============================================================================

/// A predicate over the render tree, evaluated repeatedly against a session
/// until it holds or a deadline is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Element exists in the render tree
    Present,
    /// Element exists, is visible, and is enabled
    Clickable,
    /// Element exists and is visible
    Visible,
    /// No visible element matches (absence counts)
    Invisible,
    /// A modal dialog is open
    AlertPresent,
}

impl Condition {
    /// Evaluate the condition against an observation of the first match.
    ///
    /// `None` means no element matched. [`Condition::AlertPresent`] is judged
    /// against the session's dialog queue, not against element observations,
    /// and always reports `false` here.
    #[must_use]
    pub fn holds(&self, snapshot: Option<&ElementSnapshot>) -> bool {
        match self {
            Self::Present => snapshot.is_some(),
            Self::Clickable => snapshot.is_some_and(|s| s.visible && s.enabled),
            Self::Visible => snapshot.is_some_and(|s| s.visible),
            Self::Invisible => snapshot.map_or(true, |s| !s.visible),
            Self::AlertPresent => false,
        }
    }

    /// Describe the condition for timeout messages, e.g. `"presence of id=login2"`.
    #[must_use]
    pub fn describe(&self, target: &str) -> String {
        match self {
            Self::Present => format!("presence of {target}"),
            Self::Clickable => format!("clickability of {target}"),
            Self::Visible => format!("visibility of {target}"),
            Self::Invisible => format!("disappearance of {target}"),
            Self::AlertPresent => "an open alert".to_string(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Present => "present",
            Self::Clickable => "clickable",
            Self::Visible => "visible",
            Self::Invisible => "invisible",
            Self::AlertPresent => "alert-present",
        };
        write!(f, "{name}")
    }
}
