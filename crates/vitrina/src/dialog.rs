//! Modal dialog handling.
//!
//! The target site signals login/signup outcomes through JavaScript alerts,
//! so dialogs are first-class observations here. An [`Alert`] is a handle to
//! one pending dialog; dismissing it consumes the handle, which makes
//! at-most-once dismissal a compile-time guarantee rather than a runtime
//! check.

use crate::driver::Driver;
use crate::report::Reporter;
use crate::result::VitrinaResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Type of modal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogKind {
    /// Alert dialog (OK button only)
    Alert,
    /// Confirm dialog (OK/Cancel buttons)
    Confirm,
    /// Prompt dialog (text input + OK/Cancel)
    Prompt,
    /// Before unload dialog (Leave/Stay buttons)
    BeforeUnload,
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Confirm => write!(f, "confirm"),
            Self::Prompt => write!(f, "prompt"),
            Self::BeforeUnload => write!(f, "beforeunload"),
        }
    }
}

/// A dialog observed on the page, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogMessage {
    /// Dialog type
    pub kind: DialogKind,
    /// Message displayed in the dialog
    pub text: String,
}

impl DialogMessage {
    /// Create a dialog observation
    #[must_use]
    pub fn new(kind: DialogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Handle to one open dialog, returned by
/// [`Session::wait_for_alert`](crate::Session::wait_for_alert).
///
/// The handle owns its dialog: reading and dismissing consumes `self`, so a
/// dialog instance can be resolved at most once. A later `wait_for_alert`
/// blocks until a new dialog opens.
pub struct Alert {
    driver: Arc<dyn Driver>,
    reporter: Reporter,
    message: DialogMessage,
}

impl Alert {
    pub(crate) fn new(driver: Arc<dyn Driver>, reporter: Reporter, message: DialogMessage) -> Self {
        Self {
            driver,
            reporter,
            message,
        }
    }

    /// Dialog text, readable before deciding to dismiss
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message.text
    }

    /// Dialog type
    #[must_use]
    pub fn kind(&self) -> DialogKind {
        self.message.kind
    }

    /// Capture the dialog text, attach it to the report sink, accept the
    /// dialog, and return the text.
    pub async fn read_and_dismiss(self) -> VitrinaResult<String> {
        self.reporter.attach_text("alert text", &self.message.text);
        tracing::debug!(kind = %self.message.kind, text = %self.message.text, "dismissing dialog");
        self.driver.resolve_dialog(true).await?;
        Ok(self.message.text)
    }
}

impl std::fmt::Debug for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alert")
            .field("kind", &self.message.kind)
            .field("text", &self.message.text)
            .finish_non_exhaustive()
    }
}
