//! Capability seam between the synchronized accessor and a browser backend.
//!
//! The accessor is a pure consumer of this capability set: navigation,
//! render-tree query, interaction primitives, dialog handling, and image
//! capture. Two backends implement it: the CDP backend in
//! [`browser`](crate::browser) (behind the `browser` feature) and the
//! scripted in-memory backend in [`mock`](crate::mock).

use crate::dialog::DialogMessage;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Point-in-time observation of the first element matched by a locator.
///
/// Immutable once captured. The accessor hands these out instead of live
/// element references, so a stale handle cannot escape: every interaction
/// re-resolves against the live tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Rendered with non-zero box and not hidden by style
    pub visible: bool,
    /// Not disabled for interaction
    pub enabled: bool,
    /// Trimmed text content
    pub text: String,
}

/// One browser backend driving one live page.
///
/// Implementations must be cheap to share (`Arc<dyn Driver>`); all methods
/// take `&self` and observe or mutate the live render tree at call time.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the page to `url`.
    async fn navigate(&self, url: &str) -> VitrinaResult<()>;

    /// Observe the first element matching `locator`, or `None` if absent.
    async fn query(&self, locator: &Locator) -> VitrinaResult<Option<ElementSnapshot>>;

    /// Count all elements matching `locator`.
    async fn count(&self, locator: &Locator) -> VitrinaResult<usize>;

    /// Trimmed text content of every element matching `locator`.
    async fn texts(&self, locator: &Locator) -> VitrinaResult<Vec<String>>;

    /// Click the first element matching `locator`.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::Interaction`](crate::VitrinaError::Interaction)
    /// if no element matches at interaction time.
    async fn click(&self, locator: &Locator) -> VitrinaResult<()>;

    /// Clear the first matching element's value and write `text`.
    async fn set_value(&self, locator: &Locator, text: &str) -> VitrinaResult<()>;

    /// Peek the oldest unhandled modal dialog, without resolving it.
    async fn pending_dialog(&self) -> VitrinaResult<Option<DialogMessage>>;

    /// Resolve the oldest unhandled dialog, accepting or declining it.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::Dialog`](crate::VitrinaError::Dialog) if no
    /// dialog is pending.
    async fn resolve_dialog(&self, accept: bool) -> VitrinaResult<DialogMessage>;

    /// Capture the current render state as PNG bytes.
    async fn capture(&self) -> VitrinaResult<Vec<u8>>;
}
