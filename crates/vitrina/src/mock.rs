//! Scripted in-memory backend.
//!
//! Implements [`Driver`] over a scripted render tree instead of a real
//! browser, so synchronization semantics and page flows can be exercised
//! deterministically: elements appear and vanish on a schedule relative to
//! navigation, clicks trigger scripted effects, and dialogs queue like their
//! CDP counterparts. Pairs with `tokio::time::pause` for instant,
//! exact-timing tests.

use crate::dialog::{DialogKind, DialogMessage};
use crate::driver::{Driver, ElementSnapshot};
use crate::locator::{Locator, Selector};
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One scripted element in the mock render tree.
///
/// Appearance/vanishing offsets are relative to the most recent navigation.
#[derive(Debug, Clone)]
pub struct ScriptedElement {
    visible: bool,
    enabled: bool,
    text: String,
    texts: Option<Vec<String>>,
    appears_after: Duration,
    vanishes_after: Option<Duration>,
}

impl Default for ScriptedElement {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            text: String::new(),
            texts: None,
            appears_after: Duration::ZERO,
            vanishes_after: None,
        }
    }
}

impl ScriptedElement {
    /// A visible, enabled element present from navigation on
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first-match text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Script multiple matches; `texts` feeds all-matches observations
    #[must_use]
    pub fn with_texts(mut self, texts: Vec<String>) -> Self {
        self.texts = Some(texts);
        self
    }

    /// Present in the tree but not rendered (e.g. a closed modal)
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Present and rendered but not interactable
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Appear only after `delay` has elapsed since navigation
    #[must_use]
    pub const fn appearing_after(mut self, delay: Duration) -> Self {
        self.appears_after = delay;
        self
    }

    /// Leave the tree once `delay` has elapsed since navigation
    #[must_use]
    pub const fn vanishing_after(mut self, delay: Duration) -> Self {
        self.vanishes_after = Some(delay);
        self
    }

    fn all_texts(&self) -> Vec<String> {
        self.texts
            .clone()
            .unwrap_or_else(|| vec![self.text.clone()])
    }

    fn present_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.appears_after
            && self.vanishes_after.map_or(true, |gone| elapsed < gone)
    }
}

/// A mutation of the scripted tree triggered by a click.
#[derive(Debug, Clone)]
pub enum MockEffect {
    /// Make the element present and visible now
    Reveal(Selector),
    /// Keep the element in the tree but stop rendering it
    Hide(Selector),
    /// Drop the element from the tree
    Remove(Selector),
    /// Replace the first-match text
    SetText(Selector, String),
    /// Replace the all-matches text list
    SetTexts(Selector, Vec<String>),
    /// Open a modal dialog
    RaiseDialog(DialogKind, String),
}

#[derive(Debug, Default)]
struct MockState {
    opened_at: Option<Instant>,
    visited: Vec<String>,
    tree: HashMap<Selector, ScriptedElement>,
    on_click: HashMap<Selector, Vec<MockEffect>>,
    dialogs: VecDeque<DialogMessage>,
    clicks: Vec<Selector>,
    fills: Vec<(Selector, String)>,
    capture_bytes: Vec<u8>,
}

impl MockState {
    fn elapsed(&self) -> Option<Duration> {
        self.opened_at.map(|at| at.elapsed())
    }

    fn apply(&mut self, effect: &MockEffect) {
        match effect {
            MockEffect::Reveal(selector) => {
                let entry = self.tree.entry(selector.clone()).or_default();
                entry.visible = true;
                entry.appears_after = Duration::ZERO;
                entry.vanishes_after = None;
            }
            MockEffect::Hide(selector) => {
                if let Some(entry) = self.tree.get_mut(selector) {
                    entry.visible = false;
                }
            }
            MockEffect::Remove(selector) => {
                self.tree.remove(selector);
            }
            MockEffect::SetText(selector, text) => {
                self.tree.entry(selector.clone()).or_default().text = text.clone();
            }
            MockEffect::SetTexts(selector, texts) => {
                self.tree.entry(selector.clone()).or_default().texts = Some(texts.clone());
            }
            MockEffect::RaiseDialog(kind, text) => {
                self.dialogs.push_back(DialogMessage::new(*kind, text.clone()));
            }
        }
    }
}

/// In-memory [`Driver`] over a scripted render tree.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty mock page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a scripted element into the tree
    pub fn install(&self, locator: &Locator, element: ScriptedElement) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tree.insert(locator.selector().clone(), element);
    }

    /// Script effects applied when `locator` is clicked (replaces any
    /// previous script for that selector)
    pub fn on_click(&self, locator: &Locator, effects: Vec<MockEffect>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.on_click.insert(locator.selector().clone(), effects);
    }

    /// Open a dialog immediately
    pub fn raise_dialog(&self, kind: DialogKind, text: impl Into<String>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.dialogs.push_back(DialogMessage::new(kind, text.into()));
    }

    /// Set the bytes returned by capture operations
    pub fn set_capture_bytes(&self, bytes: Vec<u8>) {
        self.state.lock().expect("mock state poisoned").capture_bytes = bytes;
    }

    /// Selectors clicked so far, in order
    #[must_use]
    pub fn clicks(&self) -> Vec<Selector> {
        self.state.lock().expect("mock state poisoned").clicks.clone()
    }

    /// Last value written into `locator`, if any
    #[must_use]
    pub fn filled(&self, locator: &Locator) -> Option<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .fills
            .iter()
            .rev()
            .find(|(selector, _)| selector == locator.selector())
            .map(|(_, value)| value.clone())
    }

    /// URLs navigated to, in order
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.state.lock().expect("mock state poisoned").visited.clone()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.opened_at = Some(Instant::now());
        state.visited.push(url.to_string());
        Ok(())
    }

    async fn query(&self, locator: &Locator) -> VitrinaResult<Option<ElementSnapshot>> {
        let state = self.state.lock().expect("mock state poisoned");
        let Some(elapsed) = state.elapsed() else {
            return Ok(None);
        };
        Ok(state
            .tree
            .get(locator.selector())
            .filter(|element| element.present_at(elapsed))
            .map(|element| ElementSnapshot {
                visible: element.visible,
                enabled: element.enabled,
                text: element.text.trim().to_string(),
            }))
    }

    async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
        let state = self.state.lock().expect("mock state poisoned");
        let Some(elapsed) = state.elapsed() else {
            return Ok(0);
        };
        Ok(state
            .tree
            .get(locator.selector())
            .filter(|element| element.present_at(elapsed))
            .map_or(0, |element| element.all_texts().len()))
    }

    async fn texts(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
        let state = self.state.lock().expect("mock state poisoned");
        let Some(elapsed) = state.elapsed() else {
            return Ok(Vec::new());
        };
        Ok(state
            .tree
            .get(locator.selector())
            .filter(|element| element.present_at(elapsed))
            .map(|element| {
                element
                    .all_texts()
                    .iter()
                    .map(|text| text.trim().to_string())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        let present = state
            .elapsed()
            .and_then(|elapsed| {
                state
                    .tree
                    .get(locator.selector())
                    .map(|element| element.present_at(elapsed))
            })
            .unwrap_or(false);
        if !present {
            return Err(VitrinaError::Interaction {
                message: format!("no element matching {locator} to click"),
            });
        }
        state.clicks.push(locator.selector().clone());
        if let Some(effects) = state.on_click.get(locator.selector()).cloned() {
            for effect in &effects {
                state.apply(effect);
            }
        }
        Ok(())
    }

    async fn set_value(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        let present = state
            .elapsed()
            .and_then(|elapsed| {
                state
                    .tree
                    .get(locator.selector())
                    .map(|element| element.present_at(elapsed))
            })
            .unwrap_or(false);
        if !present {
            return Err(VitrinaError::Interaction {
                message: format!("no element matching {locator} to fill"),
            });
        }
        state.fills.push((locator.selector().clone(), text.to_string()));
        if let Some(element) = state.tree.get_mut(locator.selector()) {
            element.text = text.to_string();
        }
        Ok(())
    }

    async fn pending_dialog(&self) -> VitrinaResult<Option<DialogMessage>> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state.dialogs.front().cloned())
    }

    async fn resolve_dialog(&self, accept: bool) -> VitrinaResult<DialogMessage> {
        let mut state = self.state.lock().expect("mock state poisoned");
        tracing::trace!(accept, "resolving scripted dialog");
        state.dialogs.pop_front().ok_or_else(|| VitrinaError::Dialog {
            message: "no pending dialog to resolve".into(),
        })
    }

    async fn capture(&self) -> VitrinaResult<Vec<u8>> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state.capture_bytes.clone())
    }
}
