//! Synchronized element accessor.
//!
//! A [`Session`] wraps one browser backend for the lifetime of one test and
//! resolves declarative locators against the live render tree. Each resolving
//! operation is a bounded polling loop: re-query at a fixed interval until
//! the condition holds or the deadline passes, then return the observation or
//! fail with [`VitrinaError::Timeout`]. Visibility and disappearance checks
//! fold the deadline into a boolean because absence there is an expected
//! terminal state, not an error.

use crate::dialog::Alert;
use crate::driver::{Driver, ElementSnapshot};
use crate::locator::Locator;
use crate::report::Reporter;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{Condition, WaitOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One test's exclusive handle to a live page.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    reporter: Reporter,
    wait: WaitOptions,
}

impl Session {
    /// Create a session over a backend with default wait options
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, reporter: Reporter) -> Self {
        Self {
            driver,
            reporter,
            wait: WaitOptions::default(),
        }
    }

    /// Override the default wait options
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The session's report sink
    #[must_use]
    pub const fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Effective wait options for a locator: the session defaults, with the
    /// deadline replaced by the locator's override if it carries one.
    fn wait_for(&self, locator: &Locator) -> WaitOptions {
        match locator.timeout() {
            Some(timeout) => {
                let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                self.wait.with_timeout(ms)
            }
            None => self.wait,
        }
    }

    /// Navigate to `url`.
    pub async fn open(&self, url: &str) -> VitrinaResult<()> {
        self.reporter.step(format!("open {url}"));
        tracing::info!(url, "navigating");
        self.driver.navigate(url).await
    }

    /// Poll until `condition` holds for `locator` or the deadline passes.
    ///
    /// `Ok(Some(snapshot))` carries the observation that satisfied the
    /// condition (a default snapshot when the condition is satisfied by
    /// absence); `Ok(None)` is deadline expiry.
    async fn settle_on(
        &self,
        locator: &Locator,
        condition: Condition,
    ) -> VitrinaResult<Option<ElementSnapshot>> {
        let options = self.wait_for(locator);
        let started = Instant::now();
        loop {
            let snapshot = self.driver.query(locator).await?;
            if condition.holds(snapshot.as_ref()) {
                tracing::debug!(%locator, %condition, elapsed = ?started.elapsed(), "condition held");
                return Ok(Some(snapshot.unwrap_or_default()));
            }
            if started.elapsed() >= options.timeout() {
                tracing::debug!(%locator, %condition, timeout_ms = options.timeout_ms, "deadline passed");
                return Ok(None);
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    fn timed_out(&self, locator: &Locator, condition: Condition) -> VitrinaError {
        VitrinaError::Timeout {
            ms: self.wait_for(locator).timeout_ms,
            waiting_for: condition.describe(&locator.to_string()),
        }
    }

    /// Resolve the locator once an element is present in the render tree.
    pub async fn wait_for_present(&self, locator: &Locator) -> VitrinaResult<ElementSnapshot> {
        self.reporter.step(format!("wait for {locator}"));
        self.settle_on(locator, Condition::Present)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Present))
    }

    /// Resolve the locator once an element is present and visible.
    pub async fn wait_for_visible(&self, locator: &Locator) -> VitrinaResult<ElementSnapshot> {
        self.reporter.step(format!("wait for visible {locator}"));
        self.settle_on(locator, Condition::Visible)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Visible))
    }

    /// Resolve the locator once an element is present and interactable.
    pub async fn wait_for_clickable(&self, locator: &Locator) -> VitrinaResult<ElementSnapshot> {
        self.reporter.step(format!("wait for clickable {locator}"));
        self.settle_on(locator, Condition::Clickable)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Clickable))
    }

    /// Resolve clickable, then click. Interaction faults from the backend
    /// propagate verbatim.
    pub async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.reporter.step(format!("click {locator}"));
        self.settle_on(locator, Condition::Clickable)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Clickable))?;
        self.driver.click(locator).await
    }

    /// Resolve present, clear existing content, write `text`.
    pub async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        self.reporter.step(format!("fill {locator}"));
        self.settle_on(locator, Condition::Present)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Present))?;
        self.driver.set_value(locator, text).await
    }

    /// Resolve present and return the element's trimmed text content.
    pub async fn text_content(&self, locator: &Locator) -> VitrinaResult<String> {
        self.reporter.step(format!("read text of {locator}"));
        let snapshot = self
            .settle_on(locator, Condition::Present)
            .await?
            .ok_or_else(|| self.timed_out(locator, Condition::Present))?;
        Ok(snapshot.text)
    }

    /// Poll until the locator is visible or the deadline passes.
    ///
    /// Deadline expiry is `Ok(false)`, never a `Timeout` error; only backend
    /// faults surface as errors.
    pub async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.reporter.step(format!("check visibility of {locator}"));
        Ok(self.settle_on(locator, Condition::Visible).await?.is_some())
    }

    /// Poll until no visible element matches, or the deadline passes.
    ///
    /// Deadline expiry is `Ok(false)`; disappearance is an expected terminal
    /// state, not an error.
    pub async fn wait_for_gone(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.reporter.step(format!("wait for {locator} to disappear"));
        Ok(self.settle_on(locator, Condition::Invisible).await?.is_some())
    }

    /// Count all elements currently matching the locator (no wait).
    pub async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
        self.reporter.step(format!("count {locator}"));
        self.driver.count(locator).await
    }

    /// Trimmed text of all elements currently matching the locator (no wait).
    pub async fn texts(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
        self.reporter.step(format!("read all texts of {locator}"));
        self.driver.texts(locator).await
    }

    /// Poll until a modal dialog is open and return a handle to it.
    ///
    /// The handle owns the dialog; see [`Alert::read_and_dismiss`]. After the
    /// handle is consumed, this method blocks until a *new* dialog opens.
    pub async fn wait_for_alert(&self) -> VitrinaResult<Alert> {
        self.reporter.step("wait for alert");
        let options = self.wait;
        let started = Instant::now();
        loop {
            if let Some(message) = self.driver.pending_dialog().await? {
                tracing::debug!(kind = %message.kind, text = %message.text, "dialog open");
                return Ok(Alert::new(
                    Arc::clone(&self.driver),
                    self.reporter.clone(),
                    message,
                ));
            }
            if started.elapsed() >= options.timeout() {
                return Err(VitrinaError::Timeout {
                    ms: options.timeout_ms,
                    waiting_for: Condition::AlertPresent.describe(""),
                });
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    /// Capture the current render state, attach it to the report sink under
    /// `name`, and return the PNG bytes.
    pub async fn capture_snapshot(&self, name: &str) -> VitrinaResult<Vec<u8>> {
        self.reporter.step(format!("capture snapshot {name:?}"));
        let bytes = self.driver.capture().await?;
        self.reporter.attach_png(name, bytes.clone());
        Ok(bytes)
    }

    /// Fixed pause, for page updates that expose no detectable signal.
    ///
    /// Prefer condition-based waits wherever the page offers a signal; this
    /// exists for the few transitions that don't.
    pub async fn settle(&self, duration: Duration) {
        self.reporter
            .step(format!("settle for {}ms", duration.as_millis()));
        tokio::time::sleep(duration).await;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}
