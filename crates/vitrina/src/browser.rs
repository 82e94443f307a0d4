//! Browser lifecycle and the CDP backend.
//!
//! With the `browser` feature enabled this module drives a real Chromium over
//! the Chrome DevTools Protocol via `chromiumoxide`. Element queries and
//! interactions are JavaScript evaluations against the live DOM; dialogs are
//! captured from `javascriptDialogOpening` events into a queue the accessor
//! polls. Without the feature only [`BrowserConfig`] is available.

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Path to a chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 900,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set window dimensions
    #[must_use]
    pub const fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::dialog::{DialogKind, DialogMessage};
    use crate::driver::{Driver, ElementSnapshot};
    use crate::locator::Locator;
    use crate::result::{VitrinaError, VitrinaResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams, DialogType,
        EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::task::JoinHandle;

    /// A running browser process
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<tokio::sync::Mutex<CdpBrowser>>,
        handle: JoinHandle<()>,
    }

    impl Browser {
        /// Launch a browser.
        ///
        /// # Errors
        ///
        /// Returns an error if the browser cannot be launched.
        pub async fn launch(config: BrowserConfig) -> VitrinaResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.window_width, config.window_height);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| VitrinaError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| VitrinaError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Drain CDP events for the lifetime of the browser
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: Arc::new(tokio::sync::Mutex::new(browser)),
                handle,
            })
        }

        /// Open a fresh page and return a driver for it.
        ///
        /// # Errors
        ///
        /// Returns an error if the page cannot be created.
        pub async fn new_driver(&self) -> VitrinaResult<CdpDriver> {
            let browser = self.inner.lock().await;
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            drop(browser);
            CdpDriver::attach(page).await
        }

        /// The launch configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser process.
        pub async fn close(self) -> VitrinaResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            drop(browser);
            self.handle.abort();
            Ok(())
        }
    }

    /// [`Driver`] over one CDP page.
    #[derive(Debug)]
    pub struct CdpDriver {
        page: CdpPage,
        dialogs: Arc<Mutex<VecDeque<DialogMessage>>>,
        listener: JoinHandle<()>,
    }

    impl CdpDriver {
        /// Wrap a page, subscribing to its dialog events.
        pub(crate) async fn attach(page: CdpPage) -> VitrinaResult<Self> {
            let dialogs = Arc::new(Mutex::new(VecDeque::new()));
            let mut events = page
                .event_listener::<EventJavascriptDialogOpening>()
                .await
                .map_err(|e| VitrinaError::Dialog {
                    message: e.to_string(),
                })?;

            let queue = Arc::clone(&dialogs);
            let listener = tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    let kind = match event.r#type {
                        DialogType::Alert => DialogKind::Alert,
                        DialogType::Confirm => DialogKind::Confirm,
                        DialogType::Prompt => DialogKind::Prompt,
                        DialogType::Beforeunload => DialogKind::BeforeUnload,
                    };
                    tracing::debug!(kind = %kind, message = %event.message, "dialog opened");
                    if let Ok(mut pending) = queue.lock() {
                        pending.push_back(DialogMessage::new(kind, event.message.clone()));
                    }
                }
            });

            Ok(Self {
                page,
                dialogs,
                listener,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> VitrinaResult<T> {
            let result =
                self.page
                    .evaluate(expr)
                    .await
                    .map_err(|e| VitrinaError::Evaluation {
                        message: e.to_string(),
                    })?;
            result.into_value().map_err(|e| VitrinaError::Evaluation {
                message: e.to_string(),
            })
        }
    }

    impl Drop for CdpDriver {
        fn drop(&mut self) {
            self.listener.abort();
        }
    }

    #[async_trait]
    impl Driver for CdpDriver {
        async fn navigate(&self, url: &str) -> VitrinaResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| VitrinaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn query(&self, locator: &Locator) -> VitrinaResult<Option<ElementSnapshot>> {
            let expr = format!(
                r#"(() => {{
    const el = {query};
    if (!el) {{ return null; }}
    const style = window.getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    const visible = style.display !== "none" && style.visibility !== "hidden"
        && rect.width > 0 && rect.height > 0;
    return {{
        visible: visible,
        enabled: !el.disabled,
        text: (el.textContent || "").trim(),
    }};
}})()"#,
                query = locator.selector().to_first_query()
            );
            self.eval(&expr).await
        }

        async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
            let expr = format!("({}).length", locator.selector().to_all_query());
            self.eval(&expr).await
        }

        async fn texts(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
            let expr = format!(
                "({}).map((el) => (el.textContent || \"\").trim())",
                locator.selector().to_all_query()
            );
            self.eval(&expr).await
        }

        async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
            // The click is deferred past this evaluation: a handler that opens
            // a synchronous alert() would otherwise block the CDP response.
            let expr = format!(
                "(() => {{ const el = {query}; if (!el) {{ return false; }} setTimeout(() => el.click(), 0); return true; }})()",
                query = locator.selector().to_first_query()
            );
            let clicked: bool = self.eval(&expr).await?;
            if clicked {
                Ok(())
            } else {
                Err(VitrinaError::Interaction {
                    message: format!("no element matching {locator} to click"),
                })
            }
        }

        async fn set_value(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
            let expr = format!(
                r#"(() => {{
    const el = {query};
    if (!el) {{ return false; }}
    el.value = "";
    el.value = {text:?};
    el.dispatchEvent(new Event("input", {{ bubbles: true }}));
    el.dispatchEvent(new Event("change", {{ bubbles: true }}));
    return true;
}})()"#,
                query = locator.selector().to_first_query()
            );
            let filled: bool = self.eval(&expr).await?;
            if filled {
                Ok(())
            } else {
                Err(VitrinaError::Interaction {
                    message: format!("no element matching {locator} to fill"),
                })
            }
        }

        async fn pending_dialog(&self) -> VitrinaResult<Option<DialogMessage>> {
            let pending = self
                .dialogs
                .lock()
                .map(|queue| queue.front().cloned())
                .unwrap_or_default();
            Ok(pending)
        }

        async fn resolve_dialog(&self, accept: bool) -> VitrinaResult<DialogMessage> {
            let message = self
                .dialogs
                .lock()
                .ok()
                .and_then(|mut queue| queue.pop_front())
                .ok_or_else(|| VitrinaError::Dialog {
                    message: "no pending dialog to resolve".into(),
                })?;

            let params = HandleJavaScriptDialogParams::builder()
                .accept(accept)
                .build()
                .map_err(|e| VitrinaError::Dialog { message: e })?;
            self.page
                .execute(params)
                .await
                .map_err(|e| VitrinaError::Dialog {
                    message: e.to_string(),
                })?;
            Ok(message)
        }

        async fn capture(&self) -> VitrinaResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let screenshot =
                self.page
                    .execute(params)
                    .await
                    .map_err(|e| VitrinaError::Screenshot {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| VitrinaError::Screenshot {
                    message: e.to_string(),
                })
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, CdpDriver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_headless_and_sandboxed() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn config_builders_chain() {
        let config = BrowserConfig::default()
            .with_window(1920, 1080)
            .with_headless(false)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
