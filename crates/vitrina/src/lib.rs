//! Vitrina: synchronized element access and page flows for storefront E2E
//! testing.
//!
//! Vitrina (Spanish: "shop window") validates user-facing behaviors of a
//! public e-commerce demo site (login, signup, category filtering) through a
//! browser backend, tolerating the asynchronous render timeline of a remote
//! page with bounded polling instead of fixed sleeps.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │   scenario tests                                                 │
//! │     └─► Storefront (locators + business flows)                   │
//! │           └─► Session (poll until condition or deadline)         │
//! │                 └─► Driver (capability seam)                     │
//! │                       ├─► CdpDriver  (chromiumoxide, `browser`)  │
//! │                       └─► MockDriver (scripted render tree)      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every resolving operation either returns a satisfied condition's
//! observation or fails with a timeout; visibility and disappearance checks
//! fold the deadline into a boolean, because absence there is an expected
//! terminal state.

#![warn(missing_docs)]

/// Browser lifecycle and the CDP backend (`browser` feature)
pub mod browser;

/// Suite configuration and test-data generators
pub mod config;

/// Modal dialog observations and the owning alert handle
pub mod dialog;

/// Capability seam between the accessor and a backend
pub mod driver;

/// Locator abstraction for declarative element selection
pub mod locator;

/// Scripted in-memory backend for deterministic tests
pub mod mock;

/// Page flow objects
pub mod pages;

/// Report sink: step annotations and named attachments
pub mod report;

mod result;

/// Synchronized element accessor
pub mod session;

/// Wait options and conditions
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::{Browser, CdpDriver};
pub use browser::BrowserConfig;
pub use config::{random_password, random_username, SuiteConfig};
pub use dialog::{Alert, DialogKind, DialogMessage};
pub use driver::{Driver, ElementSnapshot};
pub use locator::{Locator, Selector};
pub use mock::{MockDriver, MockEffect, ScriptedElement};
pub use pages::{looks_like_phone, Category, KeywordScan, PageFlow, Storefront, PHONE_KEYWORDS};
pub use report::{Attachment, AttachmentBody, Reporter, StepRecord};
pub use result::{VitrinaError, VitrinaResult};
pub use session::Session;
pub use wait::{Condition, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
