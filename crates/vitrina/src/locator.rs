//! Locator abstraction for declarative element selection.
//!
//! A [`Locator`] is an immutable (strategy, selector) pair describing zero or
//! more elements in the live render tree. It carries no element reference:
//! every accessor operation re-queries the tree through the driver, so a
//! locator can never go stale. First-match semantics apply to resolve
//! operations; `count`/`texts` observe all matches.

use std::time::Duration;

// =============================================================================
// SELECTOR
// =============================================================================

/// Selection strategy plus selector string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Element id (`document.getElementById`)
    Id(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Selector {
    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// JavaScript expression evaluating to the first match or `null`.
    #[must_use]
    pub fn to_first_query(&self) -> String {
        match self {
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(x) => format!(
                "document.evaluate({x:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
        }
    }

    /// JavaScript expression evaluating to an array of all matches.
    #[must_use]
    pub fn to_all_query(&self) -> String {
        match self {
            Self::Id(id) => format!("[document.getElementById({id:?})].filter(Boolean)"),
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(x) => format!(
                "(() => {{ const r = document.evaluate({x:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) {{ out.push(r.snapshotItem(i)); }} return out; }})()"
            ),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(x) => write!(f, "xpath={x}"),
        }
    }
}

// =============================================================================
// LOCATOR
// =============================================================================

/// A declarative reference to elements in the render tree.
///
/// Optionally carries a per-locator wait deadline that overrides the
/// session default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub const fn new(selector: Selector) -> Self {
        Self {
            selector,
            timeout: None,
        }
    }

    /// Locate by element id
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::new(Selector::Id(id.into()))
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::Css(selector.into()))
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::new(Selector::XPath(expression.into()))
    }

    /// Override the wait deadline for operations on this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the per-locator deadline override, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn first_query_by_id() {
            let sel = Selector::id("login2");
            assert_eq!(sel.to_first_query(), "document.getElementById(\"login2\")");
        }

        #[test]
        fn first_query_by_css() {
            let sel = Selector::css("#tbodyid h4 a");
            assert_eq!(
                sel.to_first_query(),
                "document.querySelector(\"#tbodyid h4 a\")"
            );
        }

        #[test]
        fn first_query_by_xpath_escapes_quotes() {
            let sel = Selector::xpath("//a[@onclick=\"byCat('phone')\"]");
            let query = sel.to_first_query();
            assert!(query.starts_with("document.evaluate(\"//a[@onclick=\\\"byCat"));
            assert!(query.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn all_query_by_id_filters_null() {
            let sel = Selector::id("nava");
            assert_eq!(
                sel.to_all_query(),
                "[document.getElementById(\"nava\")].filter(Boolean)"
            );
        }

        #[test]
        fn all_query_by_xpath_walks_snapshot() {
            let query = Selector::xpath("//div[@id='tbodyid']/div").to_all_query();
            assert!(query.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
            assert!(query.contains("snapshotItem(i)"));
        }

        #[test]
        fn display_is_strategy_prefixed() {
            assert_eq!(Selector::id("logout2").to_string(), "id=logout2");
            assert_eq!(Selector::css(".card").to_string(), "css=.card");
            assert_eq!(Selector::xpath("//h4").to_string(), "xpath=//h4");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn default_has_no_deadline_override() {
            let locator = Locator::id("nameofuser");
            assert!(locator.timeout().is_none());
        }

        #[test]
        fn with_timeout_overrides() {
            let locator = Locator::id("nameofuser").with_timeout(Duration::from_secs(5));
            assert_eq!(locator.timeout(), Some(Duration::from_secs(5)));
        }

        #[test]
        fn display_delegates_to_selector() {
            let locator = Locator::xpath("//button[@onclick='logIn()']");
            assert_eq!(locator.to_string(), "xpath=//button[@onclick='logIn()']");
        }

        #[test]
        fn equality_ignores_nothing() {
            assert_eq!(Locator::id("a"), Locator::id("a"));
            assert_ne!(Locator::id("a"), Locator::css("a"));
        }
    }
}
