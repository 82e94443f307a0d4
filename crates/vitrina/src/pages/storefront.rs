//! Storefront page flows for the demoblaze demo shop.
//!
//! Declares the storefront's locator set and composes accessor calls into
//! business flows: login, signup, logout, category filtering. Modal
//! transitions are condition-based waits (modal visible / modal gone); only
//! category switching keeps a fixed settle-delay, because it re-renders the
//! same card list in place with no detectable signal.

use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::pages::PageFlow;
use crate::report::Reporter;
use crate::result::VitrinaResult;
use crate::session::Session;
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;

/// Pause after a category click; the card grid re-renders in place.
const CATEGORY_SETTLE: Duration = Duration::from_secs(2);

/// Deadline for the logged-in check; the welcome banner either renders
/// promptly after a successful login or not at all.
const LOGGED_IN_CHECK: Duration = Duration::from_secs(5);

/// Brand keywords that phone titles on the storefront match.
pub const PHONE_KEYWORDS: [&str; 7] = [
    "samsung", "nokia", "nexus", "iphone", "htc", "sony", "lumia",
];

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Whether a product title looks like a phone, per [`PHONE_KEYWORDS`].
#[must_use]
pub fn looks_like_phone(title: &str) -> bool {
    let pattern = PHONE_PATTERN.get_or_init(|| {
        Regex::new(&format!("(?i){}", PHONE_KEYWORDS.join("|")))
            .expect("keyword alternation is a valid pattern")
    });
    pattern.is_match(title)
}

// =============================================================================
// LOCATORS
// =============================================================================

fn navbar_brand() -> Locator {
    Locator::id("nava")
}

fn login_link() -> Locator {
    Locator::id("login2")
}

fn signup_link() -> Locator {
    Locator::id("signin2")
}

fn logout_link() -> Locator {
    Locator::id("logout2")
}

fn username_display() -> Locator {
    Locator::id("nameofuser")
}

fn login_modal() -> Locator {
    Locator::id("logInModal")
}

fn login_username_input() -> Locator {
    Locator::id("loginusername")
}

fn login_password_input() -> Locator {
    Locator::id("loginpassword")
}

fn login_button() -> Locator {
    Locator::xpath("//button[@onclick='logIn()']")
}

fn login_close_button() -> Locator {
    Locator::xpath("//div[@id='logInModal']//button[@class='close']")
}

fn signup_modal() -> Locator {
    Locator::id("signInModal")
}

fn signup_username_input() -> Locator {
    Locator::id("sign-username")
}

fn signup_password_input() -> Locator {
    Locator::id("sign-password")
}

fn signup_button() -> Locator {
    Locator::xpath("//button[@onclick='register()']")
}

fn signup_close_button() -> Locator {
    Locator::xpath("//div[@id='signInModal']//button[@class='close']")
}

fn product_cards() -> Locator {
    Locator::xpath("//div[@id='tbodyid']/div")
}

fn product_titles() -> Locator {
    Locator::xpath("//div[@id='tbodyid']//h4/a")
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Product category in the storefront sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Phones
    Phones,
    /// Laptops
    Laptops,
    /// Monitors
    Monitors,
}

impl Category {
    /// Display label in the sidebar
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Phones => "Phones",
            Self::Laptops => "Laptops",
            Self::Monitors => "Monitors",
        }
    }

    /// Sidebar link for this category
    #[must_use]
    pub fn link(&self) -> Locator {
        let tag = match self {
            Self::Phones => "phone",
            Self::Laptops => "notebook",
            Self::Monitors => "monitor",
        };
        Locator::xpath(format!("//a[@onclick=\"byCat('{tag}')\"]"))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// KEYWORD SCAN
// =============================================================================

/// Result of checking displayed titles against a keyword.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordScan {
    /// Number of titles observed
    pub total: usize,
    /// How many contained the keyword (case-insensitive)
    pub matching: usize,
    /// Every observed title
    pub titles: Vec<String>,
    /// The titles that matched
    pub matching_titles: Vec<String>,
}

// =============================================================================
// STOREFRONT
// =============================================================================

/// The demoblaze landing page: navigation, auth modals, category grid.
#[derive(Debug)]
pub struct Storefront {
    session: Session,
    config: SuiteConfig,
}

impl Storefront {
    /// Create a storefront flow object over a session.
    #[must_use]
    pub const fn new(session: Session, config: SuiteConfig) -> Self {
        Self { session, config }
    }

    /// The underlying session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The suite configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn reporter(&self) -> &Reporter {
        self.session.reporter()
    }

    // ------------------------------------------------------------------
    // login
    // ------------------------------------------------------------------

    /// Open the login modal and wait until it renders.
    pub async fn open_login_modal(&self) -> VitrinaResult<()> {
        self.session.click(&login_link()).await?;
        self.session.wait_for_visible(&login_modal()).await?;
        Ok(())
    }

    /// Fill the login form.
    pub async fn enter_login_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> VitrinaResult<()> {
        self.session.fill(&login_username_input(), username).await?;
        self.session.fill(&login_password_input(), password).await
    }

    /// Press the Log in button. The outcome (welcome banner or alert) is the
    /// caller's signal; nothing is waited for here.
    pub async fn submit_login(&self) -> VitrinaResult<()> {
        self.session.click(&login_button()).await
    }

    /// Full login flow: open modal, fill credentials, submit.
    pub async fn login(&self, username: &str, password: &str) -> VitrinaResult<()> {
        tracing::info!(username, "logging in");
        self.open_login_modal().await?;
        self.enter_login_credentials(username, password).await?;
        self.submit_login().await
    }

    /// Close the login modal and wait for it to leave the screen.
    pub async fn close_login_modal(&self) -> VitrinaResult<bool> {
        self.session.click(&login_close_button()).await?;
        self.session.wait_for_gone(&login_modal()).await
    }

    /// Whether the welcome banner is rendered.
    pub async fn is_logged_in(&self) -> VitrinaResult<bool> {
        self.session
            .is_visible(&username_display().with_timeout(LOGGED_IN_CHECK))
            .await
    }

    /// The logged-in display name, without the `"Welcome "` prefix.
    pub async fn logged_in_username(&self) -> VitrinaResult<String> {
        let banner = self.session.text_content(&username_display()).await?;
        Ok(banner
            .strip_prefix("Welcome ")
            .unwrap_or(&banner)
            .trim()
            .to_string())
    }

    /// Log out and wait for the welcome banner to leave the navigation.
    pub async fn logout(&self) -> VitrinaResult<bool> {
        tracing::info!("logging out");
        self.session.click(&logout_link()).await?;
        self.session.wait_for_gone(&username_display()).await
    }

    // ------------------------------------------------------------------
    // signup
    // ------------------------------------------------------------------

    /// Open the signup modal and wait until it renders.
    pub async fn open_signup_modal(&self) -> VitrinaResult<()> {
        self.session.click(&signup_link()).await?;
        self.session.wait_for_visible(&signup_modal()).await?;
        Ok(())
    }

    /// Fill the signup form.
    pub async fn enter_signup_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> VitrinaResult<()> {
        self.session.fill(&signup_username_input(), username).await?;
        self.session.fill(&signup_password_input(), password).await
    }

    /// Press the Sign up button.
    pub async fn submit_signup(&self) -> VitrinaResult<()> {
        self.session.click(&signup_button()).await
    }

    /// Full signup flow: open modal, fill credentials, submit.
    pub async fn signup(&self, username: &str, password: &str) -> VitrinaResult<()> {
        tracing::info!(username, "signing up");
        self.open_signup_modal().await?;
        self.enter_signup_credentials(username, password).await?;
        self.submit_signup().await
    }

    /// Close the signup modal and wait for it to leave the screen.
    pub async fn close_signup_modal(&self) -> VitrinaResult<bool> {
        self.session.click(&signup_close_button()).await?;
        self.session.wait_for_gone(&signup_modal()).await
    }

    /// Wait for the signup modal to close on its own (after a successful
    /// registration is acknowledged).
    pub async fn wait_for_signup_modal_close(&self) -> VitrinaResult<bool> {
        self.session.wait_for_gone(&signup_modal()).await
    }

    // ------------------------------------------------------------------
    // categories
    // ------------------------------------------------------------------

    /// Filter the grid by a category.
    pub async fn select_category(&self, category: Category) -> VitrinaResult<()> {
        tracing::info!(category = %category, "selecting category");
        self.session.click(&category.link()).await?;
        self.session.settle(CATEGORY_SETTLE).await;
        Ok(())
    }

    /// Number of product cards currently displayed.
    pub async fn product_count(&self) -> VitrinaResult<usize> {
        let count = self.session.count(&product_cards()).await?;
        self.reporter()
            .attach_text("product count", count.to_string());
        Ok(count)
    }

    /// Titles of all displayed products.
    pub async fn product_titles(&self) -> VitrinaResult<Vec<String>> {
        self.session.wait_for_present(&product_cards()).await?;
        let titles = self.session.texts(&product_titles()).await?;
        self.reporter().attach_text("product titles", titles.join("\n"));
        Ok(titles)
    }

    /// Check displayed titles against a keyword (case-insensitive).
    pub async fn scan_titles_for(&self, keyword: &str) -> VitrinaResult<KeywordScan> {
        let titles = self.product_titles().await?;
        let needle = keyword.to_lowercase();
        let matching_titles: Vec<String> = titles
            .iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let scan = KeywordScan {
            total: titles.len(),
            matching: matching_titles.len(),
            titles,
            matching_titles,
        };
        self.reporter().attach_text(
            format!("keyword scan: {keyword}"),
            format!("{} of {} titles contain {keyword:?}", scan.matching, scan.total),
        );
        Ok(scan)
    }
}

#[async_trait]
impl PageFlow for Storefront {
    async fn open(&self) -> VitrinaResult<()> {
        self.session.open(&self.config.base_url).await
    }

    async fn is_ready(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&navbar_brand()).await
    }

    fn name(&self) -> &str {
        "storefront"
    }
}
