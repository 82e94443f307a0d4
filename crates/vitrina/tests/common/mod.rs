//! Scripted storefront shared by the scenario tests.
//!
//! Scripts a `MockDriver` to behave like the demoblaze landing page: auth
//! modals hidden until their nav links are clicked, a product grid that
//! re-renders on category clicks, and alert dialogs raised by form buttons.
//! Individual tests overlay outcome-specific scripts (e.g. what pressing
//! "Log in" does) on top of this base.

#![allow(dead_code)]

use std::sync::Arc;
use vitrina::{
    Category, Driver, Locator, MockDriver, MockEffect, Reporter, ScriptedElement, Session,
    Storefront, SuiteConfig, WaitOptions,
};

/// Tight deadlines; the mock clock is paused so polls are instant anyway.
pub const SNAPPY: WaitOptions = WaitOptions {
    timeout_ms: 2_000,
    poll_interval_ms: 20,
};

pub const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4e, 0x47];

// ---------------------------------------------------------------------------
// locators, mirrored from the live site's DOM
// ---------------------------------------------------------------------------

pub fn navbar_brand() -> Locator {
    Locator::id("nava")
}

pub fn login_link() -> Locator {
    Locator::id("login2")
}

pub fn signup_link() -> Locator {
    Locator::id("signin2")
}

pub fn logout_link() -> Locator {
    Locator::id("logout2")
}

pub fn username_display() -> Locator {
    Locator::id("nameofuser")
}

pub fn login_modal() -> Locator {
    Locator::id("logInModal")
}

pub fn login_username_input() -> Locator {
    Locator::id("loginusername")
}

pub fn login_password_input() -> Locator {
    Locator::id("loginpassword")
}

pub fn login_button() -> Locator {
    Locator::xpath("//button[@onclick='logIn()']")
}

pub fn login_close_button() -> Locator {
    Locator::xpath("//div[@id='logInModal']//button[@class='close']")
}

pub fn signup_modal() -> Locator {
    Locator::id("signInModal")
}

pub fn signup_username_input() -> Locator {
    Locator::id("sign-username")
}

pub fn signup_password_input() -> Locator {
    Locator::id("sign-password")
}

pub fn signup_button() -> Locator {
    Locator::xpath("//button[@onclick='register()']")
}

pub fn signup_close_button() -> Locator {
    Locator::xpath("//div[@id='signInModal']//button[@class='close']")
}

pub fn product_cards() -> Locator {
    Locator::xpath("//div[@id='tbodyid']/div")
}

pub fn product_titles() -> Locator {
    Locator::xpath("//div[@id='tbodyid']//h4/a")
}

// ---------------------------------------------------------------------------
// catalog fixtures
// ---------------------------------------------------------------------------

pub fn phone_titles() -> Vec<String> {
    [
        "Samsung galaxy s6",
        "Nokia lumia 1520",
        "Nexus 6",
        "Samsung galaxy s7",
        "Iphone 6 32gb",
        "Sony xperia z5",
        "HTC One M9",
    ]
    .map(String::from)
    .to_vec()
}

pub fn laptop_titles() -> Vec<String> {
    [
        "Sony vaio i5",
        "Sony vaio i7",
        "MacBook air",
        "Dell i7 8gb",
        "2017 Dell 15.6 Inch",
        "MacBook Pro",
    ]
    .map(String::from)
    .to_vec()
}

pub fn monitor_titles() -> Vec<String> {
    ["Apple monitor 24", "ASUS Full HD"].map(String::from).to_vec()
}

/// First page of the landing grid: a mix of every category.
pub fn landing_titles() -> Vec<String> {
    let mut titles = phone_titles();
    titles.extend(laptop_titles().into_iter().take(2));
    titles
}

// ---------------------------------------------------------------------------
// scripted page
// ---------------------------------------------------------------------------

pub struct MockStorefront {
    pub driver: Arc<MockDriver>,
    pub page: Storefront,
}

/// A storefront flow object over a freshly scripted mock page.
pub fn storefront() -> MockStorefront {
    let driver = Arc::new(MockDriver::new());
    script_landing_page(&driver);

    let backend: Arc<dyn Driver> = driver.clone();
    let session = Session::new(backend, Reporter::new()).with_wait(SNAPPY);
    let config = SuiteConfig::default().with_base_url("mock://storefront");
    MockStorefront {
        driver,
        page: Storefront::new(session, config),
    }
}

fn grid_effects(titles: &[String]) -> Vec<MockEffect> {
    vec![
        MockEffect::SetTexts(product_cards().selector().clone(), titles.to_vec()),
        MockEffect::SetTexts(product_titles().selector().clone(), titles.to_vec()),
    ]
}

fn reveal(locator: &Locator) -> MockEffect {
    MockEffect::Reveal(locator.selector().clone())
}

fn hide(locator: &Locator) -> MockEffect {
    MockEffect::Hide(locator.selector().clone())
}

fn script_landing_page(driver: &MockDriver) {
    driver.set_capture_bytes(PNG_MAGIC.to_vec());

    // navigation
    driver.install(&navbar_brand(), ScriptedElement::new().with_text("PRODUCT STORE"));
    driver.install(&login_link(), ScriptedElement::new().with_text("Log in"));
    driver.install(&signup_link(), ScriptedElement::new().with_text("Sign up"));
    driver.install(&logout_link(), ScriptedElement::new().with_text("Log out").hidden());
    driver.install(&username_display(), ScriptedElement::new().hidden());

    // login modal, closed until the nav link is clicked
    for locator in [
        login_modal(),
        login_username_input(),
        login_password_input(),
        login_button(),
        login_close_button(),
    ] {
        driver.install(&locator, ScriptedElement::new().hidden());
    }
    driver.on_click(
        &login_link(),
        vec![
            reveal(&login_modal()),
            reveal(&login_username_input()),
            reveal(&login_password_input()),
            reveal(&login_button()),
            reveal(&login_close_button()),
        ],
    );
    driver.on_click(&login_close_button(), vec![hide(&login_modal())]);

    // signup modal, same shape
    for locator in [
        signup_modal(),
        signup_username_input(),
        signup_password_input(),
        signup_button(),
        signup_close_button(),
    ] {
        driver.install(&locator, ScriptedElement::new().hidden());
    }
    driver.on_click(
        &signup_link(),
        vec![
            reveal(&signup_modal()),
            reveal(&signup_username_input()),
            reveal(&signup_password_input()),
            reveal(&signup_button()),
            reveal(&signup_close_button()),
        ],
    );
    driver.on_click(&signup_close_button(), vec![hide(&signup_modal())]);

    // product grid with category filtering
    driver.install(
        &product_cards(),
        ScriptedElement::new().with_texts(landing_titles()),
    );
    driver.install(
        &product_titles(),
        ScriptedElement::new().with_texts(landing_titles()),
    );
    for category in [Category::Phones, Category::Laptops, Category::Monitors] {
        driver.install(
            &category.link(),
            ScriptedElement::new().with_text(category.label()),
        );
        driver.on_click(&category.link(), grid_effects(&titles_for(category)));
    }
}

pub fn titles_for(category: Category) -> Vec<String> {
    match category {
        Category::Phones => phone_titles(),
        Category::Laptops => laptop_titles(),
        Category::Monitors => monitor_titles(),
    }
}

/// Script what pressing "Log in" does: accept the credentials and show the
/// welcome banner.
pub fn script_login_success(driver: &MockDriver, username: &str) {
    driver.on_click(
        &login_button(),
        vec![
            hide(&login_modal()),
            hide(&login_link()),
            hide(&signup_link()),
            MockEffect::SetText(
                username_display().selector().clone(),
                format!("Welcome {username}"),
            ),
            reveal(&username_display()),
            reveal(&logout_link()),
        ],
    );
    driver.on_click(
        &logout_link(),
        vec![
            hide(&username_display()),
            hide(&logout_link()),
            reveal(&login_link()),
            reveal(&signup_link()),
        ],
    );
}

/// Script what pressing "Log in" does: reject with an alert.
pub fn script_login_rejection(driver: &MockDriver, alert_text: &str) {
    driver.on_click(
        &login_button(),
        vec![MockEffect::RaiseDialog(
            vitrina::DialogKind::Alert,
            alert_text.to_string(),
        )],
    );
}

/// Script what pressing "Sign up" does.
pub fn script_signup_outcome(driver: &MockDriver, alert_text: &str, closes_modal: bool) {
    let mut effects = vec![MockEffect::RaiseDialog(
        vitrina::DialogKind::Alert,
        alert_text.to_string(),
    )];
    if closes_modal {
        effects.push(hide(&signup_modal()));
    }
    driver.on_click(&signup_button(), effects);
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
