//! Login scenarios against the scripted storefront.

mod common;

use common::{script_login_rejection, script_login_success, storefront};
use vitrina::PageFlow;

#[tokio::test(start_paused = true)]
async fn successful_login_shows_the_welcome_banner() {
    common::init_tracing();
    let mock = storefront();
    let valid = mock.page.config().valid_username.clone();
    let password = mock.page.config().valid_password.clone();
    script_login_success(&mock.driver, &valid);

    mock.page.open().await.unwrap();
    assert!(mock.page.is_ready().await.unwrap());

    mock.page.login(&valid, &password).await.unwrap();

    assert!(mock.page.is_logged_in().await.unwrap());
    assert_eq!(mock.page.logged_in_username().await.unwrap(), valid);

    // the form actually received the credentials
    assert_eq!(mock.driver.filled(&common::login_username_input()), Some(valid));
    assert_eq!(
        mock.driver.filled(&common::login_password_input()),
        Some(password)
    );

    let bytes = mock.page.session().capture_snapshot("after login").await.unwrap();
    assert_eq!(bytes, common::PNG_MAGIC.to_vec());
}

#[tokio::test(start_paused = true)]
async fn unknown_username_is_rejected_with_an_alert() {
    let mock = storefront();
    script_login_rejection(&mock.driver, "User does not exist.");

    mock.page.open().await.unwrap();
    mock.page.login("definitely_not_registered", "whatever").await.unwrap();

    let alert = mock.page.session().wait_for_alert().await.unwrap();
    let text = alert.read_and_dismiss().await.unwrap();
    assert!(
        text.contains("User does not exist."),
        "unexpected alert text: {text:?}"
    );
    assert!(!mock.page.is_logged_in().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn wrong_password_is_rejected_with_an_alert() {
    let mock = storefront();
    script_login_rejection(&mock.driver, "Wrong password.");

    mock.page.open().await.unwrap();
    let valid = mock.page.config().valid_username.clone();
    mock.page.login(&valid, "not-the-password").await.unwrap();

    let alert = mock.page.session().wait_for_alert().await.unwrap();
    assert!(alert.text().contains("Wrong password."));
    alert.read_and_dismiss().await.unwrap();
    assert!(!mock.page.is_logged_in().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn empty_fields_produce_some_validation_alert() {
    let mock = storefront();
    // the site's exact wording for empty fields is unspecified; assert only
    // that a message is shown
    script_login_rejection(&mock.driver, "Please fill out Username and Password.");

    mock.page.open().await.unwrap();
    mock.page.open_login_modal().await.unwrap();
    mock.page.submit_login().await.unwrap();

    let text = mock
        .page
        .session()
        .wait_for_alert()
        .await
        .unwrap()
        .read_and_dismiss()
        .await
        .unwrap();
    assert!(!text.is_empty());
    assert!(!mock.page.is_logged_in().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn logout_returns_the_nav_to_logged_out_state() {
    let mock = storefront();
    let valid = mock.page.config().valid_username.clone();
    let password = mock.page.config().valid_password.clone();
    script_login_success(&mock.driver, &valid);

    mock.page.open().await.unwrap();
    mock.page.login(&valid, &password).await.unwrap();
    assert!(mock.page.is_logged_in().await.unwrap());

    assert!(mock.page.logout().await.unwrap(), "welcome banner should disappear");
    assert!(!mock.page.is_logged_in().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn closing_the_login_modal_leaves_the_page_usable() {
    let mock = storefront();

    mock.page.open().await.unwrap();
    mock.page.open_login_modal().await.unwrap();
    assert!(mock.page.close_login_modal().await.unwrap());
    assert!(mock.page.is_ready().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn every_flow_step_is_annotated_in_the_report() {
    let mock = storefront();
    script_login_rejection(&mock.driver, "User does not exist.");

    mock.page.open().await.unwrap();
    mock.page.login("ghost", "ghost").await.unwrap();
    mock.page
        .session()
        .wait_for_alert()
        .await
        .unwrap()
        .read_and_dismiss()
        .await
        .unwrap();

    let reporter = mock.page.session().reporter();
    let steps = reporter.steps();
    assert!(steps.iter().any(|s| s.description.starts_with("open mock://")));
    assert!(steps.iter().any(|s| s.description.starts_with("click id=login2")));
    assert!(steps.iter().any(|s| s.description == "wait for alert"));
    assert!(reporter.attachments().iter().any(|a| a.name == "alert text"));
}
