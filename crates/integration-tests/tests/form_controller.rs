//! End-to-end tests for the form controller against a live API.

#![allow(clippy::unwrap_used)]

use profile_directory_console::api::UsersApi;
use profile_directory_console::controller::{
    Confirmation, Draft, Field, FormController, FormError, Mode,
};
use profile_directory_core::{Avatar, ValidationError};
use profile_directory_integration_tests::TestServer;

fn fill<A: UsersApi>(
    controller: &mut FormController<A>,
    name: &str,
    email: &str,
    number: &str,
) {
    controller.change_field(Field::Name, name);
    controller.change_field(Field::Email, email);
    controller.change_field(Field::Number, number);
}

#[tokio::test]
async fn test_submit_creates_then_returns_to_create_mode() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    controller.load_list().await.unwrap();
    assert!(controller.users().is_empty());

    fill(&mut controller, "Ann Lee", "ann@x.com", "5551234567");
    controller.select_avatar(Avatar::Three);
    controller.submit().await.unwrap();

    assert_eq!(controller.mode(), Mode::Create);
    assert!(!controller.is_editing());
    assert_eq!(controller.draft(), &Draft::default());
    assert!(controller.error().is_none());
    assert_eq!(controller.users().len(), 1);
    assert_eq!(controller.users()[0].avatar, Avatar::Three);
}

#[tokio::test]
async fn test_edit_flow_updates_record() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    fill(&mut controller, "Ann Lee", "ann@x.com", "5551234567");
    controller.submit().await.unwrap();

    let record = controller.users()[0].clone();
    controller.begin_edit(&record);
    assert_eq!(controller.mode(), Mode::Edit(record.id));

    controller.change_field(Field::Email, "ann@smith.org");
    controller.submit().await.unwrap();

    assert!(!controller.is_editing());
    let users = controller.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, record.id);
    assert_eq!(users[0].email.as_str(), "ann@smith.org");
}

#[tokio::test]
async fn test_edit_of_deleted_record_shows_api_message() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    fill(&mut controller, "Ann Lee", "ann@x.com", "5551234567");
    controller.submit().await.unwrap();
    let record = controller.users()[0].clone();

    server.client().delete(record.id).await.unwrap();

    controller.begin_edit(&record);
    let err = controller.submit().await.unwrap_err();
    assert!(matches!(err, FormError::Api(ref e) if e.is_not_found()));
    assert_eq!(controller.error(), Some("User not found"));
    assert!(controller.is_editing());
}

#[tokio::test]
async fn test_remove_record_with_and_without_confirmation() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    fill(&mut controller, "Ann Lee", "ann@x.com", "5551234567");
    controller.submit().await.unwrap();
    let id = controller.users()[0].id;

    controller
        .remove_record(id, Confirmation::Declined)
        .await
        .unwrap();
    assert_eq!(controller.users().len(), 1);

    controller
        .remove_record(id, Confirmation::Confirmed)
        .await
        .unwrap();
    assert!(controller.users().is_empty());

    let err = controller
        .remove_record(id, Confirmation::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, FormError::Api(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_before_the_api() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    fill(&mut controller, "Ann", "ann@x.com", "123");

    let err = controller.submit().await.unwrap_err();
    assert!(matches!(
        err,
        FormError::Validation(ValidationError::InvalidNumber)
    ));
    assert_eq!(
        controller.error(),
        Some("Please enter a valid 10-digit number.")
    );

    controller.load_list().await.unwrap();
    assert!(controller.users().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_list() {
    let server = TestServer::start().await;
    let mut controller = FormController::new(server.client());
    fill(&mut controller, "Ann Lee", "ann@x.com", "5551234567");
    controller.submit().await.unwrap();

    server.stop().await;

    controller.load_list().await.unwrap_err();
    assert_eq!(
        controller.error(),
        Some("Could not fetch users. Please try again later.")
    );
    assert_eq!(controller.users().len(), 1);
}
