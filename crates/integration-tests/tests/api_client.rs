//! End-to-end tests for the API through the console's HTTP client.

#![allow(clippy::unwrap_used)]

use profile_directory_console::api::{ApiClient, ApiError, UsersApi};
use profile_directory_core::{Avatar, UserId};
use profile_directory_integration_tests::{TestServer, ann, fields};

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let server = TestServer::start().await;
    let client = server.client();

    let created = client.create(&ann()).await.unwrap();
    assert!(!created.id.to_string().is_empty());
    assert_eq!(created.name.as_str(), "Ann Lee");
    assert_eq!(created.avatar, Avatar::One);

    let users = client.list().await.unwrap();
    assert_eq!(users, vec![created]);
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let server = TestServer::start().await;
    let client = server.client();

    for name in ["Ann Lee", "Bob Stone", "Cara Diaz"] {
        let email = format!("{}@x.com", name.to_lowercase().replace(' ', "."));
        client
            .create(&fields(name, &email, "5551234567"))
            .await
            .unwrap();
    }

    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name.to_string())
        .collect();
    assert_eq!(names, ["Ann Lee", "Bob Stone", "Cara Diaz"]);
}

#[tokio::test]
async fn test_update_replaces_every_field() {
    let server = TestServer::start().await;
    let client = server.client();
    let created = client.create(&ann()).await.unwrap();

    let mut replacement = fields("Ann Smith", "ann@smith.org", "5550000000");
    replacement.avatar = Avatar::Four;
    let updated = client.update(created.id, &replacement).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.email.as_str(), "ann@smith.org");
    assert_eq!(updated.avatar, Avatar::Four);
    assert_eq!(client.list().await.unwrap(), vec![updated]);
}

#[tokio::test]
async fn test_update_missing_is_not_found_and_list_unchanged() {
    let server = TestServer::start().await;
    let client = server.client();
    client.create(&ann()).await.unwrap();
    let before = client.list().await.unwrap();

    let err = client.update(UserId::generate(), &ann()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), Some("User not found"));

    assert_eq!(client.list().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let server = TestServer::start().await;
    let client = server.client();
    let created = client.create(&ann()).await.unwrap();

    client.delete(created.id).await.unwrap();
    let err = client.delete(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_fields_are_rejected_with_message() {
    let server = TestServer::start().await;
    let client = server.client();

    let err = client
        .create(&fields("Ann", "foo@bar", "5551234567"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 400, .. }));
    assert_eq!(err.message(), Some("Please enter a valid email address."));

    let err = client
        .create(&fields("Ann", "ann@x.com", "123"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), Some("Please enter a valid 10-digit number."));

    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}/api/users")).unwrap();
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(err.message(), None);
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await;
    let base = format!("http://{}", server.addr);

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");

    let response = reqwest::get(format!("{base}/health/ready")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_record_json_shape() {
    let server = TestServer::start().await;
    let created = server.client().create(&ann()).await.unwrap();

    let body: serde_json::Value = reqwest::get(server.users_url())
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        serde_json::json!([{
            "id": created.id.to_string(),
            "name": "Ann Lee",
            "email": "ann@x.com",
            "number": "5551234567",
            "avatar": "/images/avatar-1.jpg",
        }])
    );
}
