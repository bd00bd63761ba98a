//! # Session Tests
//!
//! Login and logout against the mock backend, and the session accessors.

use super::*;
use crate::core::error::ApiError;
use crate::core::service::ApiService;
use crate::session::FileStore;

#[tokio::test]
async fn test_login_starts_session() {
    // Arrange
    let backend = MockBackend::start().await;
    let client = backend.client();

    // Act
    let auth = client.login("alice@invest.io", PASSWORD, true).await.unwrap();

    // Assert
    assert_eq!(auth.access_token.as_deref(), Some(LOGIN_TOKEN));
    assert!(client.is_authenticated());
    assert!(!client.is_admin());
    assert!(client.has_role("user"));
    assert_eq!(client.token().unwrap().as_deref(), Some(LOGIN_TOKEN));

    let user = client.user().unwrap().unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.email, "alice@invest.io");
    assert!(client.login_timestamp().unwrap().is_some());
    assert_eq!(client.remembered_username().unwrap().as_deref(), Some("alice@invest.io"));
}

#[tokio::test]
async fn test_login_without_remember_forgets_username() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    client.session().remember_username(Some("old@invest.io")).unwrap();

    client.login("admin@invest.io", PASSWORD, false).await.unwrap();

    assert!(client.is_admin());
    assert_eq!(client.session().remembered_username().unwrap(), None);
}

#[tokio::test]
async fn test_wrong_password_does_not_refresh() {
    // Arrange
    let backend = MockBackend::start().await;
    let client = backend.client();

    // Act
    let error = client.login("alice@invest.io", "wrong", false).await.unwrap_err();

    // Assert
    assert!(error.is_unauthorized());
    assert_eq!(error.to_string(), "Invalid credentials");
    assert_eq!(backend.refresh_calls(), 0);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let error = client.login("alice@invest.io", "locked", false).await.unwrap_err();

    assert!(matches!(&error, ApiError::Rejected(message) if message == "Account locked"));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session() {
    // Arrange
    let backend = MockBackend::start().await;
    let client = backend.client();
    client.login("alice@invest.io", PASSWORD, true).await.unwrap();

    // Act
    client.logout().await.unwrap();

    // Assert
    assert!(!client.is_authenticated());
    assert_eq!(client.user().unwrap(), None);
    assert_eq!(client.session().login_timestamp().unwrap(), None);
    assert_eq!(
        client.session().remembered_username().unwrap().as_deref(),
        Some("alice@invest.io")
    );
    assert_eq!(backend.requests_to("/api/auth/logout").len(), 1);
}

#[tokio::test]
async fn test_logout_clears_session_when_server_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new(format!("http://127.0.0.1:{}/api/", port), API_KEY);
    let client = ApiClient::new(config, Session::in_memory()).unwrap();
    client.session().begin("valid-token", Some(&test_user("user"))).unwrap();

    let error = client.logout().await.unwrap_err();

    assert!(error.is_network());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_session_accessors() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    assert!(!client.is_authenticated());
    assert!(!client.has_role("user"));

    client.set_token("manual").unwrap();
    assert!(client.is_authenticated());
    assert!(!client.is_admin());

    client.set_user(&test_user("admin")).unwrap();
    assert!(client.is_admin());
    assert!(!client.has_role("Admin"));

    client.clear_auth().unwrap();
    assert!(!client.is_authenticated());
    assert!(!client.is_admin());
}

#[tokio::test]
async fn test_file_session_survives_new_client() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let backend = MockBackend::start().await;

    let first = backend.client_with(Session::new(Arc::new(FileStore::new(&path))));
    first.login("alice@invest.io", PASSWORD, false).await.unwrap();

    // Act
    let second = backend.client_with(Session::new(Arc::new(FileStore::new(&path))));
    let reply = second.get_wallets().await.unwrap();

    // Assert
    assert!(second.is_authenticated());
    assert!(reply.data().is_some());
    assert_eq!(backend.refresh_calls(), 0);
}
