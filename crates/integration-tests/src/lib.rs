//! Integration tests for the profile directory.
//!
//! Each test binds the API on `127.0.0.1:0` over an in-memory store and
//! drives it through the console's real reqwest client, so no database is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p profile-directory-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use profile_directory_api::db::MemoryUserStore;
use profile_directory_api::routes;
use profile_directory_api::state::AppState;
use profile_directory_console::api::ApiClient;
use profile_directory_core::{Avatar, UserFields};

/// A running API server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Start the API over a fresh in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let state = AppState::new(Arc::new(MemoryUserStore::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");

        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, routes::app(state))
                .with_graceful_shutdown(async move {
                    let _ = signal.await;
                })
                .await;
        });

        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// Shut the server down and wait until it has closed every connection.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Address of the users collection.
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("http://{}/api/users", self.addr)
    }

    /// Console client pointed at this server.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.users_url()).expect("valid API URL")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Valid fields for a test profile.
#[must_use]
pub fn fields(name: &str, email: &str, number: &str) -> UserFields {
    UserFields {
        name: name.to_string(),
        email: email.to_string(),
        number: number.to_string(),
        avatar: Avatar::One,
    }
}

/// The canonical "Ann Lee" profile.
#[must_use]
pub fn ann() -> UserFields {
    fields("Ann Lee", "ann@x.com", "5551234567")
}
