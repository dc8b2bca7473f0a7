//! HTTP client for the profile directory API.
//!
//! [`UsersApi`] is the seam the form controller talks through;
//! [`ApiClient`] is the reqwest implementation used by the console binary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use profile_directory_core::{UserFields, UserId, UserProfile};

/// Address of the users collection the console talks to.
pub const API_URL: &str = "http://localhost:5001/api/users";

/// Errors that can occur when calling the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API error: {status} - {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// Base address is not an absolute http(s) URL.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Human-readable message supplied by the API, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the API reported that the record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Operations the API offers over the users collection.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetch every record.
    async fn list(&self) -> Result<Vec<UserProfile>, ApiError>;

    /// Create a record; the API assigns its identifier.
    async fn create(&self, fields: &UserFields) -> Result<UserProfile, ApiError>;

    /// Replace every field of the record at `id`.
    async fn update(&self, id: UserId, fields: &UserFields) -> Result<UserProfile, ApiError>;

    /// Remove the record at `id`.
    async fn delete(&self, id: UserId) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: UsersApi + ?Sized> UsersApi for Arc<T> {
    async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        (**self).list().await
    }

    async fn create(&self, fields: &UserFields) -> Result<UserProfile, ApiError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<UserProfile, ApiError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed [`UsersApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the users collection at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL, or `ApiError::Http` if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Address of the users collection.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.base_url)
    }

    /// Turn a non-success response into `ApiError::Api`, keeping the API's
    /// message when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.message);

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl UsersApi for ApiClient {
    async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        let response = self.client.get(&self.base_url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, fields: &UserFields) -> Result<UserProfile, ApiError> {
        let response = self.client.post(&self.base_url).json(fields).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(fields)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
