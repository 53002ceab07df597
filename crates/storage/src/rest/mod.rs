//! Hosted backend: `PostgREST` tables under `/rest/v1` and `GoTrue` under `/auth/v1`.

mod auth;
mod catalog;
mod profiles;
mod progress;
mod rows;

pub use auth::SupabaseAuth;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::repository::StorageError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
}

impl SupabaseConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

/// Shared HTTP client. Clones share the signed-in access token.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    config: Arc<SupabaseConfig>,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn new(config: SupabaseConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self {
            http,
            config: Arc::new(config),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    #[must_use]
    pub fn auth(&self) -> SupabaseAuth {
        SupabaseAuth::new(self.clone())
    }

    #[must_use]
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    pub(crate) fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    /// Request with the project key and the current bearer token attached.
    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StorageError> {
        debug!(table, ?query, "select");
        let response = self
            .request(Method::GET, self.rest_url(table))
            .query(query)
            .send()
            .await
            .map_err(connection)?;
        let response = ensure_success(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, StorageError> {
        let mut query = query.to_vec();
        query.push(("limit", "1".into()));
        Ok(self.select(table, &query).await?.into_iter().next())
    }
}

pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

pub(crate) fn connection(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

pub(crate) async fn ensure_success(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        404 => StorageError::NotFound,
        409 => StorageError::Conflict,
        code => StorageError::Rejected {
            status: code,
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        let config = SupabaseConfig::new("https://demo.supabase.co/", "anon");
        assert_eq!(config.url, "https://demo.supabase.co");
    }

    #[test]
    fn urls_point_at_rest_and_auth() {
        let client = SupabaseClient::new(SupabaseConfig::new("https://x.supabase.co", "k")).unwrap();
        assert_eq!(
            client.rest_url("lessons"),
            "https://x.supabase.co/rest/v1/lessons"
        );
        assert_eq!(
            client.auth_url("signup"),
            "https://x.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let client = SupabaseClient::new(SupabaseConfig::new("https://x.supabase.co", "anon")).unwrap();
        assert_eq!(client.bearer(), "anon");

        let shared = client.clone();
        shared.set_access_token(Some("user-token".into()));
        assert_eq!(client.bearer(), "user-token");

        client.set_access_token(None);
        assert_eq!(shared.bearer(), "anon");
    }

    #[test]
    fn eq_filter_format() {
        assert_eq!(eq(42), "eq.42");
    }
}
