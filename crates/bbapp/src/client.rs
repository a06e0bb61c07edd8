//! Authenticated HTTP handle for the Bitbucket Cloud 2.0 REST API.
//!
//! `ApiClient` is an explicit value owned by the caller; there is no
//! process-global client. Credential changes are handled by building a new
//! handle (which is exactly what `auth login` does to validate candidate
//! credentials before saving them).

use crate::config::Config;
use crate::error::{BbError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const API_BASE_URL: &str = "https://api.bitbucket.org/2.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: Client,
    base_url: String,
    username: String,
    token: String,
}

impl ApiClient {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            username: username.into(),
            token: token.into(),
        })
    }

    /// Builds a handle from stored credentials, failing with the canonical
    /// missing-credentials error when none are configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (username, token) = config.credentials()?;
        Self::new(username, token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    BbError::Connection(e)
                } else {
                    BbError::Http(e)
                }
            })?;

        let status = response.status();
        debug!(method, path, status = status.as_u16(), "api request");

        if status.is_success() {
            return Ok(response);
        }

        Err(match status.as_u16() {
            401 => BbError::AuthFailed,
            403 => BbError::AccessDenied,
            404 => BbError::NotFound,
            _ => {
                let body: Option<Value> = response.json().ok();
                let message = body
                    .as_ref()
                    .and_then(api_error_message)
                    .unwrap_or_else(|| status.to_string());
                BbError::Api(message)
            }
        })
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let request = self.http.get(self.url(path)).query(query);
        Ok(self.send(request, "GET", path)?.json()?)
    }

    pub fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let request = self.http.post(self.url(path)).json(body);
        Ok(self.send(request, "POST", path)?.json()?)
    }

    /// POST where only the status matters.
    pub fn post(&self, path: &str, body: &Value) -> Result<()> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request, "POST", path)?;
        Ok(())
    }

    /// POST with no body (approval endpoints).
    pub fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.http.post(self.url(path));
        self.send(request, "POST", path)?;
        Ok(())
    }

    pub fn put(&self, path: &str, body: &Value) -> Result<()> {
        let request = self.http.put(self.url(path)).json(body);
        self.send(request, "PUT", path)?;
        Ok(())
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.url(path));
        self.send(request, "DELETE", path)?;
        Ok(())
    }
}

/// Pulls `error.message` out of a Bitbucket error body, if present.
fn api_error_message(body: &Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
