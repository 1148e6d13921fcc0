//! REST client for the storefront backend.
//!
//! One [`ApiClient`] carries the base URL, timeout and bearer credential;
//! the catalog, commerce and admin trait impls live in their own modules.

mod admin;
mod catalog;
mod commerce;
pub mod envelope;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use partshop_core::config::ApiSettings;
use partshop_core::{Error, Result};

use crate::envelope::Envelope;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = Url::parse(settings.base_url.trim())
            .map_err(|e| Error::InvalidConfig(format!("api.base_url '{}': {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!("api.base_url '{}' cannot carry a path", base_url)));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = settings.auth_token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::InvalidConfig(format!("api.auth_token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("http client: {}", e)))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidConfig(format!("api.base_url '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// Send a request and decode the raw JSON body into `T`.
    async fn send_raw<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response arrived");
            Error::Transport(e.to_string())
        })?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(|e| Error::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::warn!(status = status.as_u16(), %url, %message, "backend returned an error status");
            return Err(Error::Http { status: status.as_u16(), message });
        }

        tracing::debug!(status = status.as_u16(), %url, bytes = body.len(), "response received");
        serde_json::from_str(&body).map_err(|e| Error::Decode(format!("{}: {}", url, e)))
    }

    /// Send a request whose body is a `{ success, data, message }` envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send_raw::<Envelope<T>>(request).await?.into_data()
    }
}
