//! Stateless HTTP request builder for the file server.
//!
//! # Design
//! `Dispatcher` holds only a `base_url` and carries no mutable state between
//! calls. Each user action maps to one `build_*` method producing an
//! `HttpRequest`; the caller executes the round trip and hands the response
//! to [`crate::format`].

use crate::error::DispatchError;
use crate::http::{HttpMethod, HttpRequest};

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Builds one request per user action against a fixed base address.
///
/// GET, PUT, DELETE and OPEN address `<base><path>` and reject an empty path.
/// POST always targets the base address itself.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_url: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Dispatcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, path: &str) -> Result<HttpRequest, DispatchError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.resource_url("GET", path)?,
            headers: Vec::new(),
            body: None,
        })
    }

    /// The body is sent raw, without a content type.
    pub fn build_put(&self, path: &str, body: &str) -> Result<HttpRequest, DispatchError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.resource_url("PUT", path)?,
            headers: Vec::new(),
            body: Some(body.to_string()),
        })
    }

    pub fn build_post(&self, body: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/", self.base_url),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: Some(body.to_string()),
        }
    }

    pub fn build_delete(&self, path: &str) -> Result<HttpRequest, DispatchError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.resource_url("DELETE", path)?,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Request for viewing the raw file on its own, outside the result slot.
    ///
    /// Same shape as `build_get`; kept separate so a GET never triggers a
    /// second request behind the user's back.
    pub fn build_open(&self, path: &str) -> Result<HttpRequest, DispatchError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.resource_url("OPEN", path)?,
            headers: Vec::new(),
            body: None,
        })
    }

    fn resource_url(&self, action: &'static str, path: &str) -> Result<String, DispatchError> {
        if path.is_empty() {
            return Err(DispatchError::EmptyPath { action });
        }
        if path.starts_with('/') {
            Ok(format!("{}{path}", self.base_url))
        } else {
            Ok(format!("{}/{path}", self.base_url))
        }
    }
}
