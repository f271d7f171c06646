//! Outbound request model.
//!
//! Adapters describe provider calls as [`Request`] values built with
//! [`RequestBuilder`]; a single dispatch helper turns them into actual
//! HTTP calls. Keeping the description separate from execution keeps the
//! adapters testable without a network.

use masking::Maskable;
use serde::{Deserialize, Serialize};

/// Header list with maskable values, so authorization headers never show
/// up readable in `Debug` output.
pub type Headers = Vec<(String, Maskable<String>)>;

/// HTTP method of an outbound call.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

/// A fully described outbound provider call.
///
/// Both providers in this workspace speak JSON, so the body is a JSON
/// value rather than a content-type enum.
#[derive(Debug)]
pub struct Request {
    /// Target URL, including any query string.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Headers, masked where secret.
    pub headers: Headers,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    method: Method,
    headers: Headers,
    body: Option<serde_json::Value>,
}

impl RequestBuilder {
    /// Start a new request description, defaulting to `GET`.
    pub fn new() -> Self {
        Self {
            url: String::new(),
            method: Method::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set the target URL.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a batch of headers.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Append a single header.
    pub fn header(mut self, name: &str, value: Maskable<String>) -> Self {
        self.headers.push((name.to_string(), value));
        self
    }

    /// Attach a JSON body.
    pub fn set_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Finish building.
    pub fn build(self) -> Request {
        Request {
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
