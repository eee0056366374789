//! Minimal HTTP exchange model and the transport seam.
//!
//! Outbound HTTP only exists inside the Spin runtime. Native builds get a
//! transport that refuses to send; tests plug in their own.

use serde::de::DeserializeOwned;

use crate::FetchError;

/// HTTP methods used for GraphQL operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`FetchError::Status`] unless the status is 2xx.
    pub fn into_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Status {
            status: self.status,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends HTTP requests. Blocking.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Transport backed by Spin's outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
impl HttpTransport for SpinTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        use spin_sdk::http::{Method, Request};

        let mut builder = Request::builder();
        builder.method(match request.method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
        });
        builder.uri(&request.url);
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        let outbound = match request.body {
            Some(body) => builder.body(body).build(),
            None => builder.build(),
        };

        let response: spin_sdk::http::Response = spin_sdk::http::run(spin_sdk::http::send(outbound))
            .map_err(|e| FetchError::Send(e.to_string()))?;
        let status = *response.status();
        Ok(HttpResponse::new(status, response.into_body()))
    }
}

/// Transport for native builds, which have no outbound HTTP.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTransport;

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport for UnavailableTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        tracing::debug!(url = %request.url, "outbound request refused on native target");
        Err(FetchError::Send(format!(
            "no outbound HTTP outside the Spin runtime: {} {}",
            request.method.as_str(),
            request.url
        )))
    }
}

/// The transport of the current build target.
#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = SpinTransport;

/// The transport of the current build target.
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = UnavailableTransport;
