//! Blocking HTTP client for the Finboard REST API.
//!
//! Owns the `reqwest` client and the [`Session`]. Every request made through
//! [`ApiClient::send`] carries the session's bearer token when one is present,
//! and non-2xx responses are turned into [`FinboardError::Api`] or
//! [`FinboardError::Unauthorized`] with the server's message attached.

use crate::error::{FinboardError, Result};
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::time::Duration;

/// HTTP transport plus the session whose token authenticates it.
pub struct ApiClient {
    base_url: String,
    http: Client,
    /// The signed-in session; written by the auth API, read by every request.
    pub session: RefCell<Session>,
}

impl ApiClient {
    /// Build a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session: RefCell::new(session),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request for `path`, attaching the bearer token if signed in.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);
        let builder = self.http.request(method, &url);
        match self.session.borrow().token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Like [`request`](Self::request) but fails fast when there is no token.
    pub fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if !self.session.borrow().is_authenticated() {
            return Err(FinboardError::Unauthorized("not signed in".into()));
        }
        Ok(self.request(method, path))
    }

    /// Send a request and decode a JSON body from a 2xx response.
    pub fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let resp = builder.send()?;
        let resp = check_status(resp)?;
        let text = resp.text()?;
        if text.trim().is_empty() {
            // Some mutation endpoints answer 204 or an empty 200.
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    // -- Convenience wrappers ---------------------------------------------

    pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let builder = self.authed(Method::GET, path)?.query(query);
        self.send(builder)
    }

    pub fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let builder = self.authed(Method::POST, path)?.json(body);
        self.send(builder)
    }

    pub fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let builder = self.authed(Method::PUT, path)?.json(body);
        self.send(builder)
    }

    pub fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.authed(Method::DELETE, path)?;
        self.send(builder)
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = error_message(status, &body);
    log::warn!("Request failed with {}: {}", status, message);
    if status == StatusCode::UNAUTHORIZED {
        Err(FinboardError::Unauthorized(message))
    } else {
        Err(FinboardError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, `detail` and `error` in a JSON body, then falls back to
/// the raw text, then to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "detail", "error"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
