//! Integration tests for Thai Orchid.
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, so
//! no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p thai-orchid-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - checkout core through the library API
//! - `http_api` - the JSON API, one cookie session per [`TestApp`]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use thai_orchid_storefront::catalog::Catalog;
use thai_orchid_storefront::checkout::{CheckoutSession, SessionSettings};
use thai_orchid_storefront::config::StorefrontConfig;
use thai_orchid_storefront::notifications::RecordingSink;
use thai_orchid_storefront::state::AppState;

/// Path to the menu shipped with the storefront crate.
#[must_use]
pub fn bundled_menu_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/data/menu.json")
}

/// Load the bundled menu.
///
/// # Panics
///
/// Panics if the bundled menu is missing or invalid.
#[must_use]
pub fn bundled_catalog() -> Catalog {
    Catalog::load(&bundled_menu_path()).expect("bundled menu should load")
}

/// A checkout session over the bundled menu with a recording sink.
#[must_use]
pub fn recorded_session() -> (CheckoutSession, RecordingSink) {
    let sink = RecordingSink::new();
    let session = CheckoutSession::new(
        Arc::new(bundled_catalog()),
        Arc::new(sink.clone()),
        SessionSettings::default(),
    );
    (session, sink)
}

/// One simulated browser: the storefront router plus a cookie jar of one.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Storefront with default configuration and the bundled menu.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            menu_path: bundled_menu_path(),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, bundled_catalog());
        Self {
            router: thai_orchid_storefront::app(state),
            cookie: None,
        }
    }

    /// A second browser talking to the same server.
    #[must_use]
    pub fn fresh_client(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, body).await
    }

    pub async fn delete(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a request, keeping the session cookie between calls.
    ///
    /// Non-JSON bodies come back as a JSON string.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }
}
