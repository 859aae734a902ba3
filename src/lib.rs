//! Finboard SDK for Rust.
//!
//! Provides a high-level client for the Finboard financial analytics API.
//! Report payloads are fetched from the REST backend and turned into derived
//! metrics, chart datasets, table rows and CSV exports in-process. The session
//! token and UI preferences are persisted to a local state directory.
//!
//! # Quick start
//!
//! ```no_run
//! use finboard_sdk::FinboardSdk;
//! use finboard_sdk::reports::{CashFlowPage, CashFlowView};
//!
//! let sdk = FinboardSdk::builder()
//!     .base_url("https://api.example.com")
//!     .build()
//!     .unwrap();
//! sdk.auth().login("admin@example.com", "secret").unwrap();
//!
//! let mut page = CashFlowPage::new(CashFlowView::Flow);
//! page.mount(Some(2023), |year| sdk.analytics().cash_flow_report(year));
//! if let Some(metrics) = page.metrics() {
//!     println!("Total: {}", metrics.derived.formatted_total);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod metrics;
pub mod models;
pub mod reports;
pub mod session;
pub mod storage;

#[cfg(feature = "async")]
pub use async_client::AsyncFinboardSdk;
pub use client::ApiClient;
pub use error::{FinboardError, Result};
pub use layout::WidgetLayout;
pub use reports::{LoadState, Report, ReportController, ReportPage};
pub use session::Session;
pub use storage::LocalStore;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// FinboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FinboardSdk`] instance.
///
/// Use [`FinboardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FinboardSdkBuilder::build) to create the SDK.
pub struct FinboardSdkBuilder {
    base_url: Option<String>,
    state_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for FinboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            state_dir: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl FinboardSdkBuilder {
    /// Set the API base URL.
    ///
    /// If not set, `FINBOARD_API_URL` is used, falling back to
    /// `http://localhost:8000`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set a custom state directory for the persisted token, user and
    /// preferences.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/finboard-sdk` on Linux).
    pub fn state_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, restoring any session saved in the state directory.
    ///
    /// No network request is made here.
    pub fn build(self) -> Result<FinboardSdk> {
        let store = LocalStore::new(self.state_dir)?;
        let session = Session::restore(store)?;
        let base_url = self.base_url.unwrap_or_else(config::default_base_url);
        let client = ApiClient::new(&base_url, self.timeout, session)?;
        Ok(FinboardSdk { client })
    }
}

// ---------------------------------------------------------------------------
// FinboardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Finboard SDK.
///
/// Wraps an [`ApiClient`] (which owns the HTTP client and the [`Session`]) and
/// exposes endpoint groups as lightweight borrowing wrappers.
///
/// Created via [`FinboardSdk::builder()`].
pub struct FinboardSdk {
    client: ApiClient,
}

impl FinboardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> FinboardSdkBuilder {
        FinboardSdkBuilder::default()
    }

    // -- API accessors -----------------------------------------------------

    /// Login, logout and password reset.
    pub fn auth(&self) -> api::AuthApi<'_> {
        api::AuthApi::new(&self.client)
    }

    /// Two-factor enrollment.
    pub fn two_factor(&self) -> api::TwoFactorApi<'_> {
        api::TwoFactorApi::new(&self.client)
    }

    /// Cash flow, profit and overview data.
    pub fn analytics(&self) -> api::AnalyticsApi<'_> {
        api::AnalyticsApi::new(&self.client)
    }

    /// Dashboard widget configuration.
    pub fn widgets(&self) -> api::WidgetApi<'_> {
        api::WidgetApi::new(&self.client)
    }

    /// Company user management.
    pub fn users(&self) -> api::UserApi<'_> {
        api::UserApi::new(&self.client)
    }

    // -- Session and preferences -------------------------------------------

    pub fn is_authenticated(&self) -> bool {
        self.client.session.borrow().is_authenticated()
    }

    pub fn current_user(&self) -> Option<models::User> {
        self.client.session.borrow().current_user().cloned()
    }

    /// Whether the sidebar is expanded. Defaults to `true` when never set.
    pub fn sidebar_open(&self) -> Result<bool> {
        let session = self.client.session.borrow();
        Ok(session
            .store()
            .get::<bool>(config::keys::SIDEBAR_OPEN)?
            .unwrap_or(true))
    }

    pub fn set_sidebar_open(&self, open: bool) -> Result<()> {
        self.client
            .session
            .borrow()
            .store()
            .set(config::keys::SIDEBAR_OPEN, &open)
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Consume the SDK and release the HTTP client.
    ///
    /// The persisted session is kept; use [`api::AuthApi::logout`] to clear it.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FinboardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.client.session.borrow();
        write!(
            f,
            "FinboardSdk(base_url={}, state_dir={}, authenticated={})",
            self.client.base_url(),
            session.store().state_dir.display(),
            session.is_authenticated()
        )
    }
}
