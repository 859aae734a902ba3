//! Async wrapper around [`FinboardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use finboard_sdk::AsyncFinboardSdk;
//! use finboard_sdk::reports::{CashFlowPage, CashFlowView};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncFinboardSdk::builder().build().await.unwrap();
//!     let mut page = CashFlowPage::new(CashFlowView::Flow);
//!
//!     // The ticket ties the response to this request; if the year changes
//!     // again before it resolves, the older response is dropped.
//!     let ticket = page.controller_mut().begin(Some(2024));
//!     let result = sdk.cash_flow_report(Some(2024)).await;
//!     page.controller_mut().resolve(ticket, result);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{FinboardError, Result};
use crate::models::LoginOutcome;
use crate::reports::{CashFlowReport, OverviewReport, ProfitReport};
use crate::FinboardSdk;

// ---------------------------------------------------------------------------
// AsyncFinboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncFinboardSdk`] instance.
#[derive(Default)]
pub struct AsyncFinboardSdkBuilder {
    base_url: Option<String>,
    state_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl AsyncFinboardSdkBuilder {
    /// Set the API base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set a custom state directory.
    pub fn state_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncFinboardSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = FinboardSdk::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            if let Some(dir) = self.state_dir {
                builder = builder.state_dir(dir);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let sdk = builder.build()?;
            Ok(AsyncFinboardSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| FinboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncFinboardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`FinboardSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`FinboardSdk`] is
/// protected by a [`Mutex`] since its session lives in a `RefCell`.
#[derive(Clone)]
pub struct AsyncFinboardSdk {
    inner: Arc<Mutex<FinboardSdk>>,
}

impl AsyncFinboardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncFinboardSdkBuilder {
        AsyncFinboardSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&FinboardSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FinboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| FinboardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| FinboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = email.to_string();
        let password = password.to_string();
        self.run(move |s| s.auth().login(&email, &password)).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.run(|s| s.auth().logout()).await
    }

    pub async fn cash_flow_report(&self, year: Option<i32>) -> Result<CashFlowReport> {
        self.run(move |s| s.analytics().cash_flow_report(year)).await
    }

    pub async fn profit_report(&self, year: Option<i32>) -> Result<ProfitReport> {
        self.run(move |s| s.analytics().profit_report(year)).await
    }

    pub async fn overview_report(&self) -> Result<OverviewReport> {
        self.run(|s| s.analytics().overview_report(None)).await
    }

    /// Close the SDK, dropping the HTTP client on the blocking pool.
    ///
    /// Fails if another clone of this handle is still alive.
    pub async fn close(self) -> Result<()> {
        let inner = Arc::try_unwrap(self.inner).map_err(|_| {
            FinboardError::InvalidArgument("SDK is still shared by another handle".into())
        })?;
        tokio::task::spawn_blocking(move || {
            let sdk = inner
                .into_inner()
                .map_err(|_| FinboardError::InvalidArgument("SDK lock poisoned".into()))?;
            sdk.close();
            Ok(())
        })
        .await
        .map_err(|e| FinboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
