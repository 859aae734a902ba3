//! Endpoint wrappers for the Finboard API.
//!
//! Each module provides a lightweight struct that borrows the SDK's
//! [`ApiClient`](crate::client::ApiClient) and exposes typed methods returning
//! `Result<T>`.

pub mod analytics;
pub mod auth;
pub mod two_factor;
pub mod users;
pub mod widgets;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use two_factor::TwoFactorApi;
pub use users::UserApi;
pub use widgets::WidgetApi;
