use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "FINBOARD_API_URL";

// Auth
pub const LOGIN_PATH: &str = "/api/v1/company/user/auth/login";
pub const RESET_PASSWORD_PATH: &str = "/api/v1/company/user/auth/reset-password";
pub const TWO_FACTOR_SETUP_PATH: &str = "/api/v1/company/user/auth/2fa/setup";
pub const TWO_FACTOR_TOGGLE_PATH: &str = "/api/v1/company/user/auth/enable-disable/2fa";

// Financial analytics
pub const CASH_FLOW_PATH: &str = "/api/v1/company/financial/analytics/cash-flow";
pub const PROFIT_ANALYSIS_PATH: &str = "/api/v1/company/financial/analytics/profit-analysis";
pub const FINANCIAL_OVERVIEW_PATH: &str = "/api/v1/company/financial/financial-overview";
pub const WIDGETS_PATH: &str = "/api/v1/company/financial/widgets";

// User management
pub const USERS_BASE_PATH: &str = "/api/v1/company/user";

/// Keys of the persisted client state, one file each in the state directory.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const CURRENT_USER: &str = "currentUser";
    pub const SIDEBAR_OPEN: &str = "sidebar-open";
    pub const RESET_TOKEN: &str = "resetToken";
}

/// Resolve the API base URL: `FINBOARD_API_URL` if set, else the default.
pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

pub fn default_state_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("finboard-sdk")
    } else {
        PathBuf::from(".finboard-sdk")
    }
}
