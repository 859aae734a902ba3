pub mod analytics;
pub mod auth;
pub mod user;
pub mod widget;

pub use analytics::*;
pub use auth::*;
pub use user::*;
pub use widget::*;
