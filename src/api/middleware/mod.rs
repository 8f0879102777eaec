//! API middleware.

mod auth;
mod preflight;
mod rate_limit;

pub use auth::{auth_middleware, CurrentUser};
pub use preflight::options_ok;
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware, RateLimitError};
