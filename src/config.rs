//! Support for library configuration options

use once_cell::sync::Lazy;

/// The remote task store this crate talks to, unless told otherwise
pub const DEFAULT_API_URL: &str = "https://todo-backend-7v02.onrender.com";

/// Name of the environment variable that overrides [`DEFAULT_API_URL`]
pub const API_URL_ENV_VAR: &str = "WEEKLY_TASKS_API_URL";

/// Base URL of the remote task store.
/// It is read once from the environment, and falls back to [`DEFAULT_API_URL`].
pub static API_URL: Lazy<String> = Lazy::new(|| {
    match std::env::var(API_URL_ENV_VAR) {
        Ok(url) if url.trim().is_empty() == false => url,
        _ => DEFAULT_API_URL.to_string(),
    }
});
