//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::AppConfig;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration when set; otherwise constructs
/// the URL from the current window location, using port 3000 for the backend.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let configured = &AppConfig::get().api.base_url;
    if !configured.is_empty() {
        return configured.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Join a base URL and an API path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Collection path + id, e.g. `/api/units/5`
pub fn item_path(resource: &str, id: i64) -> String {
    format!("{}/{}", resource.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:3000/", "/api/units"), "http://h:3000/api/units");
        assert_eq!(join_url("http://h:3000", "api/units"), "http://h:3000/api/units");
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("/api/units", 5), "/api/units/5");
        assert_eq!(item_path("/api/units/", 5), "/api/units/5");
    }
}
