//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use contracts::shared::ApiResponse;

use super::error::{RequestError, ServiceError};

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
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

/// Join a configured base URL with an API path, tolerating a trailing slash
/// on the base.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Unwrap the server envelope into its payload.
///
/// `success: false` becomes [`ServiceError::Application`]; a successful
/// envelope without `data` is returned as `Ok(None)`.
pub fn check_response<T>(
    result: Result<ApiResponse<T>, RequestError>,
) -> Result<Option<T>, ServiceError> {
    let response = result?;
    if response.success {
        Ok(response.data)
    } else {
        Err(ServiceError::Application(response.error_message()))
    }
}
