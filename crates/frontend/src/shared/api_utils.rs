//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing RPC URLs.

use crate::shared::config::RemoteConfig;

/// Get the base URL for API requests
///
/// Uses `remote.base_url` from configuration when set, otherwise the
/// origin of the current window location.
///
/// # Returns
/// - API base URL like "https://xyz.supabase.co" or "http://localhost:8080"
/// - Empty string if neither is available
pub fn api_base(remote: &RemoteConfig) -> String {
    let configured = remote.base_url.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full RPC URL for a remote procedure
///
/// # Example
/// ```rust,ignore
/// let url = rpc_url("https://xyz.supabase.co", "/rest/v1/rpc", "get_drilldown_data");
/// assert_eq!(url, "https://xyz.supabase.co/rest/v1/rpc/get_drilldown_data");
/// ```
pub fn rpc_url(base: &str, rpc_prefix: &str, endpoint: &str) -> String {
    let prefix = rpc_prefix.trim_matches('/');
    let endpoint = endpoint.trim_matches('/');
    if prefix.is_empty() {
        format!("{}/{}", base.trim_end_matches('/'), endpoint)
    } else {
        format!("{}/{}/{}", base.trim_end_matches('/'), prefix, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_url() {
        assert_eq!(
            rpc_url("https://xyz.supabase.co/", "/rest/v1/rpc", "get_drilldown_data"),
            "https://xyz.supabase.co/rest/v1/rpc/get_drilldown_data"
        );
        assert_eq!(rpc_url("http://h", "", "/f/"), "http://h/f");
    }

    #[test]
    fn test_api_base_prefers_config() {
        let remote = RemoteConfig {
            base_url: "https://xyz.supabase.co/".into(),
            rpc_prefix: "/rest/v1/rpc".into(),
            api_key: String::new(),
        };
        assert_eq!(api_base(&remote), "https://xyz.supabase.co");
    }
}
