//! HTTP API Client
//!
//! Functions for communicating with the sleep dashboard REST API.

use gloo_net::http::Request;

use crate::state::dashboard::SleepDataResponse;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082";

/// Local storage key that overrides the API base URL
const API_URL_STORAGE_KEY: &str = "sleep_dashboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Fetch all sleep records with the server-side average
pub async fn fetch_sleep_data() -> Result<SleepDataResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/sleep-data", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to fetch sleep data: HTTP {}",
            response.status()
        ));
    }

    response
        .json::<SleepDataResponse>()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8082/"), "http://localhost:8082");
        assert_eq!(normalize_base("http://example.com//"), "http://example.com");
        assert_eq!(normalize_base(DEFAULT_API_BASE), DEFAULT_API_BASE);
    }
}
