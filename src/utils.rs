use crate::constants::{APP_NAME, FETCH_HISTORICAL_PATH};
use std::path::PathBuf;

/// Get the app data directory path (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Full URL of the historical data endpoint for a backend base URL
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), FETCH_HISTORICAL_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_appends_path() {
        assert_eq!(
            endpoint_url("https://example.com"),
            "https://example.com/api/fetch_historical_data"
        );
    }

    #[test]
    fn endpoint_url_trims_trailing_slashes() {
        assert_eq!(
            endpoint_url(" http://localhost:5000// "),
            "http://localhost:5000/api/fetch_historical_data"
        );
    }
}
