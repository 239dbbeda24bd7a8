//! Application constants and configuration

pub const APP_NAME: &str = "Stock History Viewer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BACKEND_URL: &str = "https://stock-predictor-backend.azurewebsites.net";
pub const FETCH_HISTORICAL_PATH: &str = "/api/fetch_historical_data";

/// Overrides the backend base URL from settings.json
pub const BACKEND_URL_ENV: &str = "STOCK_BACKEND_URL";

/// Shown when a failed response carries no usable `error` field
pub const DEFAULT_FETCH_ERROR: &str = "Failed to fetch data from backend.";
pub const BACKEND_HINT: &str = "Make sure your backend is running and reachable.";

pub const TITLE: &str = "NSE Stock Predictor & Agent Evaluation";

pub const DISCLAIMER: &str = "This application fetches real data from the ICICI Direct Breeze API \
    through the backend service, which caches it in a Firestore database for faster retrieval \
    and to reduce API calls. The backend needs BREEZE_API_KEY, BREEZE_SECRET_KEY, \
    BREEZE_SESSION_TOKEN and FIREBASE_SERVICE_ACCOUNT_KEY_PATH set in its .env file. \
    The BREEZE_SESSION_TOKEN has to be generated manually every day. \
    Do not use this app for actual financial decisions.";
