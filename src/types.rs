//! Common types and data structures

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the historical data endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub stock_symbol: String,
    pub from_date: String,
    pub to_date: String,
}

/// Successful response body. The records are kept as raw JSON.
#[derive(Debug, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub historical_data: Option<Value>,
}

/// Body the backend sends alongside a failure status
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success {
        symbol: String,
        data: Value,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}
