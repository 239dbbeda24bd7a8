//! Backend client for the historical data endpoint

use crate::constants::DEFAULT_FETCH_ERROR;
use crate::types::{ErrorBody, FetchRequest, FetchResponse};
use serde_json::Value;
use std::error::Error as StdError;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-success status. Carries the backend's `error` text or the default message.
    #[error("{message}")]
    Backend {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{}", error_chain(.0))]
    Network(#[source] reqwest::Error),
    #[error("invalid response from backend: {}", error_chain(.0))]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// HTTP status of a rejected request, if the backend answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Backend { status, .. } => Some(*status),
            FetchError::Network(e) | FetchError::Decode(e) => e.status(),
        }
    }
}

/// Joins an error with all of its sources, e.g.
/// `error sending request for url (...): client error (Connect): Connection refused`
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        let text = e.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = e.source();
    }
    out
}

/// POST the request and return the `historical_data` value untouched.
/// `None` when the backend answered without one (absent or `null`).
pub async fn fetch_historical_data(
    client: &reqwest::Client,
    url: &str,
    request: &FetchRequest,
) -> Result<Option<Value>, FetchError> {
    debug!(
        url,
        symbol = %request.stock_symbol,
        from = %request.from_date,
        to = %request.to_date,
        "Posting historical data request"
    );

    let response = client
        .post(url)
        .json(request)
        .send()
        .await
        .map_err(FetchError::Network)?;

    let status = response.status();
    debug!(status = %status, "Backend response received");

    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(msg) }) if !msg.is_empty() => msg,
            Ok(_) => DEFAULT_FETCH_ERROR.to_string(),
            Err(e) => {
                debug!(error = %e, "Error body was not JSON");
                DEFAULT_FETCH_ERROR.to_string()
            }
        };
        return Err(FetchError::Backend { status, message });
    }

    let body: FetchResponse = response.json().await.map_err(FetchError::Decode)?;
    Ok(body.historical_data)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::constants::FETCH_HISTORICAL_PATH;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// Last request body the mock backend received
    pub type Recorded = Arc<Mutex<Option<Value>>>;

    /// Serve a fixed status/body on the fetch endpoint. Returns the base URL.
    pub async fn spawn_backend(status: StatusCode, body: &'static str) -> (String, Recorded) {
        let recorded: Recorded = Arc::new(Mutex::new(None));
        let sink = recorded.clone();
        let app = Router::new().route(
            FETCH_HISTORICAL_PATH,
            post(move |Json(payload): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(payload);
                    (status, body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), recorded)
    }

    /// Base URL of a port nothing listens on
    pub fn refused_backend() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }
}
