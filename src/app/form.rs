//! Fetch form: input fields, submit gating and the request lifecycle

use crate::api::{fetch_historical_data, FetchError};
use crate::constants::BACKEND_HINT;
use crate::types::{FetchRequest, ViewState};
use eframe::egui;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Finished request, tagged with the id it was issued under
struct Completion {
    request_id: u64,
    symbol: String,
    result: Result<Option<Value>, FetchError>,
}

type Inbox = Arc<Mutex<Option<Completion>>>;

#[derive(Default)]
pub struct FetchForm {
    pub stock_symbol: String,
    pub start_date: String,
    pub end_date: String,
    state: ViewState,
    request_id: u64,
    inbox: Inbox,
}

impl FetchForm {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Symbols are stored upper-cased, whatever was typed.
    pub fn normalize_symbol(&mut self) {
        if self.stock_symbol.chars().any(|c| c.is_lowercase()) {
            self.stock_symbol = self.stock_symbol.to_uppercase();
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
            && !self.stock_symbol.is_empty()
            && !self.start_date.is_empty()
            && !self.end_date.is_empty()
    }

    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            stock_symbol: self.stock_symbol.clone(),
            from_date: self.start_date.clone(),
            to_date: self.end_date.clone(),
        }
    }

    /// Start a request unless submitting is currently disabled.
    /// Returns whether a request was issued.
    pub fn submit(
        &mut self,
        runtime: &tokio::runtime::Handle,
        client: &reqwest::Client,
        url: String,
        ctx: &egui::Context,
    ) -> bool {
        if !self.can_submit() {
            return false;
        }

        self.request_id += 1;
        self.state = ViewState::Loading;

        let request = self.request();
        let request_id = self.request_id;
        let inbox = self.inbox.clone();
        let client = client.clone();
        let ctx = ctx.clone();

        info!(
            request_id,
            symbol = %request.stock_symbol,
            from = %request.from_date,
            to = %request.to_date,
            "Fetching historical data"
        );

        runtime.spawn(async move {
            let result = fetch_historical_data(&client, &url, &request).await;
            *inbox.lock().unwrap_or_else(|e| e.into_inner()) = Some(Completion {
                request_id,
                symbol: request.stock_symbol,
                result,
            });
            ctx.request_repaint();
        });
        true
    }

    /// Apply a finished request, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let completion = self.inbox.lock().unwrap_or_else(|e| e.into_inner()).take();
        match completion {
            Some(completion) => self.finish(completion),
            None => false,
        }
    }

    fn finish(&mut self, completion: Completion) -> bool {
        if completion.request_id != self.request_id {
            debug!(
                stale = completion.request_id,
                current = self.request_id,
                "Dropping stale response"
            );
            return false;
        }

        self.state = match completion.result {
            Ok(None) => {
                info!(request_id = completion.request_id, "Backend returned no historical data");
                ViewState::Idle
            }
            Ok(Some(data)) => {
                info!(
                    request_id = completion.request_id,
                    entries = data.as_array().map(Vec::len),
                    "Historical data received"
                );
                ViewState::Success {
                    symbol: completion.symbol,
                    data,
                }
            }
            Err(e) => {
                error!(
                    request_id = completion.request_id,
                    status = ?e.status(),
                    error = %e,
                    "Error fetching data"
                );
                ViewState::Error(error_message(&e))
            }
        };
        true
    }
}

/// User-facing text for a failed fetch
pub fn error_message(err: &FetchError) -> String {
    let cause = err.to_string();
    format!("Error: {}. {}", cause.trim_end_matches('.'), BACKEND_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{refused_backend, spawn_backend};
    use crate::constants::DEFAULT_FETCH_ERROR;
    use crate::utils::endpoint_url;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    fn filled_form() -> FetchForm {
        FetchForm {
            stock_symbol: "TCS".into(),
            start_date: "2023-01-01".into(),
            end_date: "2023-01-31".into(),
            ..Default::default()
        }
    }

    fn submit_to(form: &mut FetchForm, rt: &tokio::runtime::Runtime, base: &str) {
        let issued = form.submit(
            rt.handle(),
            &reqwest::Client::new(),
            endpoint_url(base),
            &egui::Context::default(),
        );
        assert!(issued);
        assert!(form.is_loading());
        assert!(!form.can_submit());
    }

    fn wait_until_settled(form: &mut FetchForm) {
        for _ in 0..500 {
            form.poll();
            if !form.is_loading() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("request never completed");
    }

    fn error_text(form: &FetchForm) -> &str {
        match form.state() {
            ViewState::Error(msg) => msg,
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn submit_requires_every_field() {
        let mut form = filled_form();
        assert!(form.can_submit());

        form.stock_symbol.clear();
        assert!(!form.can_submit());
        form.stock_symbol = "TCS".into();

        form.start_date.clear();
        assert!(!form.can_submit());
        form.start_date = "2023-01-01".into();

        form.end_date.clear();
        assert!(!form.can_submit());
    }

    #[test]
    fn submit_is_disabled_while_loading() {
        let mut form = filled_form();
        form.state = ViewState::Loading;
        assert!(!form.can_submit());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let issued = form.submit(
            rt.handle(),
            &reqwest::Client::new(),
            endpoint_url("http://127.0.0.1:1"),
            &egui::Context::default(),
        );
        assert!(!issued);
        assert_eq!(form.request_id, 0);
    }

    #[test]
    fn symbol_is_upper_cased() {
        let mut form = FetchForm {
            stock_symbol: "infy".into(),
            ..Default::default()
        };
        form.normalize_symbol();
        assert_eq!(form.stock_symbol, "INFY");
    }

    #[test]
    fn success_holds_payload() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (base, _) = rt.block_on(spawn_backend(
            StatusCode::OK,
            r#"{"historical_data":[{"date":"2023-01-01","close":100}]}"#,
        ));

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);

        match form.state() {
            ViewState::Success { symbol, data } => {
                assert_eq!(symbol, "TCS");
                assert_eq!(data, &json!([{"date": "2023-01-01", "close": 100}]));
                assert_eq!(data.as_array().map(Vec::len), Some(1));
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert!(form.can_submit());
    }

    #[test]
    fn backend_error_is_shown() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (base, _) = rt.block_on(spawn_backend(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Invalid date range"}"#,
        ));

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);

        assert!(error_text(&form).contains("Invalid date range"));
        assert!(error_text(&form).contains(BACKEND_HINT));
    }

    #[test]
    fn unparsable_failure_uses_default_message() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (base, _) = rt.block_on(spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"));

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);

        let msg = error_text(&form);
        assert!(msg.contains(DEFAULT_FETCH_ERROR.trim_end_matches('.')));
        assert!(!msg.contains(".."));
    }

    #[test]
    fn connection_refused_mentions_cause_and_hint() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let base = refused_backend();

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);

        let msg = error_text(&form);
        assert!(msg.starts_with("Error: "));
        assert!(msg.to_lowercase().contains("connect"));
        assert!(msg.ends_with(BACKEND_HINT));
    }

    #[test]
    fn form_is_resubmittable_after_error() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let base = refused_backend();

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);
        assert!(form.can_submit());

        form.end_date.clear();
        assert!(!form.can_submit());
        form.end_date = "2023-02-28".into();
        assert!(form.can_submit());

        let (base, _) = rt.block_on(spawn_backend(StatusCode::OK, r#"{"historical_data":[]}"#));
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);
        assert!(matches!(form.state(), ViewState::Success { .. }));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut form = filled_form();
        form.request_id = 2;
        form.state = ViewState::Loading;

        *form.inbox.lock().unwrap() = Some(Completion {
            request_id: 1,
            symbol: "OLD".into(),
            result: Ok(Some(json!([]))),
        });
        assert!(!form.poll());
        assert!(form.is_loading());

        *form.inbox.lock().unwrap() = Some(Completion {
            request_id: 2,
            symbol: "TCS".into(),
            result: Ok(Some(json!([{"close": 1}]))),
        });
        assert!(form.poll());
        match form.state() {
            ViewState::Success { symbol, data } => {
                assert_eq!(symbol, "TCS");
                assert_eq!(data, &json!([{"close": 1}]));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn null_payload_settles_without_alert_or_result() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (base, _) = rt.block_on(spawn_backend(StatusCode::OK, r#"{"historical_data":null}"#));

        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);

        assert_eq!(form.state(), &ViewState::Idle);
        assert!(form.can_submit());
    }

    #[test]
    fn missing_payload_clears_previous_result() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (base, _) = rt.block_on(spawn_backend(StatusCode::OK, r#"{"historical_data":[1, 2]}"#));
        let mut form = filled_form();
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);
        assert!(matches!(form.state(), ViewState::Success { .. }));

        let (base, _) = rt.block_on(spawn_backend(StatusCode::OK, r#"{"status":"cached"}"#));
        submit_to(&mut form, &rt, &base);
        wait_until_settled(&mut form);
        assert_eq!(form.state(), &ViewState::Idle);
    }

    #[test]
    fn poll_without_completion_changes_nothing() {
        let mut form = filled_form();
        assert!(!form.poll());
        assert_eq!(form.state(), &ViewState::Idle);
    }
}
