//! Stateless HTTP request builder and response parser for the transaction API.
//!
//! # Design
//! `TransactionClient` holds only a base URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Every `parse_*` method goes through [`normalize`], so a
//! failed call has the same error shape whichever endpoint produced it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, INVALID_JSON_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTransaction, Transaction, TransactionStats};

const JSON: &str = "application/json";

/// Window the server applies when a recent listing names no `days`.
pub const DEFAULT_RECENT_DAYS: u32 = 30;

/// Characters left untouched in a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Synchronous, stateless client for the transaction API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    base_url: String,
}

impl TransactionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn build_list_transactions(&self) -> HttpRequest {
        self.get("/transactions")
    }

    pub fn build_get_transaction(&self, id: i64) -> HttpRequest {
        self.get(&format!("/transactions/{id}"))
    }

    pub fn build_list_suspicious(&self) -> HttpRequest {
        self.get("/transactions/suspicious")
    }

    pub fn build_list_by_category(&self, category: &str) -> HttpRequest {
        let segment = utf8_percent_encode(category, PATH_SEGMENT);
        self.get(&format!("/transactions/category/{segment}"))
    }

    pub fn build_list_high_value(&self) -> HttpRequest {
        self.get("/transactions/high-value")
    }

    /// Transactions dated within the last `days` days.
    pub fn build_list_recent(&self, days: u32) -> HttpRequest {
        self.get(&format!("/transactions/recent?days={days}"))
    }

    pub fn build_stats(&self) -> HttpRequest {
        self.get("/transactions/stats")
    }

    pub fn build_count_by_category(&self) -> HttpRequest {
        self.get("/transactions/stats/by-category")
    }

    pub fn build_create_transaction(&self, input: &NewTransaction) -> Result<HttpRequest, ClientError> {
        self.with_body(HttpMethod::Post, "/transactions", input)
    }

    /// Full replacement of the stored transaction with `input`.
    pub fn build_update_transaction(&self, id: i64, input: &Transaction) -> Result<HttpRequest, ClientError> {
        self.with_body(HttpMethod::Put, &format!("/transactions/{id}"), input)
    }

    pub fn build_delete_transaction(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(&format!("/transactions/{id}")),
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
        }
    }

    pub fn parse_list_transactions(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        normalize(response)
    }

    pub fn parse_get_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        normalize(response)
    }

    pub fn parse_list_suspicious(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        normalize(response)
    }

    pub fn parse_list_by_category(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        normalize(response)
    }

    pub fn parse_list_high_value(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        normalize(response)
    }

    pub fn parse_list_recent(&self, response: HttpResponse) -> Result<Vec<Transaction>, ApiError> {
        normalize(response)
    }

    pub fn parse_stats(&self, response: HttpResponse) -> Result<TransactionStats, ApiError> {
        normalize(response)
    }

    /// The server answers with `[category, count]` arrays.
    pub fn parse_count_by_category(&self, response: HttpResponse) -> Result<Vec<(String, u64)>, ApiError> {
        normalize(response)
    }

    pub fn parse_create_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        normalize(response)
    }

    pub fn parse_update_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        normalize(response)
    }

    /// A successful delete carries no meaningful body, so only the status is
    /// inspected.
    pub fn parse_delete_transaction(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        Err(error_from_response(response))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
        }
    }

    fn with_body<B: Serialize>(&self, method: HttpMethod, path: &str, input: &B) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(|e| ClientError::Unexpected(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: self.url(path),
            headers: vec![
                ("accept".to_string(), JSON.to_string()),
                ("content-type".to_string(), JSON.to_string()),
            ],
            body: Some(body),
        })
    }
}

/// Turn a response into the expected payload or a structured error.
///
/// Non-2xx responses become [`ApiError::Http`] with a message resolved by
/// [`error_from_response`]. A 2xx response whose body does not deserialize
/// into `T` keeps its status but reports [`INVALID_JSON_MESSAGE`].
pub fn normalize<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(error_from_response(response));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::debug!(status = response.status, error = %e, "response body is not the expected JSON");
        ApiError::Http {
            status: response.status,
            status_text: response.status_text,
            message: INVALID_JSON_MESSAGE.to_string(),
            payload: None,
        }
    })
}

/// Resolve the message for a non-2xx response.
///
/// Preference order: the `message` field of a JSON body, the raw body text,
/// then `HTTP {status}: {status_text}`. A JSON body without a usable message
/// still falls through to the default rather than to its text.
fn error_from_response(response: HttpResponse) -> ApiError {
    let default_message = format!("HTTP {}: {}", response.status, response.status_text);
    let (message, payload) = match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(value) => {
            let message = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or(default_message);
            (message, Some(value))
        }
        Err(_) if !response.body.is_empty() => (response.body, None),
        Err(_) => (default_message, None),
    };
    ApiError::Http {
        status: response.status,
        status_text: response.status_text,
        message,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn client() -> TransactionClient {
        TransactionClient::new("http://localhost:8080/api")
    }

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    fn sample() -> Transaction {
        Transaction {
            id: 42,
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            amount: 5000.0,
            description: "Wire transfer".to_string(),
            category: "transfer".to_string(),
            suspicious: true,
            created_at: None,
        }
    }

    const ONE_ITEM: &str = r#"[{"id":1,"transactionDate":"2024-01-15","amount":100.5,"description":"Supermarket","category":"groceries","suspicious":false,"createdAt":"2024-01-15T10:30:00"}]"#;

    #[test]
    fn build_list_transactions_produces_correct_request() {
        let req = client().build_list_transactions();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/transactions");
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert!(req.header("content-type").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_and_filtered_requests_use_expected_paths() {
        let c = client();
        assert_eq!(c.build_get_transaction(7).url, "http://localhost:8080/api/transactions/7");
        assert_eq!(c.build_list_suspicious().url, "http://localhost:8080/api/transactions/suspicious");
        assert_eq!(c.build_list_high_value().url, "http://localhost:8080/api/transactions/high-value");
        assert_eq!(c.build_stats().url, "http://localhost:8080/api/transactions/stats");
        assert_eq!(
            c.build_count_by_category().url,
            "http://localhost:8080/api/transactions/stats/by-category"
        );
    }

    #[test]
    fn build_list_recent_carries_days_query() {
        let c = client();
        assert_eq!(
            c.build_list_recent(DEFAULT_RECENT_DAYS).url,
            "http://localhost:8080/api/transactions/recent?days=30"
        );
        let req = c.build_list_recent(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/transactions/recent?days=7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_by_category_escapes_the_segment() {
        let req = client().build_list_by_category("home & garden");
        assert_eq!(req.url, "http://localhost:8080/api/transactions/category/home%20%26%20garden");
        let req = client().build_list_by_category("Alimentación");
        assert_eq!(req.url, "http://localhost:8080/api/transactions/category/Alimentaci%C3%B3n");
    }

    #[test]
    fn build_create_transaction_sends_json_body() {
        let input = NewTransaction {
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount: 150.5,
            description: "Groceries".to_string(),
            category: "groceries".to_string(),
            suspicious: false,
        };
        let req = client().build_create_transaction(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8080/api/transactions");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["transactionDate"], "2024-01-15");
        assert_eq!(body["amount"], 150.5);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_transaction_sends_full_resource() {
        let req = client().build_update_transaction(42, &sample()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:8080/api/transactions/42");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 42);
        assert_eq!(body["suspicious"], true);
        assert_eq!(body["category"], "transfer");
    }

    #[test]
    fn build_delete_transaction_has_no_body() {
        let req = client().build_delete_transaction(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8080/api/transactions/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = TransactionClient::new("http://localhost:8080/api/");
        assert_eq!(c.build_list_transactions().url, "http://localhost:8080/api/transactions");
    }

    #[test]
    fn parse_list_transactions_success() {
        let txs = client().parse_list_transactions(response(200, "OK", ONE_ITEM)).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "Supermarket");
        assert!(txs[0].created_at.is_some());
    }

    #[test]
    fn any_2xx_status_is_success() {
        let body = serde_json::to_string(&sample()).unwrap();
        let tx = client().parse_create_transaction(response(201, "Created", &body)).unwrap();
        assert_eq!(tx, sample());
    }

    #[test]
    fn error_message_comes_from_json_message_field() {
        let err = client()
            .parse_list_transactions(response(500, "Internal Server Error", r#"{"message":"Internal Server Error"}"#))
            .unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(err.status_text(), "Internal Server Error");
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.payload().unwrap()["message"], "Internal Server Error");
    }

    #[test]
    fn error_message_falls_back_to_body_text() {
        let err = client()
            .parse_get_transaction(response(502, "Bad Gateway", "upstream unavailable"))
            .unwrap_err();
        assert_eq!(err.status(), 502);
        assert_eq!(err.message(), "upstream unavailable");
        assert!(err.payload().is_none());
    }

    #[test]
    fn error_message_falls_back_to_status_line() {
        let err = client().parse_get_transaction(response(404, "Not Found", "")).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.message(), "HTTP 404: Not Found");
    }

    #[test]
    fn json_error_without_message_uses_status_line() {
        let err = client()
            .parse_stats(response(404, "Not Found", r#"{"error":"no such route","timestamp":1}"#))
            .unwrap_err();
        assert_eq!(err.message(), "HTTP 404: Not Found");
        assert_eq!(err.payload().unwrap()["error"], "no such route");
    }

    #[test]
    fn empty_json_message_uses_status_line() {
        let err = client()
            .parse_list_suspicious(response(400, "Bad Request", r#"{"message":""}"#))
            .unwrap_err();
        assert_eq!(err.message(), "HTTP 400: Bad Request");
    }

    #[test]
    fn unparseable_success_body_keeps_success_status() {
        let err = client().parse_list_transactions(response(200, "OK", "not json")).unwrap_err();
        assert_eq!(err.status(), 200);
        assert_eq!(err.status_text(), "OK");
        assert_eq!(err.message(), INVALID_JSON_MESSAGE);
    }

    #[test]
    fn parse_delete_ignores_success_body() {
        assert!(client().parse_delete_transaction(response(204, "No Content", "")).is_ok());
        assert!(client().parse_delete_transaction(response(200, "OK", "not json")).is_ok());
    }

    #[test]
    fn parse_delete_not_found_is_http_error() {
        let err = client()
            .parse_delete_transaction(response(404, "Not Found", r#"{"message":"Transaction not found with ID: 9"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(err.message(), "Transaction not found with ID: 9");
    }

    #[test]
    fn parse_list_recent_success_and_bad_window() {
        let txs = client().parse_list_recent(response(200, "OK", ONE_ITEM)).unwrap();
        assert_eq!(txs[0].id, 1);

        let err = client()
            .parse_list_recent(response(400, "Bad Request", r#"{"message":"Days must be positive","timestamp":1}"#))
            .unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Days must be positive");
    }

    #[test]
    fn parse_count_by_category_reads_pairs() {
        let counts = client()
            .parse_count_by_category(response(200, "OK", r#"[["transfer",2],["food",1]]"#))
            .unwrap();
        assert_eq!(counts, vec![("transfer".to_string(), 2), ("food".to_string(), 1)]);
    }

    #[test]
    fn parse_stats_success() {
        let body = r#"{"total":1,"totalAmount":10.0,"averageAmount":10.0,"suspiciousCount":0,
                       "categoryBreakdown":[{"category":"food","count":1,"totalAmount":10.0}]}"#;
        let stats = client().parse_stats(response(200, "OK", body)).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.category_breakdown[0].category, "food");
    }
}
