//! Outbound client for the random-quote REST endpoint.

use std::time::Duration;

use tracing::debug;

use crate::{types::Quote, CoreError};

/// Thin wrapper around a `reqwest::Client` bound to a single quote URL.
#[derive(Clone, Debug)]
pub struct QuoteClient {
    http: reqwest::Client,
    url: String,
}

impl QuoteClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;
        Ok(Self::with_client(http, url))
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one GET and decode the `{"id", "quote"}` body.
    pub async fn fetch(&self) -> Result<Quote, CoreError> {
        debug!(url = %self.url, "fetching quote");
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Status(status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        serde_json::from_slice::<Quote>(&body).map_err(|e| CoreError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use tokio::net::TcpListener;

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/api/random",
                get(|| async { Json(serde_json::json!({"id": 7, "quote": "Working with Spring Boot is like pair-programming."})) }),
            )
            .route("/api/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/api/garbage", get(|| async { "not json" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_decodes_quote() {
        let base = spawn_stub().await;
        let client = QuoteClient::new(format!("{base}/api/random"), Duration::from_secs(5)).unwrap();
        let quote = client.fetch().await.unwrap();
        assert_eq!(quote.id, 7);
        assert_eq!(quote.to_string(), "Quote{id=7, quote='Working with Spring Boot is like pair-programming.'}");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let base = spawn_stub().await;
        let client = QuoteClient::new(format!("{base}/api/down"), Duration::from_secs(5)).unwrap();
        match client.fetch().await {
            Err(CoreError::Status(code)) => assert_eq!(code, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let base = spawn_stub().await;
        let client = QuoteClient::new(format!("{base}/api/garbage"), Duration::from_secs(5)).unwrap();
        assert!(matches!(client.fetch().await, Err(CoreError::Parse(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // bind then drop so the port is closed
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = QuoteClient::new(format!("http://{addr}/api/random"), Duration::from_secs(2)).unwrap();
        assert!(matches!(client.fetch().await, Err(CoreError::Network(_))));
    }
}
