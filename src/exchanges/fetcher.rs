//! Concurrent depth fetching
//!
//! One GET per catalog entry, all in flight at once. A failed fetch only
//! removes its own exchange from the run.

use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::EndpointCatalog,
    types::Exchange,
};

/// Decoded payload per exchange that answered successfully.
pub type RawBook = BTreeMap<Exchange, Value>;

/// Outcome of a single exchange fetch.
pub type FetchOutcome = (Exchange, DetectorResult<Value>);

pub fn build_http_client(timeout: Duration) -> DetectorResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            warn!("⚠️ Failed to initialize HTTP client: {}", e);
            DetectorError::Network {
                message: "Failed to build HTTP client".to_string(),
                source: Some(e.into()),
            }
        })
}

/// Fetches one exchange's depth payload.
///
/// Network errors, timeouts, non-2xx statuses and undecodable bodies all map
/// to [`DetectorError::ExchangeUnavailable`].
pub async fn fetch_depth(client: &Client, exchange: Exchange, url: &str) -> DetectorResult<Value> {
    let unavailable = |reason: String| DetectorError::ExchangeUnavailable { exchange, reason };

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            unavailable("request timed out".to_string())
        } else {
            unavailable(format!("HTTP request failed: {}", e))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(unavailable(format!(
            "status {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| unavailable(format!("failed to decode JSON body: {}", e)))
}

/// Fetches every catalog entry concurrently and returns one outcome per
/// exchange, in catalog order.
pub async fn fetch_each(client: &Client, catalog: &EndpointCatalog) -> Vec<FetchOutcome> {
    let requests = catalog.endpoints().iter().map(|endpoint| async move {
        let started = Instant::now();
        let outcome = fetch_depth(client, endpoint.exchange, &endpoint.url).await;
        debug!(
            exchange = %endpoint.exchange,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = outcome.is_ok(),
            "Depth fetch finished"
        );
        (endpoint.exchange, outcome)
    });

    join_all(requests).await
}

/// Fetches every catalog entry and merges the successes into a [`RawBook`].
pub async fn fetch_all(client: &Client, catalog: &EndpointCatalog) -> RawBook {
    let outcomes = fetch_each(client, catalog).await;
    let requested = outcomes.len();
    let raw = merge_outcomes(outcomes);

    info!(
        requested,
        responded = raw.len(),
        "📡 Depth snapshots fetched"
    );
    raw
}

/// Keeps successful payloads, logging and dropping failures.
pub fn merge_outcomes(outcomes: Vec<FetchOutcome>) -> RawBook {
    let mut raw = RawBook::new();
    for (exchange, outcome) in outcomes {
        match outcome {
            Ok(payload) => {
                raw.insert(exchange, payload);
            }
            Err(e) => {
                warn!(exchange = %exchange, "⚠️ {}", e);
            }
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn client() -> Client {
        build_http_client(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetch_depth_returns_decoded_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/depth")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"bids":[["1","2"]],"asks":[["3","4"]]}"#)
            .create_async()
            .await;

        let url = format!("{}/depth", server.url());
        let payload = assert_ok!(fetch_depth(&client(), Exchange::Binance, &url).await);

        assert_eq!(payload["bids"][0][0], json!("1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/depth")
            .with_status(429)
            .with_body(r#"{"code":"429000","msg":"Too Many Requests"}"#)
            .create_async()
            .await;

        let url = format!("{}/depth", server.url());
        let err = assert_err!(fetch_depth(&client(), Exchange::Kucoin, &url).await);

        match err {
            DetectorError::ExchangeUnavailable { exchange, reason } => {
                assert_eq!(exchange, Exchange::Kucoin);
                assert!(reason.contains("429"));
            }
            other => panic!("Expected ExchangeUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/depth")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let url = format!("{}/depth", server.url());
        let err = assert_err!(fetch_depth(&client(), Exchange::Gate, &url).await);
        assert!(err.is_exchange_local());
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_siblings() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/okx")
            .with_status(200)
            .with_body(r#"{"code":"0","data":[]}"#)
            .create_async()
            .await;
        let _down = server
            .mock("GET", "/huobi")
            .with_status(503)
            .create_async()
            .await;

        let catalog = EndpointCatalog::from_entries([
            (Exchange::Okx, format!("{}/okx", server.url())),
            (Exchange::Huobi, format!("{}/huobi", server.url())),
            // Nothing listens on port 9; the connection is refused
            (Exchange::Mexc, "http://127.0.0.1:9/mexc".to_string()),
        ]);

        let outcomes = fetch_each(&client(), &catalog).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].0, Exchange::Okx);
        assert!(outcomes[0].1.is_ok());
        assert!(outcomes[1].1.is_err());
        assert!(outcomes[2].1.is_err());

        let raw = merge_outcomes(outcomes);
        assert_eq!(raw.keys().copied().collect::<Vec<_>>(), vec![Exchange::Okx]);
    }

    #[tokio::test]
    async fn slow_exchange_times_out_independently() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/gate")
            .with_status(200)
            .with_body(r#"{"bids":[],"asks":[]}"#)
            .create_async()
            .await;

        let catalog = EndpointCatalog::from_entries([
            (Exchange::Bitfinex, format!("http://{}/book", addr)),
            (Exchange::Gate, format!("{}/gate", server.url())),
        ]);
        let client = build_http_client(Duration::from_millis(300)).unwrap();

        let outcomes = fetch_each(&client, &catalog).await;

        match &outcomes[0].1 {
            Err(DetectorError::ExchangeUnavailable { reason, .. }) => {
                assert!(reason.contains("timed out"), "unexpected reason: {}", reason)
            }
            other => panic!("Expected timeout, got {:?}", other),
        }
        assert!(outcomes[1].1.is_ok());
    }

    #[test]
    fn merge_outcomes_keeps_successes_only() {
        let outcomes = vec![
            (Exchange::Binance, Ok(json!({"bids": []}))),
            (
                Exchange::Bitfinex,
                Err(DetectorError::ExchangeUnavailable {
                    exchange: Exchange::Bitfinex,
                    reason: "request timed out".to_string(),
                }),
            ),
        ];

        let raw = merge_outcomes(outcomes);
        assert_eq!(raw.len(), 1);
        assert!(raw.contains_key(&Exchange::Binance));
    }
}
