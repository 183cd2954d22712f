//! HTTP price feed reader.
//!
//! Fetches the latest `{answer, decimals, updated_at}` datum from the
//! configured `PRICE_FEED_URL`.

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{OracleError, Result};
use crate::price::PriceDatum;

/// Fetch and validate the latest datum from the HTTP feed.
///
/// # Errors
/// Returns error if:
/// - The request fails or times out
/// - The feed answers with a non-success status
/// - The body is not a valid datum
/// - The answer is not positive
pub async fn fetch_latest(config: &Config) -> Result<PriceDatum> {
    info!("Fetching price from: {}", config.price_feed_url);

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| OracleError::Network(format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(&config.price_feed_url)
        .send()
        .await
        .map_err(|e| OracleError::Network(format!("Price feed request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(OracleError::Feed(format!(
            "price feed returned status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| OracleError::Network(format!("Failed to read response body: {e}")))?;
    debug!("Price feed response: {}", body);

    let datum: PriceDatum = serde_json::from_str(&body)
        .map_err(|e| OracleError::Feed(format!("malformed price datum: {e}")))?;
    datum.validate()?;

    info!(
        "Price {} (decimals {}, updated_at {})",
        datum.display_price(),
        datum.decimals,
        datum.updated_at
    );
    Ok(datum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mock_config;

    fn config_for(server: &mockito::ServerGuard) -> Config {
        let mut config = mock_config();
        config.price_feed_url = format!("{}/xlm-usd", server.url());
        config
    }

    #[tokio::test]
    async fn test_fetch_latest_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/xlm-usd")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer":"12000000","decimals":8,"updated_at":1700000000}"#)
            .create_async()
            .await;

        let datum = fetch_latest(&config_for(&server)).await.unwrap();
        assert_eq!(
            datum,
            PriceDatum {
                answer: 12_000_000,
                decimals: 8,
                updated_at: 1_700_000_000,
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_latest_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/xlm-usd")
            .with_status(503)
            .create_async()
            .await;

        let err = fetch_latest(&config_for(&server)).await.unwrap_err();
        assert!(matches!(err, OracleError::Feed(_)));
    }

    #[tokio::test]
    async fn test_fetch_latest_rejects_non_positive_answer() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/xlm-usd")
            .with_status(200)
            .with_body(r#"{"answer":0,"decimals":8,"updated_at":1}"#)
            .create_async()
            .await;

        let err = fetch_latest(&config_for(&server)).await.unwrap_err();
        assert!(matches!(err, OracleError::InvalidPrice(0)));
    }

    #[tokio::test]
    async fn test_fetch_latest_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/xlm-usd")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = fetch_latest(&config_for(&server)).await.unwrap_err();
        assert!(matches!(err, OracleError::Feed(_)));
    }
}
