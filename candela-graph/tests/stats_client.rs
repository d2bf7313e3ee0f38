use candela_core::{CandelaError, ChainId, Period};
use candela_graph::{StatsClient, StatsConfig};
use httpmock::prelude::*;
use serde_json::json;

const CHAIN: ChainId = ChainId(43_114);

fn client_for(server: &MockServer) -> StatsClient {
    StatsClient::new(StatsConfig {
        base_url: server.base_url(),
        timeout: std::time::Duration::from_secs(5),
    })
}

fn candle_json(t: i64) -> serde_json::Value {
    json!({"t": t, "o": 10.0, "c": 11.0, "h": 12.0, "l": 9.0})
}

#[tokio::test]
async fn maps_payload_and_applies_display_offset() {
    let server = MockServer::start_async().await;
    let now = 1_700_000_000;
    let prices: Vec<_> = (0..10).map(|i| candle_json(i64::from(i) * 300)).collect();

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/candles/BTC")
                .query_param("preferableChainId", "43114")
                .query_param("period", "5m")
                .query_param("preferableSource", "fast");
            then.status(200)
                .json_body(json!({"prices": prices, "updatedAt": now}));
        })
        .await;

    let tz = 3_600;
    let candles = client_for(&server)
        .candles(CHAIN, "BTC", Period::M5, now - 900_000, tz, now)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(candles.len(), 10);
    assert_eq!(candles[0].time, tz);
    assert_eq!(candles[1].time, 300 + tz);
    assert_eq!(candles[0].open, 10.0);
    assert_eq!(candles[0].high, 12.0);
    assert_eq!(candles[0].low, 9.0);
    assert_eq!(candles[0].close, 11.0);
}

#[tokio::test]
async fn thin_payload_is_rejected() {
    let server = MockServer::start_async().await;
    let now = 1_700_000_000;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/candles/BTC");
            then.status(200).json_body(
                json!({"prices": [candle_json(0), candle_json(300)], "updatedAt": now}),
            );
        })
        .await;

    let err = client_for(&server)
        .candles(CHAIN, "BTC", Period::M5, 0, 0, now)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CandelaError::InsufficientData { got: 2, want: 10 }
    ));
}

#[tokio::test]
async fn obsolete_payload_is_rejected() {
    let server = MockServer::start_async().await;
    let now = 1_700_000_000;
    let prices: Vec<_> = (0..10).map(|i| candle_json(i64::from(i) * 300)).collect();
    let stale_update = now - 31 * 60;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/candles/BTC");
            then.status(200)
                .json_body(json!({"prices": prices, "updatedAt": stale_update}));
        })
        .await;

    let err = client_for(&server)
        .candles(CHAIN, "BTC", Period::M5, 0, 0, now)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CandelaError::Stale { updated_at, .. } if updated_at == stale_update
    ));
}

#[tokio::test]
async fn http_failure_is_transport() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/candles/BTC");
            then.status(502);
        })
        .await;

    let err = client_for(&server)
        .candles(CHAIN, "BTC", Period::M5, 0, 0, 1_700_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::Transport { .. }));
}
