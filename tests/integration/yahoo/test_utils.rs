//! Test utilities for the Yahoo chart client

use std::sync::Arc;
use std::time::Duration;

use expo_screener::models::bars::PriceBar;
use expo_screener::services::yahoo::{YahooMarketDataProvider, YahooRestClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// New York offset during daylight saving time.
pub const GMT_OFFSET: i64 = -14_400;

/// Yahoo chart body for the given bars, stamped at the 09:30 local open.
pub fn chart_body(symbol: &str, bars: &[PriceBar]) -> Value {
    let timestamps: Vec<i64> = bars
        .iter()
        .map(|bar| {
            bar.date
                .and_hms_opt(13, 30, 0)
                .unwrap()
                .and_utc()
                .timestamp()
        })
        .collect();
    let column = |f: fn(&PriceBar) -> f64| bars.iter().map(f).collect::<Vec<_>>();

    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": symbol,
                    "exchangeTimezoneName": "America/New_York",
                    "gmtoffset": GMT_OFFSET
                },
                "timestamp": timestamps,
                "indicators": {"quote": [{
                    "open": column(|b| b.open),
                    "high": column(|b| b.high),
                    "low": column(|b| b.low),
                    "close": column(|b| b.close),
                    "volume": column(|b| b.volume)
                }]}
            }],
            "error": null
        }
    })
}

pub async fn mock_chart(server: &MockServer, symbol: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol)))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn client(server: &MockServer, max_retries: usize) -> YahooRestClient {
    YahooRestClient::with_client(server.uri(), reqwest::Client::new())
        .with_retries(max_retries, Duration::from_millis(10))
}

pub fn provider(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::new(Arc::new(client(server, 0)))
}
