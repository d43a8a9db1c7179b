//! Shared test utilities: fixtures and a mock of the upstream services.

#![allow(dead_code)]

use mercadito::config::FeedConfig;
use mercadito::market::Market;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");
pub const PRICING_REPORT_JSON: &str = include_str!("../fixtures/pricing_report.json");

/// Feed configuration pointing both services at `server`.
pub fn feed_config(server: &MockServer, market: Market) -> FeedConfig {
    let mut config = FeedConfig::for_market(market);
    config.catalog_url = server.uri();
    config.pricing_url = server.uri();
    config
}

/// JSON response with the given status.
pub fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

/// Serves `body` as the catalog of `market`.
pub async fn mount_catalog(server: &MockServer, market: Market, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/catalogs/v1/catalogs/{}/products",
            market.catalog_id()
        )))
        .and(query_param("country_id", market.country_id().to_string()))
        .and(query_param("tier_id", market.tier_id().to_string()))
        .respond_with(json_response(status, body))
        .mount(server)
        .await;
}

/// Serves `body` as the pricing report for `erp_code` in Argentina.
pub async fn mount_report(server: &MockServer, erp_code: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/pricingreport/verification/{erp_code}")))
        .and(query_param("country_id", "1"))
        .respond_with(json_response(status, body))
        .mount(server)
        .await;
}

/// Path and query of every request `server` has seen, in arrival order.
pub async fn request_targets(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| match request.url.query() {
            Some(query) => format!("{}?{query}", request.url.path()),
            None => request.url.path().to_string(),
        })
        .collect()
}
