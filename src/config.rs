//! Application configuration loaded from environment variables.
//!
//! Every variable is optional; empty values are treated as unset.
//! - `MERCADITO_MARKET`: `argentina` (default) or `mexico`
//! - `MERCADITO_CATALOG_URL`: catalog service base URL
//! - `MERCADITO_PRICING_URL`: pricing verification service base URL
//! - `MERCADITO_REFRESH_DISCOUNT_DATES`: move discount end dates to today
//! - `MERCADITO_PRICING_CONCURRENCY`: in-flight competitor lookups
//! - `MERCADITO_HTTP_TIMEOUT_SECS`: per-request timeout
//! - `MERCADITO_COMPETITORS_FILE`: JSON competitor list override
//! - `MERCADITO_LOG_FILE`: where tracing output is written

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::market::{Competitor, Market};

/// Default public catalog service.
pub const DEFAULT_CATALOG_URL: &str = "https://public.nilus.co";

/// Default pricing verification service.
pub const DEFAULT_PRICING_URL: &str = "https://us-central1-nilus-prod.cloudfunctions.net";

const DEFAULT_PRICING_CONCURRENCY: usize = 64;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILE: &str = "mercadito.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub log_file: PathBuf,
}

/// Everything the feed assembler needs, injected at construction.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub market: Market,
    pub catalog_url: String,
    pub pricing_url: String,
    /// Rewrite discount end dates to today's date before sorting.
    pub refresh_discount_dates: bool,
    pub pricing_concurrency: usize,
    pub http_timeout: Duration,
    /// Competitor reference list; order decides ties.
    pub competitors: Vec<Competitor>,
}

impl FeedConfig {
    /// Defaults for `market` against the public services.
    pub fn for_market(market: Market) -> Self {
        Self {
            market,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            pricing_url: DEFAULT_PRICING_URL.to_string(),
            refresh_discount_dates: false,
            pricing_concurrency: DEFAULT_PRICING_CONCURRENCY,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            competitors: market.default_competitors(),
        }
    }
}

/// Loads the application configuration from the process environment.
///
/// # Errors
///
/// Returns [`MercaditoError::Config`](crate::MercaditoError::Config) if a
/// variable holds an invalid value or the competitors file is unreadable.
pub fn fetch_config() -> crate::Result<AppConfig> {
    load_config(|name| std::env::var(name).ok())
}

/// Builds the configuration from an arbitrary variable source.
///
/// # Errors
///
/// See [`fetch_config`].
pub fn load_config<F>(lookup: F) -> crate::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

    let market = match var("MERCADITO_MARKET") {
        Some(raw) => raw.parse::<Market>()?,
        None => Market::default(),
    };

    let mut feed = FeedConfig::for_market(market);
    if let Some(url) = var("MERCADITO_CATALOG_URL") {
        feed.catalog_url = url.trim_end_matches('/').to_string();
    }
    if let Some(url) = var("MERCADITO_PRICING_URL") {
        feed.pricing_url = url.trim_end_matches('/').to_string();
    }
    if let Some(raw) = var("MERCADITO_REFRESH_DISCOUNT_DATES") {
        feed.refresh_discount_dates = parse_bool("MERCADITO_REFRESH_DISCOUNT_DATES", &raw)?;
    }
    if let Some(raw) = var("MERCADITO_PRICING_CONCURRENCY") {
        feed.pricing_concurrency = parse_positive("MERCADITO_PRICING_CONCURRENCY", &raw)?;
    }
    if let Some(raw) = var("MERCADITO_HTTP_TIMEOUT_SECS") {
        feed.http_timeout =
            Duration::from_secs(parse_positive("MERCADITO_HTTP_TIMEOUT_SECS", &raw)?);
    }
    if let Some(path) = var("MERCADITO_COMPETITORS_FILE") {
        feed.competitors = load_competitors(Path::new(&path))?;
    }

    let log_file = var("MERCADITO_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(AppConfig { feed, log_file })
}

/// Reads a competitor reference list from a JSON array file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// lists no competitors.
pub fn load_competitors(path: &Path) -> crate::Result<Vec<Competitor>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        crate::MercaditoError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    let competitors: Vec<Competitor> = serde_json::from_str(&contents)?;
    if competitors.is_empty() {
        return Err(crate::MercaditoError::Config(format!(
            "{} lists no competitors",
            path.display()
        )));
    }
    Ok(competitors)
}

fn parse_bool(name: &str, raw: &str) -> crate::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(crate::MercaditoError::Config(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}

fn parse_positive<T>(name: &str, raw: &str) -> crate::Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(crate::MercaditoError::Config(format!(
            "{name} must be a positive integer, got {raw:?}"
        ))),
    }
}
