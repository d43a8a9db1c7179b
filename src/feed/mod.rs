//! Product feed assembly.
//!
//! [`FeedAssembler`] pulls the flash-deal catalog for its configured
//! market, keeps the discounted entries ordered by expiry, and enriches
//! each one with a comparison price. Competitor lookups for a refresh run
//! concurrently on the calling task and are abandoned as a group when the
//! caller's [`CancellationToken`] fires.

pub mod pricing;
pub mod selection;

use chrono::Utc;
use futures_util::{StreamExt, stream};
use reqwest::Url;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::FeedConfig;
use crate::market::Market;
use crate::models::{CatalogEntry, CatalogResponse, EnrichedProduct};
use crate::{MercaditoError, Result};

pub use pricing::{FALLBACK_LOGO, FALLBACK_NAME, PricingClient, fallback_price, pick_competitor};
pub use selection::{CATALOG_WINDOW, decode_window, select_entries};

/// Number of catalog entries requested from the upstream service.
const CATALOG_PAGE_SIZE: u32 = 2000;

/// Builds the product feed from the catalog and pricing services.
#[derive(Clone, Debug)]
pub struct FeedAssembler {
    http: reqwest::Client,
    config: FeedConfig,
    pricing: PricingClient,
}

impl FeedAssembler {
    /// Creates an assembler for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MercaditoError::Config`] if the pricing concurrency is zero
    /// and [`MercaditoError::Http`] if the HTTP client cannot be built.
    pub fn new(config: FeedConfig) -> Result<Self> {
        if config.pricing_concurrency == 0 {
            return Err(MercaditoError::Config(
                "pricing concurrency must be at least 1".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        let pricing = PricingClient::new(
            http.clone(),
            config.pricing_url.clone(),
            config.market.country_id(),
            config.competitors.clone(),
        );
        Ok(Self {
            http,
            config,
            pricing,
        })
    }

    /// Market this assembler was built for.
    pub fn market(&self) -> Market {
        self.config.market
    }

    /// Fully-qualified catalog request URL for the configured market.
    ///
    /// # Errors
    ///
    /// Returns [`MercaditoError::Config`] if the base URL is not valid.
    pub fn catalog_url(&self) -> Result<Url> {
        let market = self.config.market;
        let catalog_id = market.catalog_id().to_string();
        let mut url = endpoint(
            &self.config.catalog_url,
            &["catalogs", "v1", "catalogs", &catalog_id, "products"],
        )?;
        url.query_pairs_mut()
            .append_pair("country_id", &market.country_id().to_string())
            .append_pair("tier_id", &market.tier_id().to_string())
            .append_pair("size", &CATALOG_PAGE_SIZE.to_string())
            .append_pair("page", "1")
            .append_pair("flash_deals_only", "true");
        Ok(url)
    }

    /// Fetches and selects catalog entries, propagating failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a catalog response.
    pub async fn try_fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.catalog_url()?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: CatalogResponse = response.json().await?;
        let received = body.data.len();

        let now = Utc::now().with_timezone(&self.config.market.time_zone());
        let entries = select_entries(
            decode_window(body.data),
            now,
            self.config.refresh_discount_dates,
        );
        info!(
            "Fetched {received} catalog entries for {}, kept {} discounted",
            self.config.market,
            entries.len()
        );
        Ok(entries)
    }

    /// Fetches and selects catalog entries, yielding nothing on failure.
    pub async fn fetch_catalog(&self) -> Vec<CatalogEntry> {
        match self.try_fetch_catalog().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to fetch catalog: {e}");
                Vec::new()
            }
        }
    }

    /// Attaches a comparison price to every entry, preserving order.
    ///
    /// Lookup failures never drop an entry; they degrade to the fallback
    /// price.
    ///
    /// # Errors
    ///
    /// Returns [`MercaditoError::Cancelled`] if `cancel` fires first; no
    /// partial result is returned.
    pub async fn enrich(
        &self,
        entries: Vec<CatalogEntry>,
        cancel: &CancellationToken,
    ) -> Result<Vec<EnrichedProduct>> {
        let lookups = stream::iter(entries.into_iter().map(|entry| self.enrich_entry(entry)))
            .buffered(self.config.pricing_concurrency)
            .collect::<Vec<_>>();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(MercaditoError::Cancelled),
            products = lookups => Ok(products),
        }
    }

    /// Fetches the catalog and enriches it in one go.
    ///
    /// # Errors
    ///
    /// Propagates catalog failures from [`try_fetch_catalog`](Self::try_fetch_catalog)
    /// and cancellation from [`enrich`](Self::enrich).
    pub async fn refresh(&self, cancel: &CancellationToken) -> Result<Vec<EnrichedProduct>> {
        let entries = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MercaditoError::Cancelled),
            entries = self.try_fetch_catalog() => entries?,
        };
        let products = self.enrich(entries, cancel).await?;
        info!("Assembled {} products", products.len());
        Ok(products)
    }

    async fn enrich_entry(&self, entry: CatalogEntry) -> EnrichedProduct {
        let price = entry.discounted_price().unwrap_or(entry.price);
        let comparison = self
            .pricing
            .competitor_price(entry.erp_code(), entry.price, price)
            .await;
        let discount_ends_at = entry
            .product_discount
            .as_ref()
            .and_then(|d| d.ends_at(self.config.market.time_zone()));
        let name = entry.display_name().to_string();
        let master = entry.master_product.unwrap_or_default();

        EnrichedProduct {
            id: entry.id,
            name,
            category: entry.category_id.to_string(),
            price,
            list_price: entry.price,
            image: master.image,
            description: master.description,
            weight: master.notes.unwrap_or_default(),
            competitor_prices: vec![comparison],
            discount_ends_at,
            minimum_order_value: entry.minimum_order_value,
            max_units_per_delivery: entry.max_units_per_delivery,
        }
    }
}

/// Appends path segments to a base URL, percent-encoding each one.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = |reason: String| MercaditoError::Config(format!("invalid base URL {base:?}: {reason}"));
    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
