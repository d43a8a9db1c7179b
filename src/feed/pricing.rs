//! Competitor price lookup against the pricing verification service.
//!
//! Every lookup resolves to exactly one [`CompetitorPrice`]. When the
//! service has no data, fails, or no competitor is dearer than the
//! discounted price, the synthetic "Mercadito" entry priced at the rounded
//! list price is returned instead.

use std::collections::HashMap;

use reqwest::StatusCode;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::Result;
use crate::market::Competitor;
use crate::models::{CompetitorPrice, PricingReport};

/// Name of the synthetic comparison entry.
pub const FALLBACK_NAME: &str = "Mercadito";

/// Logo shown for the synthetic comparison entry.
pub const FALLBACK_LOGO: &str = "/images/mercadito.png";

/// Rounds a price to whole units, halves away from zero.
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// The synthetic comparison entry for a product listed at `list_price`.
pub fn fallback_price(list_price: Decimal) -> CompetitorPrice {
    CompetitorPrice {
        name: FALLBACK_NAME.to_string(),
        logo: FALLBACK_LOGO.to_string(),
        price: round_price(list_price),
    }
}

/// Picks the comparison price from a pricing report.
///
/// Scans `competitors` in order and keeps the highest rounded price; a
/// competitor missing from the report counts as zero. On equal prices the
/// competitor listed first wins. The pick is returned only if it is
/// strictly dearer than `discounted`, otherwise the fallback is.
pub fn pick_competitor(
    report: &PricingReport,
    competitors: &[Competitor],
    list_price: Decimal,
    discounted: Decimal,
) -> CompetitorPrice {
    let reported: HashMap<&str, Decimal> = report
        .report
        .iter()
        .map(|entry| (entry.market_id.as_str(), entry.value.unwrap_or_default()))
        .collect();

    let mut best: Option<(&Competitor, Decimal)> = None;
    for competitor in competitors {
        let price = round_price(
            reported
                .get(competitor.market_id.as_str())
                .copied()
                .unwrap_or_default(),
        );
        if best.is_none_or(|(_, max)| price > max) {
            best = Some((competitor, price));
        }
    }

    match best {
        Some((competitor, price)) if price > discounted => CompetitorPrice {
            name: competitor.name.clone(),
            logo: competitor.logo.clone(),
            price,
        },
        _ => fallback_price(list_price),
    }
}

/// Client for the pricing verification endpoint.
#[derive(Clone, Debug)]
pub struct PricingClient {
    http: reqwest::Client,
    base_url: String,
    country_id: u32,
    competitors: Vec<Competitor>,
}

impl PricingClient {
    /// Creates a client sharing an existing HTTP connection pool.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        country_id: u32,
        competitors: Vec<Competitor>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            country_id,
            competitors,
        }
    }

    /// Resolves the comparison price for one product.
    ///
    /// Never fails: lookup problems are logged and produce the fallback.
    pub async fn competitor_price(
        &self,
        erp_code: Option<&str>,
        list_price: Decimal,
        discounted: Decimal,
    ) -> CompetitorPrice {
        let Some(erp_code) = erp_code else {
            debug!("No ERP code, using fallback comparison price");
            return fallback_price(list_price);
        };

        match self.fetch_report(erp_code).await {
            Ok(Some(report)) => pick_competitor(&report, &self.competitors, list_price, discounted),
            Ok(None) => {
                debug!("No pricing data for {erp_code}");
                fallback_price(list_price)
            }
            Err(e) => {
                warn!("Failed to fetch competitor prices for {erp_code}: {e}");
                fallback_price(list_price)
            }
        }
    }

    /// Fetches the raw report; `Ok(None)` means the service answered 400.
    async fn fetch_report(&self, erp_code: &str) -> Result<Option<PricingReport>> {
        let url = super::endpoint(
            &self.base_url,
            &["pricingreport", "verification", erp_code],
        )?;
        let response = self
            .http
            .get(url)
            .query(&[("country_id", self.country_id)])
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        let report = response.error_for_status()?.json::<PricingReport>().await?;
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::ReportEntry;

    fn competitors() -> Vec<Competitor> {
        vec![Competitor::named("compA"), Competitor::named("compB")]
    }

    fn report(values: &[(&str, Option<Decimal>)]) -> PricingReport {
        PricingReport {
            report: values
                .iter()
                .map(|(id, value)| ReportEntry {
                    market_id: id.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn dearest_competitor_above_discount_wins() {
        let picked = pick_competitor(
            &report(&[("compa", Some(dec!(120))), ("compb", Some(dec!(80)))]),
            &competitors(),
            dec!(125),
            dec!(100),
        );
        assert_eq!(picked.name, "compA");
        assert_eq!(picked.price, dec!(120));
        assert_eq!(picked.logo, "/images/compa.png");
    }

    #[test]
    fn falls_back_when_no_competitor_beats_discount() {
        let picked = pick_competitor(
            &report(&[("compa", Some(dec!(90))), ("compb", Some(dec!(80)))]),
            &competitors(),
            dec!(125.5),
            dec!(100),
        );
        assert_eq!(picked, fallback_price(dec!(125.5)));
        assert_eq!(picked.price, dec!(126));
    }

    #[test]
    fn equal_to_discount_is_not_enough() {
        let picked = pick_competitor(
            &report(&[("compa", Some(dec!(100)))]),
            &competitors(),
            dec!(130),
            dec!(100),
        );
        assert_eq!(picked.name, FALLBACK_NAME);
    }

    #[test]
    fn ties_go_to_first_listed_competitor() {
        let picked = pick_competitor(
            &report(&[("compb", Some(dec!(150))), ("compa", Some(dec!(150)))]),
            &competitors(),
            dec!(130),
            dec!(100),
        );
        assert_eq!(picked.name, "compA");
    }

    #[test]
    fn reported_values_are_rounded_before_comparing() {
        let picked = pick_competitor(
            &report(&[("compa", Some(dec!(100.4))), ("compb", Some(dec!(100.5)))]),
            &competitors(),
            dec!(130),
            dec!(100.2),
        );
        assert_eq!(picked.name, "compB");
        assert_eq!(picked.price, dec!(101));
    }

    #[test]
    fn unknown_and_null_entries_count_as_zero() {
        let picked = pick_competitor(
            &report(&[("other", Some(dec!(999))), ("compa", None)]),
            &competitors(),
            dec!(10),
            dec!(8),
        );
        assert_eq!(picked, fallback_price(dec!(10)));
    }

    #[test]
    fn empty_reference_list_falls_back() {
        let picked = pick_competitor(
            &report(&[("compa", Some(dec!(500)))]),
            &[],
            dec!(10),
            dec!(8),
        );
        assert_eq!(picked.name, FALLBACK_NAME);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_price(dec!(2.5)), dec!(3));
        assert_eq!(round_price(dec!(3.5)), dec!(4));
        assert_eq!(round_price(dec!(3.49)), dec!(3));
    }

    #[tokio::test]
    async fn missing_erp_code_skips_the_network() {
        let client = PricingClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            1,
            competitors(),
        );
        let price = client.competitor_price(None, dec!(99.6), dec!(80)).await;
        assert_eq!(price, fallback_price(dec!(99.6)));
    }
}
