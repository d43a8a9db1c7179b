//! Display-ready product shapes.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

/// Upstream product identifier.
pub type ProductId = u64;

/// A single comparison price shown next to the discounted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitorPrice {
    pub name: String,
    pub logo: String,
    /// Whole-unit price.
    pub price: Decimal,
}

/// A catalog entry enriched with its discounted and comparison prices.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    /// Category identifier in string form.
    pub category: String,
    /// Price after the active discount.
    pub price: Decimal,
    /// Undiscounted list price.
    pub list_price: Decimal,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Pack size or weight notes, empty when unknown.
    pub weight: String,
    /// Always exactly one entry once enrichment has run.
    pub competitor_prices: Vec<CompetitorPrice>,
    /// When the discount ends, if the feed carried a readable date.
    pub discount_ends_at: Option<DateTime<FixedOffset>>,
    pub minimum_order_value: Option<Decimal>,
    pub max_units_per_delivery: Option<u32>,
}

impl EnrichedProduct {
    /// The comparison price shown to the shopper.
    pub fn comparison(&self) -> Option<&CompetitorPrice> {
        self.competitor_prices.first()
    }

    /// Per-unit saving against the comparison price, never negative.
    pub fn unit_savings(&self) -> Decimal {
        self.comparison()
            .map(|c| (c.price - self.price).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }

    /// Per-delivery ceiling, treating zero as "no limit".
    pub fn unit_ceiling(&self) -> Option<u32> {
        self.max_units_per_delivery.filter(|max| *max > 0)
    }
}
