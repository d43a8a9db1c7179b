//! Pricing verification report models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of `GET /pricingreport/verification/{erp_code}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingReport {
    #[serde(default)]
    pub report: Vec<ReportEntry>,
}

/// One competitor observation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEntry {
    /// Competitor key (lowercase competitor name).
    pub market_id: String,
    /// Observed shelf price; `null` is read as absent.
    pub value: Option<Decimal>,
}
