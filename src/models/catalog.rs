//! Catalog service models.
//!
//! Field names follow the upstream JSON, which mixes `kebab-case` object
//! keys (`product-discount`, `master-product`) with `snake_case` scalars.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Naive layouts accepted for discount end dates, tried in order.
const NAIVE_END_DATE_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Body of `GET /catalogs/v1/catalogs/{id}/products`.
///
/// Records are kept raw so one malformed entry cannot sink the response;
/// see [`decode_entry`].
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub data: Vec<serde_json::Value>,
}

/// A raw product record from the catalog feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Undiscounted list price.
    pub price: Decimal,
    #[serde(rename = "product-discount")]
    pub product_discount: Option<ProductDiscount>,
    #[serde(rename = "master-product")]
    pub master_product: Option<MasterProduct>,
    pub category_id: u64,
    pub minimum_order_value: Option<Decimal>,
    pub max_units_per_delivery: Option<u32>,
}

/// Active discount attached to a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDiscount {
    pub discount_percentage: Decimal,
    /// Local or offset-qualified timestamp, e.g. `2025-03-14T23:59:00`.
    #[serde(default)]
    pub end_date: String,
}

/// Shared product information the catalog entry points at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasterProduct {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// ERP code, sent as either a string or a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub erp_code: Option<String>,
}

impl CatalogEntry {
    /// Price after applying the discount, or `None` without one.
    ///
    /// Computed as `price * (100 - pct) / 100` in exact decimal arithmetic.
    pub fn discounted_price(&self) -> Option<Decimal> {
        self.product_discount.as_ref().map(|d| {
            self.price * (Decimal::ONE_HUNDRED - d.discount_percentage) / Decimal::ONE_HUNDRED
        })
    }

    /// Master product name, falling back to the entry's own name.
    pub fn display_name(&self) -> &str {
        self.master_product
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }

    /// ERP code used to look up competitor prices.
    pub fn erp_code(&self) -> Option<&str> {
        self.master_product
            .as_ref()
            .and_then(|m| m.erp_code.as_deref())
            .filter(|c| !c.is_empty())
    }
}

impl ProductDiscount {
    /// Parses the end date, reading naive timestamps in `tz`.
    ///
    /// A bare date is taken as the start of that day.
    pub fn ends_at(&self, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let raw = self.end_date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }
        let naive = NAIVE_END_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;
        tz.from_local_datetime(&naive).single()
    }

    /// Replaces a leading `YYYY-MM-DD` with `date`, keeping the rest.
    ///
    /// Returns `false` and leaves the value untouched when the end date
    /// does not start with a calendar date.
    pub fn move_to_date(&mut self, date: NaiveDate) -> bool {
        let Some(prefix) = self.end_date.get(..10) else {
            return false;
        };
        if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_err() {
            return false;
        }
        self.end_date
            .replace_range(..10, &date.format("%Y-%m-%d").to_string());
        true
    }
}

/// Whether a raw catalog record carries a non-null discount.
pub fn has_discount(record: &serde_json::Value) -> bool {
    record
        .get("product-discount")
        .is_some_and(|discount| !discount.is_null())
}

/// Decodes a single raw catalog record.
///
/// # Errors
///
/// Returns [`MercaditoError::Json`](crate::MercaditoError::Json) if the
/// record does not have the shape of a [`CatalogEntry`].
pub fn decode_entry(record: serde_json::Value) -> crate::Result<CatalogEntry> {
    Ok(serde_json::from_value(record)?)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rust_decimal_macros::dec;

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn discount(end_date: &str) -> ProductDiscount {
        ProductDiscount {
            discount_percentage: dec!(20),
            end_date: end_date.to_string(),
        }
    }

    #[test]
    fn discounted_price_is_exact() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"id":1,"price":1999.99,"category_id":3,
                "product-discount":{"discount_percentage":15,"end_date":"2025-01-01T10:00:00"}}"#,
        )
        .unwrap();
        assert_eq!(entry.discounted_price(), Some(dec!(1699.9915)));
    }

    #[test]
    fn discounted_price_at_bounds() {
        let mut entry: CatalogEntry =
            serde_json::from_str(r#"{"id":1,"price":250,"category_id":3}"#).unwrap();
        assert_eq!(entry.discounted_price(), None);

        entry.product_discount = Some(ProductDiscount {
            discount_percentage: dec!(0),
            end_date: String::new(),
        });
        assert_eq!(entry.discounted_price(), Some(dec!(250)));

        entry.product_discount = Some(ProductDiscount {
            discount_percentage: dec!(100),
            end_date: String::new(),
        });
        assert_eq!(entry.discounted_price(), Some(dec!(0)));
    }

    #[test]
    fn null_name_reads_as_empty() {
        let entry = decode_entry(serde_json::json!({
            "id": 7, "name": null, "price": 10, "category_id": 1
        }))
        .unwrap();
        assert_eq!(entry.name, "");
    }

    #[test]
    fn discount_presence_on_raw_records() {
        assert!(has_discount(&serde_json::json!({
            "product-discount": {"discount_percentage": 5}
        })));
        assert!(!has_discount(&serde_json::json!({"product-discount": null})));
        assert!(!has_discount(&serde_json::json!({"id": 1})));
    }

    #[test]
    fn malformed_record_fails_alone() {
        let err = decode_entry(serde_json::json!({"id": 1, "price": null})).unwrap_err();
        assert!(matches!(err, crate::MercaditoError::Json(_)));
    }

    #[test]
    fn erp_code_accepts_numbers() {
        let master: MasterProduct = serde_json::from_str(r#"{"erp_code":12345}"#).unwrap();
        assert_eq!(master.erp_code.as_deref(), Some("12345"));
        let master: MasterProduct = serde_json::from_str(r#"{"erp_code":null}"#).unwrap();
        assert_eq!(master.erp_code, None);
    }

    #[test]
    fn display_name_prefers_master_product() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"id":1,"name":"raw","price":1,"category_id":1,"master-product":{"name":"Yerba 1kg"}}"#,
        )
        .unwrap();
        assert_eq!(entry.display_name(), "Yerba 1kg");

        let entry: CatalogEntry =
            serde_json::from_str(r#"{"id":1,"name":"raw","price":1,"category_id":1}"#).unwrap();
        assert_eq!(entry.display_name(), "raw");
    }

    #[test]
    fn naive_end_dates_use_market_zone() {
        let at = discount("2025-03-14T23:59:00").ends_at(tz()).unwrap();
        assert_eq!(at.offset().local_minus_utc(), -3 * 3600);
        assert_eq!(at.hour(), 23);
        assert_eq!(at.to_utc().hour(), 2);
    }

    #[test]
    fn offset_end_dates_are_kept() {
        let at = discount("2025-03-14T12:00:00Z").ends_at(tz()).unwrap();
        assert_eq!(at.to_utc().hour(), 12);
        assert!(discount("2025-03-14 08:30:00").ends_at(tz()).is_some());
        assert!(discount("2025-03-14").ends_at(tz()).is_some());
        assert!(discount("soon").ends_at(tz()).is_none());
        assert!(discount("").ends_at(tz()).is_none());
    }

    #[test]
    fn move_to_date_rewrites_only_the_date() {
        let mut d = discount("2024-01-02T18:30:00");
        assert!(d.move_to_date(NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()));
        assert_eq!(d.end_date, "2025-06-07T18:30:00");

        let mut d = discount("tomorrow");
        assert!(!d.move_to_date(NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()));
        assert_eq!(d.end_date, "tomorrow");
    }
}
