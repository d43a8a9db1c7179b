//! Catalog trimming, date normalization, and expiry ordering.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::models::{CatalogEntry, decode_entry, has_discount};

/// Only the head of the catalog response is considered.
pub const CATALOG_WINDOW: usize = 500;

/// Ordering bucket for a discount relative to `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Expiry {
    Active,
    Expired,
    Unreadable,
}

/// Decodes the discounted records among the first [`CATALOG_WINDOW`].
///
/// Records outside the window or without a discount are never decoded.
/// A record that fails to decode is logged and skipped.
pub fn decode_window(mut records: Vec<serde_json::Value>) -> Vec<CatalogEntry> {
    records.truncate(CATALOG_WINDOW);
    records
        .into_iter()
        .enumerate()
        .filter(|(_, record)| has_discount(record))
        .filter_map(|(position, record)| match decode_entry(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping malformed catalog record at position {position}: {e}");
                None
            }
        })
        .collect()
}

/// Trims, filters, optionally re-dates, and sorts raw catalog entries.
///
/// Keeps at most the first [`CATALOG_WINDOW`] entries, drops those without
/// a discount, and orders the rest so every still-running discount comes
/// before every expired one, each group by ascending end time. Entries whose
/// end date cannot be read go last, in feed order.
///
/// With `refresh_dates` set, each end date's calendar day is replaced by
/// `now`'s date before ordering.
pub fn select_entries(
    mut entries: Vec<CatalogEntry>,
    now: DateTime<FixedOffset>,
    refresh_dates: bool,
) -> Vec<CatalogEntry> {
    entries.truncate(CATALOG_WINDOW);
    entries.retain(|e| e.product_discount.is_some());

    if refresh_dates {
        let today = now.date_naive();
        for discount in entries.iter_mut().filter_map(|e| e.product_discount.as_mut()) {
            discount.move_to_date(today);
        }
    }

    let tz = *now.offset();
    entries.sort_by_cached_key(|entry| {
        let ends_at = entry
            .product_discount
            .as_ref()
            .and_then(|d| d.ends_at(tz));
        let bucket = match ends_at {
            Some(end) if end > now => Expiry::Active,
            Some(_) => Expiry::Expired,
            None => Expiry::Unreadable,
        };
        (bucket, ends_at)
    });
    entries
}
