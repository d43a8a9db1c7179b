//! Deserialization tests for the upstream service payloads.

mod common;

use rust_decimal_macros::dec;

use mercadito::models::{CatalogEntry, CatalogResponse, PricingReport, decode_entry};

use common::{CATALOG_JSON, PRICING_REPORT_JSON};

fn catalog_entries() -> Vec<CatalogEntry> {
    let response: CatalogResponse = serde_json::from_str(CATALOG_JSON).unwrap();
    response
        .data
        .into_iter()
        .map(|record| decode_entry(record).expect("Failed to decode catalog record"))
        .collect()
}

#[test]
fn test_catalog_response_deserializes() {
    let entries = catalog_entries();
    assert_eq!(entries.len(), 5);

    let yerba = &entries[0];
    assert_eq!(yerba.id, 101);
    assert_eq!(yerba.price, dec!(1000));
    assert_eq!(yerba.category_id, 12);
    assert_eq!(yerba.minimum_order_value, Some(dec!(5000)));
    assert_eq!(yerba.max_units_per_delivery, Some(6));
    let discount = yerba.product_discount.as_ref().unwrap();
    assert_eq!(discount.discount_percentage, dec!(20));
    assert_eq!(discount.end_date, "2099-12-31T10:00:00");
    assert_eq!(yerba.display_name(), "Yerba Mate Suave 1kg");
    assert_eq!(yerba.erp_code(), Some("A1"));
    assert_eq!(yerba.discounted_price(), Some(dec!(800)));
}

#[test]
fn test_catalog_entry_without_discount() {
    let entries = catalog_entries();
    let rice = &entries[1];
    assert!(rice.product_discount.is_none());
    assert!(rice.minimum_order_value.is_none());
    assert_eq!(rice.discounted_price(), None);
}

#[test]
fn test_numeric_erp_code_and_missing_master_product() {
    let entries = catalog_entries();
    assert_eq!(entries[2].erp_code(), Some("555"));

    let noodles = &entries[4];
    assert!(noodles.master_product.is_none());
    assert_eq!(noodles.erp_code(), None);
    assert_eq!(noodles.display_name(), "Fideos Tirabuzón 500g");
    assert_eq!(noodles.price, dec!(80.5));
}

#[test]
fn test_pricing_report_deserializes() {
    let report: PricingReport =
        serde_json::from_str(PRICING_REPORT_JSON).expect("Failed to deserialize pricing report");

    assert_eq!(report.report.len(), 3);
    assert_eq!(report.report[0].market_id, "coto");
    assert_eq!(report.report[0].value, Some(dec!(950.4)));
    assert_eq!(report.report[1].value, Some(dec!(1100)));
    assert_eq!(report.report[2].value, None);
}

#[test]
fn test_empty_pricing_report() {
    let report: PricingReport = serde_json::from_str("{}").unwrap();
    assert!(report.report.is_empty());
}

#[test]
fn test_catalog_without_data_is_rejected() {
    assert!(serde_json::from_str::<CatalogResponse>(r#"{"items":[]}"#).is_err());
}
