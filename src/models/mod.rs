//! Wire and domain models.
//!
//! [`catalog`] and [`pricing`] mirror the JSON returned by the two
//! upstream services; [`product`] holds the display-ready shapes the
//! feed assembler produces and the cart consumes.

pub mod catalog;
pub mod pricing;
pub mod product;

pub use catalog::{
    CatalogEntry, CatalogResponse, MasterProduct, ProductDiscount, decode_entry, has_discount,
};
pub use pricing::{PricingReport, ReportEntry};
pub use product::{CompetitorPrice, EnrichedProduct, ProductId};
