//! Market selection and per-market constants.
//!
//! A [`Market`] is resolved once from configuration and injected into the
//! feed assembler, which reads catalog coordinates, the competitor
//! reference list, and price formatting from it.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Offset of America/Argentina/Buenos_Aires, which observes no DST.
const MARKET_UTC_OFFSET_WEST_SECS: i32 = 3 * 60 * 60;

/// Deployment market.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Market {
    #[default]
    Argentina,
    Mexico,
}

impl Market {
    /// Catalog identifier in the upstream catalog service.
    pub fn catalog_id(&self) -> u32 {
        match self {
            Market::Argentina => 5,
            Market::Mexico => 1,
        }
    }

    /// Country identifier shared by the catalog and pricing services.
    pub fn country_id(&self) -> u32 {
        match self {
            Market::Argentina => 1,
            Market::Mexico => 2,
        }
    }

    /// Price tier used when requesting the catalog.
    pub fn tier_id(&self) -> u32 {
        match self {
            Market::Argentina => 22,
            Market::Mexico => 10,
        }
    }

    /// Short lowercase label, also accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Argentina => "argentina",
            Market::Mexico => "mexico",
        }
    }

    /// Fixed time zone used to read and compare discount end dates.
    ///
    /// Both markets share the catalog's home zone.
    pub fn time_zone(&self) -> FixedOffset {
        FixedOffset::west_opt(MARKET_UTC_OFFSET_WEST_SECS).unwrap_or_else(|| Utc.fix())
    }

    /// Competitor reference list scanned when picking a comparison price.
    ///
    /// Order matters: on equal reported prices the earlier entry wins.
    pub fn default_competitors(&self) -> Vec<Competitor> {
        let names: &[&str] = match self {
            Market::Argentina => &["Carrefour", "Coto", "Dia", "Jumbo", "Changomas"],
            Market::Mexico => &["Walmart", "Soriana", "Chedraui", "La Comer"],
        };
        names.iter().map(|name| Competitor::named(name)).collect()
    }

    /// Formats a price the way shoppers in this market expect to read it.
    ///
    /// Argentina shows whole pesos with `.` grouping. Mexico shows up to two
    /// decimals with `,` grouping.
    pub fn format_price(&self, price: Decimal) -> String {
        match self {
            Market::Argentina => group_thousands(&price.floor().to_string(), '.'),
            Market::Mexico => {
                let rounded = price
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                    .normalize()
                    .to_string();
                match rounded.split_once('.') {
                    Some((int, frac)) => format!("{}.{frac}", group_thousands(int, ',')),
                    None => group_thousands(&rounded, ','),
                }
            }
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = crate::MercaditoError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argentina" | "ar" => Ok(Market::Argentina),
            "mexico" | "mx" => Ok(Market::Mexico),
            other => Err(crate::MercaditoError::Config(format!(
                "unknown market {other:?} (expected argentina or mexico)"
            ))),
        }
    }
}

/// A competitor whose prices appear in pricing reports.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Competitor {
    /// Key under which the pricing report lists this competitor.
    pub market_id: String,
    /// Display name.
    pub name: String,
    /// Logo reference shown next to the comparison price.
    pub logo: String,
}

impl Competitor {
    /// Builds a competitor whose report key is its lowercased name.
    pub fn named(name: &str) -> Self {
        let market_id = name.to_lowercase();
        Self {
            logo: format!("/images/{}.png", market_id.replace(' ', "-")),
            market_id,
            name: name.to_string(),
        }
    }
}

/// Inserts `sep` between groups of three digits in an integer string.
fn group_thousands(digits: &str, sep: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
