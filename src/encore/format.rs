//! Display helpers for concerts. These sit outside the filter and view
//! machinery: clients call them when rendering, the core never does.

use crate::model::Concert;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::London;

fn to_pounds(pence: u32) -> String {
    if pence % 100 == 0 {
        format!("£{}", pence / 100)
    } else {
        format!("£{}.{:02}", pence / 100, pence % 100)
    }
}

/// Human-readable price range for a concert, prices being in pence.
pub fn price_string(concert: &Concert) -> String {
    match (concert.min_price, concert.max_price) {
        (Some(min), Some(max)) if min == max => {
            if min == 0 {
                "Free entry".to_string()
            } else {
                to_pounds(min)
            }
        }
        (Some(min), Some(max)) => format!("{}–{}", to_pounds(min), to_pounds(max)),
        (Some(min), None) => format!("from {}", to_pounds(min)),
        (None, _) => "Price not available".to_string(),
    }
}

/// Render an instant in the catalog's home timezone, e.g.
/// "08 April 2026 (Wednesday), 7:30 pm".
pub fn format_datetime(datetime: DateTime<Utc>) -> String {
    datetime
        .with_timezone(&London)
        .format("%d %B %Y (%A), %-I:%M %P")
        .to_string()
}

/// 32-bit FNV-1a. Used as a stable fingerprint for strings that need a
/// deterministic display color, like view names.
pub fn fnv1a32(input: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 16_777_619;
    input
        .bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}
