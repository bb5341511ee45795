//! Fixture helpers shared by unit tests. Compiled only for tests or when the
//! `test_utils` feature is enabled.

use crate::model::{Concert, Performer, Piece};
use chrono::{DateTime, TimeZone, Utc};

/// A datetime comfortably in the future, so fixtures never age out mid-test.
pub fn future_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2999, 6, 1, 19, 30, 0).unwrap()
}

/// A datetime that has already passed.
pub fn past_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2001, 6, 1, 19, 30, 0).unwrap()
}

pub fn concert(id: &str, title: &str, venue: &str, datetime: DateTime<Utc>) -> Concert {
    Concert {
        id: id.to_string(),
        datetime,
        url: format!("https://example.org/concerts/{}", id),
        title: title.to_string(),
        subtitle: None,
        description: None,
        programme_pdf_url: None,
        venue: venue.to_string(),
        performers: vec![Performer {
            name: "Test Performer".to_string(),
            instrument: Some("piano".to_string()),
        }],
        pieces: vec![Piece {
            composer: "Franz Schubert".to_string(),
            title: "Winterreise".to_string(),
        }],
        min_price: Some(1500),
        max_price: Some(4000),
        is_wigmore_u35: false,
        is_prom: false,
    }
}
