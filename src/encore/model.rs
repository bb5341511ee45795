use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub composer: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub name: String,
    pub instrument: Option<String>,
}

/// A single concert as supplied by the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concert {
    /// Unique within the catalog. Derived from datetime, venue and title
    /// at scrape time, see [`crate::catalog::derive_id`].
    pub id: String,
    pub datetime: DateTime<Utc>,
    pub url: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub programme_pdf_url: Option<String>,
    pub venue: String,
    pub performers: Vec<Performer>,
    pub pieces: Vec<Piece>,
    /// Prices in pence
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,

    pub is_wigmore_u35: bool,
    pub is_prom: bool,
}
