//! The catalog is the immutable, ordered set of concerts the rest of the
//! application works against. It is loaded once at startup from a generated
//! JSON asset; a catalog that fails to parse is fatal since there is nothing
//! to operate on without one.

use crate::error::{EncoreError, Result};
use crate::model::Concert;
use chrono::{DateTime, Utc};
use deunicode::deunicode;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct Catalog {
    concerts: Vec<Concert>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from an already-ordered list of concerts.
    /// Fails if two concerts share an id.
    pub fn new(concerts: Vec<Concert>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(concerts.len());
        for (position, concert) in concerts.iter().enumerate() {
            if by_id.insert(concert.id.clone(), position).is_some() {
                return Err(EncoreError::Catalog(format!(
                    "Duplicate concert id: {}",
                    concert.id
                )));
            }
        }
        Ok(Self { concerts, by_id })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let concerts: Vec<Concert> = serde_json::from_reader(reader)?;
        Self::new(concerts)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn get(&self, id: &str) -> Option<&Concert> {
        self.by_id.get(id).map(|&position| &self.concerts[position])
    }

    /// All concerts in catalog order.
    pub fn concerts(&self) -> &[Concert] {
        &self.concerts
    }

    pub fn len(&self) -> usize {
        self.concerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concerts.is_empty()
    }
}

/// Derive a stable concert id from its identifying fields.
///
/// Datetime plus venue used to be enough to disambiguate, until venues
/// started cross-listing concerts held elsewhere. The first ten alphanumeric
/// title characters are included to break those ties.
pub fn derive_id(datetime: DateTime<Utc>, venue: &str, title: &str) -> String {
    let title_shortened: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect();
    let id = format!("{}__{}__{}", datetime.timestamp(), venue, title_shortened);
    let id = deunicode(&id).replace(' ', "_").to_lowercase();
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{concert, future_datetime};

    #[test]
    fn preserves_catalog_order() {
        let catalog = Catalog::new(vec![
            concert("b", "Second", "Wigmore Hall", future_datetime()),
            concert("a", "First", "Barbican", future_datetime()),
        ])
        .unwrap();

        let titles: Vec<_> = catalog.concerts().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[test]
    fn looks_up_by_id() {
        let catalog = Catalog::new(vec![concert(
            "id-1",
            "Recital",
            "Wigmore Hall",
            future_datetime(),
        )])
        .unwrap();

        assert_eq!(catalog.get("id-1").map(|c| c.title.as_str()), Some("Recital"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            concert("dup", "One", "Wigmore Hall", future_datetime()),
            concert("dup", "Two", "Barbican", future_datetime()),
        ]);
        assert!(matches!(result, Err(EncoreError::Catalog(_))));
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let result = Catalog::from_reader("not json".as_bytes());
        assert!(matches!(result, Err(EncoreError::Serialization(_))));
    }

    #[test]
    fn parses_catalog_json_with_nullable_fields() {
        let json = r#"[{
            "id": "id-1",
            "datetime": "2999-06-01T18:30:00Z",
            "url": "https://example.org/recital",
            "title": "Song Recital",
            "subtitle": null,
            "description": null,
            "programme_pdf_url": null,
            "venue": "Wigmore Hall",
            "performers": [{"name": "Alice Example", "instrument": "piano"}],
            "pieces": [],
            "min_price": null,
            "max_price": 1800,
            "is_wigmore_u35": false,
            "is_prom": false
        }]"#;

        let catalog = Catalog::from_reader(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        let concert = catalog.get("id-1").unwrap();
        assert_eq!(concert.subtitle, None);
        assert_eq!(concert.max_price, Some(1800));
    }

    #[test]
    fn derives_ids_from_datetime_venue_and_title() {
        let datetime = chrono::DateTime::parse_from_rfc3339("2026-04-08T19:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let id = derive_id(datetime, "Wigmore Hall", "Brahms: The Violin Sonatas");
        assert_eq!(id, format!("{}__wigmore_hall__brahmsthevi", datetime.timestamp()));
    }

    #[test]
    fn derived_ids_fold_accents_in_venue() {
        let datetime = future_datetime();
        let id = derive_id(datetime, "Café de la Musique", "Fauré Réquiem");
        assert!(id.is_ascii());
        assert!(id.contains("cafe_de_la_musique"));
        // Non-ASCII title characters are dropped, not transliterated
        assert!(id.contains("faurrquiem"));
    }
}
