//! # Filter Engine
//!
//! Decides whether a concert satisfies the current filter criteria. A
//! criteria is the conjunction of one free-text search term and any number of
//! boolean tags drawn from the static registry below.
//!
//! Evaluation is pure and reads nothing but its arguments, so it is safe to
//! call from any number of readers. The one concession to the outside world
//! is a one-time `warn!` per unknown tag name: a criteria referencing a tag
//! that was renamed or removed from the registry must exclude every concert
//! (fail closed) rather than crash or silently pass, and the mismatch is
//! worth a single diagnostic rather than one per catalog entry.

use crate::model::Concert;
use log::warn;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// An on/off filter over concerts, keyed by its tag name.
pub struct BooleanFilter {
    pub tag_name: &'static str,
    /// Hex color used by clients when rendering the tag
    pub tag_color: &'static str,
    pub predicate: fn(&Concert) -> bool,
}

/// All boolean filters that we know of. Append-only across releases; renames
/// are additions here, and stale names in old criteria fail closed.
pub static ALL_BOOLEAN_FILTERS: &[BooleanFilter] = &[
    BooleanFilter {
        tag_name: "Wigmore Hall",
        tag_color: "#17a8ad",
        predicate: |concert| concert.venue == "Wigmore Hall",
    },
    BooleanFilter {
        tag_name: "Wigmore U35 £5",
        tag_color: "#3694cf",
        predicate: |concert| concert.is_wigmore_u35,
    },
    BooleanFilter {
        tag_name: "BBC Proms",
        tag_color: "#c462f5",
        predicate: |concert| concert.is_prom,
    },
    BooleanFilter {
        tag_name: "Royal Albert Hall",
        tag_color: "#c72ac2",
        predicate: |concert| concert.venue == "Royal Albert Hall",
    },
];

pub fn find_filter(tag_name: &str) -> Option<&'static BooleanFilter> {
    ALL_BOOLEAN_FILTERS
        .iter()
        .find(|filter| filter.tag_name == tag_name)
}

/// Current filter state: one search term plus the set of active tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub active_tag_names: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            search_term: search_term.into(),
            active_tag_names: tags.into_iter().collect(),
        }
    }
}

static REPORTED_UNKNOWN_TAGS: Lazy<Mutex<BTreeSet<String>>> =
    Lazy::new(|| Mutex::new(BTreeSet::new()));

fn report_unknown_tag(tag_name: &str) {
    if let Ok(mut reported) = REPORTED_UNKNOWN_TAGS.lock() {
        if reported.insert(tag_name.to_string()) {
            warn!("Unknown boolean tag {}", tag_name);
        }
    }
}

/// Check if a concert satisfies the criteria.
///
/// The search term matches case-insensitively as a substring of the title,
/// subtitle, venue or any performer name; an empty term passes everything.
/// Every active tag's predicate must hold, and an unknown tag name fails the
/// concert rather than being ignored.
pub fn satisfies(concert: &Concert, criteria: &FilterCriteria) -> bool {
    let ci_search_term = criteria.search_term.to_lowercase();
    let search_pass = criteria.search_term.is_empty()
        || concert.title.to_lowercase().contains(&ci_search_term)
        || concert
            .subtitle
            .as_ref()
            .is_some_and(|subtitle| subtitle.to_lowercase().contains(&ci_search_term))
        || concert.venue.to_lowercase().contains(&ci_search_term)
        || concert
            .performers
            .iter()
            .any(|performer| performer.name.to_lowercase().contains(&ci_search_term));

    let tag_pass = criteria
        .active_tag_names
        .iter()
        .all(|tag| match find_filter(tag) {
            Some(filter) => (filter.predicate)(concert),
            None => {
                report_unknown_tag(tag);
                false
            }
        });

    search_pass && tag_pass
}

/// Ids of the concerts satisfying the criteria, in input order.
///
/// This is the canonical selection primitive: ids stay valid when the list
/// is reordered.
pub fn passing_ids(concerts: &[Concert], criteria: &FilterCriteria) -> Vec<String> {
    concerts
        .iter()
        .filter(|concert| satisfies(concert, criteria))
        .map(|concert| concert.id.clone())
        .collect()
}

/// Positional indices of the concerts satisfying the criteria. Prefer
/// [`passing_ids`] unless the caller genuinely needs positions.
pub fn passing_indices(concerts: &[Concert], criteria: &FilterCriteria) -> Vec<usize> {
    concerts
        .iter()
        .enumerate()
        .filter(|(_, concert)| satisfies(concert, criteria))
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{concert, future_datetime};

    fn criteria(term: &str, tags: &[&str]) -> FilterCriteria {
        FilterCriteria::new(term, tags.iter().map(|t| t.to_string()))
    }

    #[test]
    fn empty_criteria_passes_everything() {
        let c = concert("id-1", "Schubert Lieder", "Wigmore Hall", future_datetime());
        assert!(satisfies(&c, &FilterCriteria::default()));
    }

    #[test]
    fn search_is_case_insensitive() {
        let c = concert("id-1", "Schubert Lieder", "Wigmore Hall", future_datetime());
        assert!(satisfies(&c, &criteria("WIGMORE", &[])));
        assert!(satisfies(&c, &criteria("wigmore", &[])));
        assert!(satisfies(&c, &criteria("schubert", &[])));
    }

    #[test]
    fn search_matches_subtitle_and_performers() {
        let mut c = concert("id-1", "Lunchtime Recital", "Milton Court", future_datetime());
        c.subtitle = Some("An afternoon of Brahms".to_string());
        c.performers[0].name = "Mitsuko Uchida".to_string();

        assert!(satisfies(&c, &criteria("brahms", &[])));
        assert!(satisfies(&c, &criteria("uchida", &[])));
        assert!(!satisfies(&c, &criteria("elgar", &[])));
    }

    #[test]
    fn venue_tag_matches_only_that_venue() {
        let at_wigmore = concert("id-1", "Recital", "Wigmore Hall", future_datetime());
        let elsewhere = concert("id-2", "Recital", "Barbican", future_datetime());

        let f = criteria("", &["Wigmore Hall"]);
        assert!(satisfies(&at_wigmore, &f));
        assert!(!satisfies(&elsewhere, &f));
    }

    #[test]
    fn attribute_tags_read_concert_flags() {
        let mut prom = concert("id-1", "Prom 12", "Royal Albert Hall", future_datetime());
        prom.is_prom = true;
        let not_prom = concert("id-2", "Recital", "Royal Albert Hall", future_datetime());

        let f = criteria("", &["BBC Proms"]);
        assert!(satisfies(&prom, &f));
        assert!(!satisfies(&not_prom, &f));
    }

    #[test]
    fn all_active_tags_must_hold() {
        let mut c = concert("id-1", "Prom 12", "Royal Albert Hall", future_datetime());
        c.is_prom = true;

        assert!(satisfies(&c, &criteria("", &["BBC Proms", "Royal Albert Hall"])));
        assert!(!satisfies(&c, &criteria("", &["BBC Proms", "Wigmore Hall"])));
    }

    #[test]
    fn unknown_tag_fails_closed() {
        let c = concert("id-1", "Recital", "Wigmore Hall", future_datetime());
        assert!(!satisfies(&c, &criteria("", &["No Such Tag"])));
        // Even when every other part of the criteria matches
        assert!(!satisfies(&c, &criteria("wigmore", &["No Such Tag"])));
    }

    #[test]
    fn search_and_tags_are_conjunctive() {
        let c = concert("id-1", "Schubert Lieder", "Wigmore Hall", future_datetime());
        assert!(satisfies(&c, &criteria("schubert", &["Wigmore Hall"])));
        assert!(!satisfies(&c, &criteria("elgar", &["Wigmore Hall"])));
        assert!(!satisfies(&c, &criteria("schubert", &["BBC Proms"])));
    }

    #[test]
    fn passing_ids_keeps_input_order() {
        let concerts = vec![
            concert("id-1", "Recital", "Wigmore Hall", future_datetime()),
            concert("id-2", "Symphony", "Barbican", future_datetime()),
            concert("id-3", "Recital", "Wigmore Hall", future_datetime()),
        ];

        let ids = passing_ids(&concerts, &criteria("", &["Wigmore Hall"]));
        assert_eq!(ids, ["id-1", "id-3"]);
    }

    #[test]
    fn passing_indices_are_positional() {
        let concerts = vec![
            concert("id-1", "Recital", "Wigmore Hall", future_datetime()),
            concert("id-2", "Symphony", "Barbican", future_datetime()),
            concert("id-3", "Recital", "Wigmore Hall", future_datetime()),
        ];

        let indices = passing_indices(&concerts, &criteria("", &["Wigmore Hall"]));
        assert_eq!(indices, [0, 2]);
    }
}
