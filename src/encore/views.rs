//! # View Store
//!
//! A view is a named, user-curated subset of the catalog, stored as an
//! ordered list of concert ids. The view store owns the canonical mapping
//! from view name to id list, merges it with durable storage at startup, and
//! is the sole writer of that storage. The mapping is an [`Observable`], so
//! clients subscribe to it like any other piece of session state and see
//! every write in issue order.
//!
//! One name is reserved: the view covering the whole catalog. It is
//! synthesized from the catalog (at load, and again on every write, so user
//! edits can never touch it) and it never reaches storage.
//!
//! ## Persistence contract
//!
//! Durable storage holds one key with a JSON document shaped
//! `{"view name": ["id", ...]}`. Every write serializes the complete
//! non-reserved mapping and replaces the document in a single `set`; there
//! are no per-view incremental writes, so storage always holds a consistent
//! snapshot. Writes go storage-first, then memory: a crash between the two
//! loses nothing on restart.
//!
//! Storage problems never escape this module. An unreadable or malformed
//! document loads as the empty set, a single bad entry is dropped without
//! taking its siblings down, and a failed write leaves the store running
//! memory-only for the rest of the session. Each of those is reported once.
//!
//! Nothing coordinates concurrent writers in other processes sharing the
//! same backend; the last writer's snapshot wins.
//!
//! ## Hydration
//!
//! Persisted views reference concerts by id only. Loading re-resolves every
//! id against the current catalog and silently drops ids that are unknown or
//! whose concert has already happened, so removed and expired events age out
//! of saved views on their own.

use crate::catalog::Catalog;
use crate::model::Concert;
use crate::state::{ListenerId, Observable};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use log::warn;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the reserved full-catalog view.
pub const ALL_VIEW_NAME: &str = "All";

/// Storage key for the persisted view document.
pub const STORAGE_KEY: &str = "local_views";

/// View name to ordered concert ids.
pub type ViewMap = BTreeMap<String, Vec<String>>;

pub struct ViewStore<S: KeyValueStore> {
    store: S,
    catalog: Arc<Catalog>,
    views: Observable<ViewMap>,
    write_degraded: bool,
}

impl<S: KeyValueStore> ViewStore<S> {
    /// Load persisted views and reconcile them against the catalog.
    ///
    /// `now` is the evaluation instant for dropping past concerts; callers
    /// outside tests pass `Utc::now()`.
    pub fn open(store: S, catalog: Arc<Catalog>, now: DateTime<Utc>) -> Self {
        let mut views = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => hydrate(&raw, &catalog, now),
            Ok(None) => ViewMap::new(),
            Err(e) => {
                warn!("View storage unavailable, starting without saved views: {}", e);
                ViewMap::new()
            }
        };
        views.insert(ALL_VIEW_NAME.to_string(), catalog_ids(&catalog));
        Self {
            store,
            catalog,
            views: Observable::new(views),
            write_degraded: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The full mapping: the reserved view plus every saved view.
    pub fn views(&self) -> &ViewMap {
        self.views.value()
    }

    /// Reserved view first, then saved views in name order.
    pub fn view_names(&self) -> Vec<String> {
        let mut names = vec![ALL_VIEW_NAME.to_string()];
        names.extend(
            self.views
                .value()
                .keys()
                .filter(|name| *name != ALL_VIEW_NAME)
                .cloned(),
        );
        names
    }

    pub fn contains_view(&self, name: &str) -> bool {
        self.views.value().contains_key(name)
    }

    /// Resolve a view to its concerts, in view order. `None` if no such view.
    pub fn concerts_in(&self, name: &str) -> Option<Vec<&Concert>> {
        self.views.value().get(name).map(|ids| {
            ids.iter()
                .filter_map(|id| self.catalog.get(id))
                .collect()
        })
    }

    /// Called once immediately with the current mapping, then after every
    /// write until unsubscribed.
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewMap) + 'static) -> ListenerId {
        self.views.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.views.unsubscribe(id)
    }

    /// Replace the whole view mapping.
    ///
    /// The reserved entry is re-synthesized from the catalog, so callers
    /// cannot edit it in or out. The non-reserved views are serialized and
    /// written to storage before memory is updated; if the write fails the
    /// store keeps going in memory only.
    pub fn set_views(&mut self, mut views: ViewMap) {
        views.insert(ALL_VIEW_NAME.to_string(), catalog_ids(&self.catalog));
        self.persist(&views);
        self.views.set(views);
    }

    /// Apply a pure transform to the current mapping and store the result.
    pub fn update_views<F>(&mut self, transform: F)
    where
        F: FnOnce(ViewMap) -> ViewMap,
    {
        let next = transform(self.views.value().clone());
        self.set_views(next);
    }

    fn persist(&mut self, views: &ViewMap) {
        // The reserved view never reaches storage
        let to_store: BTreeMap<&String, &Vec<String>> = views
            .iter()
            .filter(|(name, _)| *name != ALL_VIEW_NAME)
            .collect();
        let document = match serde_json::to_string(&to_store) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not serialize views, keeping in-memory state only: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &document) {
            if !self.write_degraded {
                warn!("Could not persist views, keeping in-memory state only: {}", e);
                self.write_degraded = true;
            }
        }
    }
}

fn catalog_ids(catalog: &Catalog) -> Vec<String> {
    catalog.concerts().iter().map(|c| c.id.clone()).collect()
}

/// Parse a persisted view document and resolve it against the catalog.
///
/// Failures are contained at the smallest useful scope: a document that is
/// not a JSON object yields the empty mapping, and an entry whose value is
/// not an array of strings is dropped on its own.
fn hydrate(raw: &str, catalog: &Catalog, now: DateTime<Utc>) -> ViewMap {
    let document = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(document)) => document,
        Ok(_) | Err(_) => {
            warn!("Ignoring malformed view storage document");
            return ViewMap::new();
        }
    };

    let mut views = ViewMap::new();
    for (name, value) in document {
        // Never read the reserved view from storage
        if name == ALL_VIEW_NAME {
            continue;
        }
        let Some(ids) = parse_id_list(&value) else {
            warn!("Dropping malformed persisted view {:?}", name);
            continue;
        };
        let live_ids = ids
            .into_iter()
            .filter(|id| {
                catalog
                    .get(id)
                    .is_some_and(|concert| concert.datetime > now)
            })
            .collect();
        views.insert(name, live_ids);
    }
    views
}

fn parse_id_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
