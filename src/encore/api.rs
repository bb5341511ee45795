//! # API Facade
//!
//! Single entry point for every operation a client performs against the
//! catalog and the saved views. The facade dispatches to the command layer
//! and returns structured [`CmdResult`] values; it never prints and never
//! exits. Any front end, the bundled CLI included, talks to the core
//! through this type.
//!
//! `EncoreApi<S: KeyValueStore>` is generic over the storage backend:
//! `FileStore` in production, `InMemoryStore` in tests.

use crate::catalog::Catalog;
use crate::commands;
use crate::error::Result;
use crate::filters::FilterCriteria;
use crate::state::ListenerId;
use crate::store::KeyValueStore;
use crate::views::{ViewMap, ViewStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct EncoreApi<S: KeyValueStore> {
    catalog: Arc<Catalog>,
    views: ViewStore<S>,
}

impl<S: KeyValueStore> EncoreApi<S> {
    /// Wire the catalog to the view store. `now` is the instant used to age
    /// out expired concerts from persisted views.
    pub fn new(catalog: Arc<Catalog>, store: S, now: DateTime<Utc>) -> Self {
        let views = ViewStore::open(store, Arc::clone(&catalog), now);
        Self { catalog, views }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current view mapping, reserved view included.
    pub fn views_mapping(&self) -> &ViewMap {
        self.views.views()
    }

    /// Observe the view mapping: called immediately with the current value,
    /// then after every write.
    pub fn subscribe_views(
        &mut self,
        listener: impl FnMut(&ViewMap) + 'static,
    ) -> ListenerId {
        self.views.subscribe(listener)
    }

    pub fn unsubscribe_views(&mut self, id: ListenerId) {
        self.views.unsubscribe(id)
    }

    pub fn list_concerts(
        &self,
        view_name: &str,
        criteria: &FilterCriteria,
    ) -> Result<commands::CmdResult> {
        commands::list::run(&self.views, view_name, criteria)
    }

    pub fn show_concert(&self, concert_id: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.catalog, concert_id)
    }

    pub fn list_views(&self) -> Result<commands::CmdResult> {
        commands::views::run(&self.views)
    }

    pub fn save_view(
        &mut self,
        name: &str,
        source: commands::save::SaveSource,
    ) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.views, name, source)
    }

    pub fn remove_view(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.views, name)
    }

    pub fn rename_view(&mut self, old_name: &str, new_name: &str) -> Result<commands::CmdResult> {
        commands::rename::run(&mut self.views, old_name, new_name)
    }

    pub fn list_tags(&self) -> Result<commands::CmdResult> {
        commands::tags::run()
    }
}

pub use commands::save::SaveSource;
pub use commands::{CmdMessage, CmdResult, MessageLevel, TagSummary, ViewSummary};
