//! Mutable session state with subscribe/update semantics.
//!
//! [`Observable`] is a plain publish/subscribe container: a value plus a list
//! of listeners invoked synchronously on every change, in subscription order.
//! There is no reactivity framework behind it and no deferred delivery;
//! callers on the one logical UI thread see every write in the order it was
//! issued.
//!
//! [`SessionState`] bundles the three observables a client needs: the filter
//! criteria, the active view name and the current selection. It is built at
//! startup and passed around explicitly.

use crate::filters::FilterCriteria;
use crate::views::ALL_VIEW_NAME;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub struct Observable<T> {
    value: T,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
    next_listener: u64,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Borrow the current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Compute something from a borrow of the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value)
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.clone()
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        self.value = f(&self.value);
        self.notify();
    }

    /// Register a listener. It is called once immediately with the current
    /// value, then again after every change until unsubscribed.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&T) + 'static) -> ListenerId {
        listener(&self.value);
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
    }
}

/// Per-session UI state: filter criteria, active view, selected concerts.
pub struct SessionState {
    pub criteria: Observable<FilterCriteria>,
    pub active_view: Observable<String>,
    pub selection: Observable<BTreeSet<String>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            criteria: Observable::new(FilterCriteria::default()),
            active_view: Observable::new(ALL_VIEW_NAME.to_string()),
            selection: Observable::new(BTreeSet::new()),
        }
    }

    /// Switch views. The selection is scoped to a view, so it resets.
    pub fn set_active_view(&mut self, name: impl Into<String>) {
        self.active_view.set(name.into());
        self.selection.set(BTreeSet::new());
    }

    /// Toggle a concert in or out of the selection. Selection is not
    /// validated against the filters: an item filtered out of sight stays
    /// selected until the view changes.
    pub fn toggle_selected(&mut self, concert_id: &str) {
        self.selection.update(|selection| {
            let mut selection = selection.clone();
            if !selection.remove(concert_id) {
                selection.insert(concert_id.to_string());
            }
            selection
        });
    }

    pub fn is_selected(&self, concert_id: &str) -> bool {
        self.selection.with(|selection| selection.contains(concert_id))
    }

    pub fn selected_concert_ids(&self) -> Vec<String> {
        self.selection
            .with(|selection| selection.iter().cloned().collect())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
