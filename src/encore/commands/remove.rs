use crate::commands::{CmdMessage, CmdResult};
use crate::error::{EncoreError, Result};
use crate::store::KeyValueStore;
use crate::views::{ViewStore, ALL_VIEW_NAME};

pub fn run<S: KeyValueStore>(views: &mut ViewStore<S>, name: &str) -> Result<CmdResult> {
    if name == ALL_VIEW_NAME {
        return Err(EncoreError::Api(format!(
            "\"{}\" is the reserved full-catalog view and cannot be removed",
            ALL_VIEW_NAME
        )));
    }
    if !views.contains_view(name) {
        return Err(EncoreError::ViewNotFound(name.to_string()));
    }

    views.update_views(|mut map| {
        map.remove(name);
        map
    });

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("View removed: {}", name)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::commands::save::{self, SaveSource};
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::{concert, future_datetime};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn view_store() -> ViewStore<InMemoryStore> {
        let catalog = Arc::new(
            Catalog::new(vec![concert(
                "id-1",
                "Recital",
                "Wigmore Hall",
                future_datetime(),
            )])
            .unwrap(),
        );
        ViewStore::open(
            InMemoryStore::new(),
            catalog,
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn removes_a_saved_view() {
        let mut views = view_store();
        save::run(&mut views, "Mine", SaveSource::Ids(vec!["id-1".to_string()])).unwrap();

        run(&mut views, "Mine").unwrap();
        assert!(!views.contains_view("Mine"));
    }

    #[test]
    fn missing_view_is_an_error() {
        let mut views = view_store();
        assert!(matches!(
            run(&mut views, "Nope"),
            Err(EncoreError::ViewNotFound(_))
        ));
    }

    #[test]
    fn reserved_view_cannot_be_removed() {
        let mut views = view_store();
        assert!(matches!(
            run(&mut views, ALL_VIEW_NAME),
            Err(EncoreError::Api(_))
        ));
    }
}
