use crate::commands::{CmdMessage, CmdResult};
use crate::error::{EncoreError, Result};
use crate::store::KeyValueStore;
use crate::views::{ViewStore, ALL_VIEW_NAME};

pub fn run<S: KeyValueStore>(
    views: &mut ViewStore<S>,
    old_name: &str,
    new_name: &str,
) -> Result<CmdResult> {
    if old_name == ALL_VIEW_NAME || new_name == ALL_VIEW_NAME {
        return Err(EncoreError::Api(format!(
            "\"{}\" is the reserved full-catalog view and cannot be renamed",
            ALL_VIEW_NAME
        )));
    }
    if !views.contains_view(old_name) {
        return Err(EncoreError::ViewNotFound(old_name.to_string()));
    }
    if old_name != new_name && views.contains_view(new_name) {
        return Err(EncoreError::Api(format!(
            "A view named {} already exists",
            new_name
        )));
    }

    // One transform, one durable write: storage never holds both names
    views.update_views(|mut map| {
        if let Some(ids) = map.remove(old_name) {
            map.insert(new_name.to_string(), ids);
        }
        map
    });

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "View renamed: {} -> {}",
        old_name, new_name
    )));
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
            Catalog::new(vec![
                concert("id-1", "Recital", "Wigmore Hall", future_datetime()),
                concert("id-2", "Symphony", "Barbican", future_datetime()),
            ])
            .unwrap(),
        );
        ViewStore::open(
            InMemoryStore::new(),
            catalog,
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn renames_and_keeps_the_id_order() {
        let mut views = view_store();
        save::run(
            &mut views,
            "X",
            SaveSource::Ids(vec!["id-2".to_string(), "id-1".to_string()]),
        )
        .unwrap();

        run(&mut views, "X", "Y").unwrap();
        assert!(!views.contains_view("X"));
        assert_eq!(views.views().get("Y").unwrap(), &["id-2", "id-1"]);
    }

    #[test]
    fn cannot_rename_onto_an_existing_view() {
        let mut views = view_store();
        save::run(&mut views, "X", SaveSource::Ids(vec!["id-1".to_string()])).unwrap();
        save::run(&mut views, "Y", SaveSource::Ids(vec!["id-2".to_string()])).unwrap();

        assert!(matches!(
            run(&mut views, "X", "Y"),
            Err(EncoreError::Api(_))
        ));
    }

    #[test]
    fn reserved_view_cannot_take_part() {
        let mut views = view_store();
        save::run(&mut views, "X", SaveSource::Ids(vec!["id-1".to_string()])).unwrap();

        assert!(matches!(
            run(&mut views, ALL_VIEW_NAME, "Y"),
            Err(EncoreError::Api(_))
        ));
        assert!(matches!(
            run(&mut views, "X", ALL_VIEW_NAME),
            Err(EncoreError::Api(_))
        ));
    }

    #[test]
    fn renaming_a_missing_view_is_an_error() {
        let mut views = view_store();
        assert!(matches!(
            run(&mut views, "Nope", "Y"),
            Err(EncoreError::ViewNotFound(_))
        ));
    }
}
