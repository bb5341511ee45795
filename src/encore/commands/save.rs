use crate::commands::{CmdMessage, CmdResult};
use crate::error::{EncoreError, Result};
use crate::filters::{passing_ids, FilterCriteria};
use crate::store::KeyValueStore;
use crate::views::{ViewStore, ALL_VIEW_NAME};

/// Where the concerts for a saved view come from: an explicit ordered id
/// list, or whatever currently matches a criteria.
#[derive(Debug, Clone)]
pub enum SaveSource {
    Ids(Vec<String>),
    Matching(FilterCriteria),
}

pub fn run<S: KeyValueStore>(
    views: &mut ViewStore<S>,
    name: &str,
    source: SaveSource,
) -> Result<CmdResult> {
    if name == ALL_VIEW_NAME {
        return Err(EncoreError::Api(format!(
            "\"{}\" is the reserved full-catalog view and cannot be replaced",
            ALL_VIEW_NAME
        )));
    }

    let ids = match source {
        SaveSource::Ids(ids) => {
            for id in &ids {
                if views.catalog().get(id).is_none() {
                    return Err(EncoreError::ConcertNotFound(id.clone()));
                }
            }
            ids
        }
        SaveSource::Matching(criteria) => passing_ids(views.catalog().concerts(), &criteria),
    };

    if ids.is_empty() {
        return Err(EncoreError::Api(
            "Nothing to save: no concert ids given and no concerts match".to_string(),
        ));
    }

    let count = ids.len();
    let replaced = views.contains_view(name);
    views.update_views(|mut map| {
        map.insert(name.to_string(), ids);
        map
    });

    let mut result = CmdResult::default();
    let verb = if replaced { "replaced" } else { "saved" };
    result.add_message(CmdMessage::success(format!(
        "View {} ({} concert{}): {}",
        verb,
        count,
        if count == 1 { "" } else { "s" },
        name
    )));
    Ok(result)
}
