use crate::commands::CmdResult;
use crate::error::{EncoreError, Result};
use crate::filters::{satisfies, FilterCriteria};
use crate::store::KeyValueStore;
use crate::views::ViewStore;

pub fn run<S: KeyValueStore>(
    views: &ViewStore<S>,
    view_name: &str,
    criteria: &FilterCriteria,
) -> Result<CmdResult> {
    let concerts = views
        .concerts_in(view_name)
        .ok_or_else(|| EncoreError::ViewNotFound(view_name.to_string()))?;

    let listed = concerts
        .into_iter()
        .filter(|concert| satisfies(concert, criteria))
        .cloned()
        .collect();

    Ok(CmdResult::default().with_listed_concerts(listed))
}
