use crate::commands::{CmdResult, ViewSummary};
use crate::error::Result;
use crate::store::KeyValueStore;
use crate::views::{ViewStore, ALL_VIEW_NAME};

pub fn run<S: KeyValueStore>(views: &ViewStore<S>) -> Result<CmdResult> {
    let mut summaries = vec![ViewSummary {
        name: ALL_VIEW_NAME.to_string(),
        concert_count: views.catalog().len(),
    }];
    for (name, ids) in views.views() {
        if name == ALL_VIEW_NAME {
            continue;
        }
        summaries.push(ViewSummary {
            name: name.clone(),
            concert_count: ids.len(),
        });
    }

    Ok(CmdResult::default().with_view_summaries(summaries))
}
