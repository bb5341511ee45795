use crate::commands::{CmdResult, TagSummary};
use crate::error::Result;
use crate::filters::ALL_BOOLEAN_FILTERS;

pub fn run() -> Result<CmdResult> {
    let summaries = ALL_BOOLEAN_FILTERS
        .iter()
        .map(|filter| TagSummary {
            name: filter.tag_name.to_string(),
            color: filter.tag_color.to_string(),
        })
        .collect();

    Ok(CmdResult::default().with_tag_summaries(summaries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_registered_tag() {
        let result = run().unwrap();
        let names: Vec<_> = result
            .tag_summaries
            .iter()
            .map(|tag| tag.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Wigmore Hall", "Wigmore U35 £5", "BBC Proms", "Royal Albert Hall"]
        );
    }
}
