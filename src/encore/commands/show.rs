use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::error::{EncoreError, Result};

pub fn run(catalog: &Catalog, concert_id: &str) -> Result<CmdResult> {
    let concert = catalog
        .get(concert_id)
        .ok_or_else(|| EncoreError::ConcertNotFound(concert_id.to_string()))?;

    Ok(CmdResult::default().with_listed_concerts(vec![concert.clone()]))
}
