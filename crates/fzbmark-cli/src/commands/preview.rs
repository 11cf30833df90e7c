use super::Context;
use crate::Outcome;
use anyhow::Result;
use fzbmark_core::SearchFeed;
use fzbmark_core::feed::decode_index;

/// Finder preview callback: print details for the bookmark on `line`.
///
/// Rebuilds the same catalog as the interactive session, so the index in
/// the line refers to the same record. Problems are printed to stdout
/// because that is what the preview pane shows.
pub fn execute(ctx: &Context, line: &str) -> Result<Outcome> {
    let index = match decode_index(line) {
        Ok(index) => index,
        Err(e) => {
            println!("{}", e);
            return Ok(Outcome::NoResults);
        }
    };

    let catalog = ctx.catalog()?;
    let feed = SearchFeed::new(catalog.query(&ctx.query()));

    match feed.preview(index) {
        Some(text) => {
            println!("{}", text);
            Ok(Outcome::Success)
        }
        None => {
            println!("No bookmark at index {}", index);
            Ok(Outcome::NoResults)
        }
    }
}
