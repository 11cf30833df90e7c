use super::Context;
use super::list::print_records;
use crate::{OutputFormat, Outcome};
use anyhow::Result;

/// Print bookmarks whose title or URL contains `term`, ignoring case
pub fn execute(ctx: &Context, term: &str, format: OutputFormat) -> Result<Outcome> {
    tracing::debug!("Searching bookmarks for '{}'", term);

    let catalog = ctx.catalog()?;
    let records = catalog.query(&ctx.query().with_term(term));

    if records.is_empty() {
        eprintln!("No bookmarks found matching '{}'", term);
        return Ok(Outcome::NoResults);
    }

    print_records(&records, format)?;
    Ok(Outcome::Success)
}
