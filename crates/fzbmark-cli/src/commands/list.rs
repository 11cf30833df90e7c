use super::Context;
use crate::{OutputFormat, Outcome};
use anyhow::Result;
use console::style;
use fzbmark_core::BookmarkRecord;
use std::io::{self, Write};

/// Print every bookmark in the catalog
pub fn execute(ctx: &Context, format: OutputFormat) -> Result<Outcome> {
    let catalog = ctx.catalog()?;
    let records = catalog.query(&ctx.query());

    // An empty catalog is still a complete listing
    if records.is_empty() {
        eprintln!("No bookmarks found.");
        return Ok(Outcome::Success);
    }

    print_records(&records, format)?;
    Ok(Outcome::Success)
}

/// Write records to stdout in the requested format
pub fn print_records(records: &[&BookmarkRecord], format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => {
            for (index, record) in records.iter().enumerate() {
                writeln!(out, "{}", format_row(index + 1, record))?;
            }
        }
    }

    Ok(())
}

/// `  1. <title> | <url> | <browser>` with title and URL cut to 50 columns
pub fn format_row(number: usize, record: &BookmarkRecord) -> String {
    format!(
        "{:>3}. {:<50.50} | {:<50.50} | {}",
        number,
        single_line(record.display_title()),
        single_line(record.url()),
        style(record.browser()).dim()
    )
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
