//! Interactive mode: choose a bookmark in the finder and open it.
//!
//! If the finder cannot be run, or hands back a line that does not decode,
//! the bookmarks are printed as a numbered list and the choice is read from
//! stdin instead.

use super::Context;
use super::list::format_row;
use crate::Outcome;
use crate::finder::{Finder, Selection};
use anyhow::{Context as _, Result};
use fzbmark_browser::Launcher;
use fzbmark_core::SearchFeed;
use std::io::{self, BufRead, Write};

pub fn execute(ctx: &Context, finder: &str, opener: Option<String>) -> Result<Outcome> {
    let catalog = ctx.catalog()?;
    let records = catalog.query(&ctx.query());

    if records.is_empty() {
        eprintln!("No bookmarks found.");
        return Ok(Outcome::NoResults);
    }

    let feed = SearchFeed::new(records);
    let finder = Finder::new(finder);

    let index = match finder.select(&feed.encode(), &preview_command(ctx)?) {
        Selection::Chosen(line) => match feed.decode(&line) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!("{}; falling back to a numbered list", e);
                prompt_from_stdin(&feed)?
            }
        },
        Selection::Cancelled => {
            tracing::debug!("Selection cancelled");
            return Ok(Outcome::Success);
        }
        Selection::NoMatch => return Ok(Outcome::NoResults),
        Selection::Unavailable(reason) => {
            tracing::warn!(
                "Finder unavailable ({}); falling back to a numbered list",
                reason
            );
            prompt_from_stdin(&feed)?
        }
    };

    let Some(record) = index.and_then(|i| feed.record(i)) else {
        return Ok(Outcome::NoResults);
    };

    let launcher = Launcher::new(opener, ctx.browser);
    tracing::debug!("Opening {}", record.url());
    if let Err(e) = launcher.open(record) {
        tracing::warn!("Could not open {}: {}", record.url(), e);
    }

    Ok(Outcome::Success)
}

fn prompt_from_stdin(feed: &SearchFeed<'_>) -> Result<Option<usize>> {
    prompt_selection(
        feed,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr(),
    )
}

/// Numbered-list fallback. Returns the chosen feed index, or `None` when
/// the input is empty or not a valid number.
pub fn prompt_selection(
    feed: &SearchFeed<'_>,
    input: &mut impl BufRead,
    list: &mut impl Write,
    prompt: &mut impl Write,
) -> Result<Option<usize>> {
    for index in 0..feed.len() {
        if let Some(record) = feed.record(index) {
            writeln!(list, "{}", format_row(index + 1, record))?;
        }
    }
    list.flush()?;

    write!(prompt, "\nSelect bookmark number (or Enter to cancel): ")?;
    prompt.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read selection")?;
    let answer = answer.trim();

    if answer.is_empty() {
        writeln!(prompt, "Cancelled.")?;
        return Ok(None);
    }

    match answer.parse::<usize>() {
        Ok(number) if (1..=feed.len()).contains(&number) => Ok(Some(number - 1)),
        _ => {
            writeln!(prompt, "Invalid selection: '{}'", answer)?;
            Ok(None)
        }
    }
}

/// Shell command the finder runs to fill its preview pane
fn preview_command(ctx: &Context) -> Result<String> {
    let exe = std::env::current_exe().context("Cannot locate the fzbmark executable")?;

    let mut command = format!(
        "{} --home {}",
        shell_quote(&exe.to_string_lossy()),
        shell_quote(&ctx.locator.home().to_string_lossy())
    );
    if let Some(browser) = ctx.browser {
        command.push_str(&format!(" --browser {}", browser));
    }
    command.push_str(" --preview {}");

    Ok(command)
}

/// Single-quote `text` for a POSIX shell
#[cfg(not(windows))]
fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Double-quote `text` for `cmd.exe`, which fzf uses on Windows.
/// Windows paths cannot contain `"`.
#[cfg(windows)]
fn shell_quote(text: &str) -> String {
    format!("\"{}\"", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fzbmark_core::{BookmarkRecord, Browser};
    use std::io::Cursor;

    fn records() -> Vec<BookmarkRecord> {
        vec![
            BookmarkRecord::new("Docs", "https://a.com", Browser::Firefox, "default", vec![])
                .unwrap(),
            BookmarkRecord::new("Blog", "https://b.com", Browser::Firefox, "default", vec![])
                .unwrap(),
        ]
    }

    fn run_prompt(answer: &str) -> (Option<usize>, String, String) {
        let records = records();
        let feed = SearchFeed::new(&records);
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut list = Vec::new();
        let mut prompt = Vec::new();

        let choice = prompt_selection(&feed, &mut input, &mut list, &mut prompt).unwrap();
        (
            choice,
            String::from_utf8(list).unwrap(),
            String::from_utf8(prompt).unwrap(),
        )
    }

    #[test]
    fn test_prompt_selects_one_based_number() {
        console::set_colors_enabled(false);
        let (choice, list, prompt) = run_prompt("1\n");

        assert_eq!(choice, Some(0));
        assert!(list.starts_with("  1. Docs"));
        assert!(list.contains("  2. Blog"));
        assert!(prompt.contains("Select bookmark number"));
    }

    #[test]
    fn test_prompt_empty_input_cancels() {
        let (choice, _, prompt) = run_prompt("\n");
        assert_eq!(choice, None);
        assert!(prompt.contains("Cancelled."));

        let (choice, _, _) = run_prompt("");
        assert_eq!(choice, None);
    }

    #[test]
    fn test_prompt_rejects_out_of_range() {
        for answer in ["0\n", "3\n", "abc\n", "-1\n"] {
            let (choice, _, prompt) = run_prompt(answer);
            assert_eq!(choice, None, "answer {:?}", answer);
            assert!(prompt.contains("Invalid selection"));
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("/usr/bin/fzbmark"), "'/usr/bin/fzbmark'");
        assert_eq!(shell_quote("/home/o'neil"), r"'/home/o'\''neil'");
    }

    #[cfg(windows)]
    #[test]
    fn test_shell_quote_uses_double_quotes() {
        assert_eq!(
            shell_quote(r"C:\Program Files\fzbmark.exe"),
            r#""C:\Program Files\fzbmark.exe""#
        );
        assert_eq!(shell_quote(r"C:\Users\o'neil"), r#""C:\Users\o'neil""#);
    }

    #[test]
    fn test_preview_command_forwards_home_and_browser() {
        let ctx = Context::new(Some("/tmp/fake home".into()), Some(Browser::Brave)).unwrap();
        let command = preview_command(&ctx).unwrap();

        assert!(command.contains(&format!("--home {}", shell_quote("/tmp/fake home"))));
        assert!(command.contains("--browser brave"));
        assert!(command.ends_with("--preview {}"));
    }
}
