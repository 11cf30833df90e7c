use crate::{Error, Result};
use fzbmark_core::{BookmarkRecord, Browser};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Top level of a Chromium `Bookmarks` file
#[derive(Debug, Deserialize)]
struct BookmarksFile {
    roots: Roots,
}

/// The fixed set of root folders. Other keys under `roots` are ignored.
#[derive(Debug, Deserialize)]
struct Roots {
    bookmark_bar: Option<Node>,
    other: Option<Node>,
    synced: Option<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    children: Vec<Node>,
}

/// Read bookmarks from a Chrome, Chromium or Brave `Bookmarks` file
pub(super) fn read(path: &Path, browser: Browser, profile: &str) -> Result<Vec<BookmarkRecord>> {
    let file = File::open(path).map_err(|e| Error::unreadable(path, e))?;
    let parsed = parse(BufReader::new(file)).map_err(|e| Error::unreadable(path, e))?;

    Ok(flatten(parsed.roots, browser, profile))
}

/// Deserialize a `Bookmarks` document of any folder depth.
///
/// serde_json stops at 128 levels by default, which a tree of about 60
/// nested folders already reaches. The limit is lifted and the stack grows
/// on demand instead.
fn parse<R: Read>(reader: R) -> serde_json::Result<BookmarksFile> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();

    let parsed = BookmarksFile::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(parsed)
}

/// Depth-first walk over the root folders, emitting one record per URL node.
///
/// Uses an explicit stack so deeply nested trees cannot overflow the call
/// stack. Children are pushed in reverse to keep their stored order.
fn flatten(roots: Roots, browser: Browser, profile: &str) -> Vec<BookmarkRecord> {
    let mut out = Vec::new();
    let mut stack: Vec<(Node, Vec<String>)> = [roots.synced, roots.other, roots.bookmark_bar]
        .into_iter()
        .flatten()
        .map(|root| (root, Vec::new()))
        .collect();

    while let Some((node, parents)) = stack.pop() {
        match node.kind.as_str() {
            "url" => {
                let Some(url) = node.url.filter(|u| !u.is_empty()) else {
                    continue;
                };
                match BookmarkRecord::new(node.name, url, browser, profile, parents) {
                    Ok(record) => out.push(record),
                    Err(e) => tracing::debug!("Skipping bookmark: {}", e),
                }
            }
            _ => {
                let mut path = parents;
                path.push(node.name);
                for child in node.children.into_iter().rev() {
                    stack.push((child, path.clone()));
                }
            }
        }
    }

    out
}
