use crate::{Error, Result};
use fzbmark_core::{BookmarkRecord, Browser};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// moz_bookmarks.type values
const TYPE_BOOKMARK: i64 = 1;
const TYPE_FOLDER: i64 = 2;

const ROOT_GUID: &str = "root________";
const TAGS_GUID: &str = "tags________";

/// Upper bound on parent hops, so a corrupt parent cycle cannot loop forever
const MAX_FOLDER_DEPTH: usize = 128;

struct Folder {
    parent: i64,
    title: String,
    guid: String,
}

/// Read bookmarks from a Firefox `places.sqlite`.
///
/// A running Firefox keeps the database under an exclusive lock. In that
/// case the file and its write-ahead log are copied to a temporary
/// directory and the copy is read instead.
pub(super) fn read(path: &Path, browser: Browser, profile: &str) -> Result<Vec<BookmarkRecord>> {
    let conn = open_read_only(path).map_err(|e| Error::unreadable(path, e))?;

    match extract_bookmarks(&conn, browser, profile) {
        Ok(records) => Ok(records),
        Err(e) if is_locked(&e) => {
            drop(conn);
            tracing::debug!("{} is locked, reading a snapshot", path.display());
            read_snapshot(path, browser, profile)
        }
        Err(e) => Err(Error::unreadable(path, e)),
    }
}

fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    // Fail now instead of waiting for the lock holder
    conn.busy_timeout(Duration::ZERO)?;
    Ok(conn)
}

fn is_locked(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    )
}

/// Read a private copy of a locked database
fn read_snapshot(path: &Path, browser: Browser, profile: &str) -> Result<Vec<BookmarkRecord>> {
    let temp_dir = tempfile::tempdir().map_err(|e| Error::unreadable(path, e))?;
    let copy = temp_dir.path().join("places.sqlite");

    fs::copy(path, &copy).map_err(|e| Error::unreadable(path, e))?;
    let wal = path.with_file_name(format!("{}-wal", file_name(path)));
    if wal.is_file() {
        fs::copy(&wal, temp_dir.path().join("places.sqlite-wal"))
            .map_err(|e| Error::unreadable(path, e))?;
    }

    // Opened read-write so SQLite can replay the copied log into the copy
    let conn = Connection::open(&copy).map_err(|e| Error::unreadable(path, e))?;
    conn.busy_timeout(Duration::ZERO).map_err(|e| Error::unreadable(path, e))?;

    extract_bookmarks(&conn, browser, profile).map_err(|e| Error::unreadable(path, e))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "places.sqlite".to_string())
}

fn extract_bookmarks(
    conn: &Connection,
    browser: Browser,
    profile: &str,
) -> rusqlite::Result<Vec<BookmarkRecord>> {
    let folders = load_folders(conn)?;

    let mut out = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT b.parent, b.title, p.url FROM moz_bookmarks b \
         JOIN moz_places p ON p.id = b.fk \
         WHERE b.type = ?1 AND p.url IS NOT NULL \
         ORDER BY b.id",
    )?;
    let rows = stmt.query_map([TYPE_BOOKMARK], |row| {
        let parent: Option<i64> = row.get(0)?;
        let title: Option<String> = row.get(1)?;
        let url: String = row.get(2)?;
        Ok((parent.unwrap_or(0), title, url))
    })?;

    for row in rows {
        let (parent, title, url) = row?;

        if !is_web_url(&url) {
            tracing::trace!("Skipping non-web bookmark {}", url);
            continue;
        }

        // None means the row is a tag assignment, not a bookmark
        let Some(folder_path) = folder_path(&folders, parent) else {
            continue;
        };

        match BookmarkRecord::new(title.unwrap_or_default(), url, browser, profile, folder_path) {
            Ok(record) => out.push(record),
            Err(e) => tracing::debug!("Skipping bookmark: {}", e),
        }
    }

    Ok(out)
}

fn load_folders(conn: &Connection) -> rusqlite::Result<HashMap<i64, Folder>> {
    let mut stmt = conn.prepare("SELECT id, parent, title, guid FROM moz_bookmarks WHERE type = ?1")?;
    let rows = stmt.query_map([TYPE_FOLDER], |row| {
        let id: i64 = row.get(0)?;
        let parent: Option<i64> = row.get(1)?;
        let title: Option<String> = row.get(2)?;
        let guid: Option<String> = row.get(3)?;
        Ok((
            id,
            Folder {
                parent: parent.unwrap_or(0),
                title: title.unwrap_or_default(),
                guid: guid.unwrap_or_default(),
            },
        ))
    })?;

    rows.collect()
}

/// Folder names from the top-level folder down to `parent`.
///
/// Returns `None` for entries filed under the tags root.
fn folder_path(folders: &HashMap<i64, Folder>, parent: i64) -> Option<Vec<String>> {
    let mut path = Vec::new();
    let mut current = parent;

    for _ in 0..MAX_FOLDER_DEPTH {
        let Some(folder) = folders.get(&current) else {
            break;
        };
        if folder.guid == TAGS_GUID {
            return None;
        }
        if folder.guid == ROOT_GUID || folder.parent == 0 {
            break;
        }

        let name = root_name(&folder.guid).map_or_else(|| folder.title.clone(), str::to_string);
        path.push(name);
        current = folder.parent;
    }

    path.reverse();
    Some(path)
}

fn root_name(guid: &str) -> Option<&'static str> {
    match guid {
        "menu________" => Some("Bookmarks Menu"),
        "toolbar_____" => Some("Bookmarks Toolbar"),
        "unfiled_____" => Some("Other Bookmarks"),
        "mobile______" => Some("Mobile Bookmarks"),
        _ => None,
    }
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
