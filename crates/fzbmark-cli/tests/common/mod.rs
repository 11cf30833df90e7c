#![allow(dead_code)]

use assert_cmd::Command;
use fzbmark_browser::ProfileLocator;
use fzbmark_core::Browser;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
pub fn get_fzbmark_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("fzbmark")
}

/// A throwaway home directory with browser profiles in their usual places
pub struct FakeHome {
    dir: TempDir,
}

impl FakeHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn root(&self, browser: Browser) -> PathBuf {
        ProfileLocator::new(self.path()).store_roots(browser)[0].clone()
    }

    /// Firefox profile directory with a places.sqlite holding `bookmarks`
    /// (title, url) on the toolbar, in order
    pub fn add_firefox_profile(&self, dir_name: &str, bookmarks: &[(&str, &str)]) -> PathBuf {
        let profile_dir = self.root(Browser::Firefox).join(dir_name);
        fs::create_dir_all(&profile_dir).unwrap();
        let db_path = profile_dir.join("places.sqlite");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT, title TEXT);
             CREATE TABLE moz_bookmarks (
                 id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER, parent INTEGER,
                 position INTEGER, title TEXT, guid TEXT);
             INSERT INTO moz_bookmarks VALUES (1, 2, NULL, 0, 0, '', 'root________');
             INSERT INTO moz_bookmarks VALUES (2, 2, NULL, 1, 0, 'menu', 'menu________');
             INSERT INTO moz_bookmarks VALUES (3, 2, NULL, 1, 1, 'toolbar', 'toolbar_____');
             INSERT INTO moz_bookmarks VALUES (4, 2, NULL, 1, 2, 'tags', 'tags________');
             INSERT INTO moz_bookmarks VALUES (5, 2, NULL, 1, 3, 'unfiled', 'unfiled_____');",
        )
        .unwrap();

        for (i, (title, url)) in bookmarks.iter().enumerate() {
            let place_id = i as i64 + 1;
            let bookmark_id = i as i64 + 100;
            conn.execute(
                "INSERT INTO moz_places (id, url) VALUES (?1, ?2)",
                params![place_id, url],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO moz_bookmarks (id, type, fk, parent, position, title, guid) \
                 VALUES (?1, 1, ?2, 3, ?3, ?4, ?5)",
                params![bookmark_id, place_id, i as i64, title, format!("bm{bookmark_id:010}")],
            )
            .unwrap();
        }

        db_path
    }

    /// Chromium-family profile with `bookmarks` (title, url) on the bookmark bar
    pub fn add_chromium_profile(
        &self,
        browser: Browser,
        profile: &str,
        bookmarks: &[(&str, &str)],
    ) -> PathBuf {
        let profile_dir = self.root(browser).join(profile);
        fs::create_dir_all(&profile_dir).unwrap();
        let path = profile_dir.join("Bookmarks");

        let children: Vec<serde_json::Value> = bookmarks
            .iter()
            .map(|(title, url)| serde_json::json!({ "type": "url", "name": title, "url": url }))
            .collect();
        let document = serde_json::json!({
            "roots": {
                "bookmark_bar": { "type": "folder", "name": "Bookmarks bar", "children": children },
                "other": { "type": "folder", "name": "Other bookmarks", "children": [] },
                "synced": { "type": "folder", "name": "Mobile bookmarks", "children": [] }
            },
            "version": 1
        });
        fs::write(&path, serde_json::to_vec_pretty(&document).unwrap()).unwrap();

        path
    }

    /// Firefox `[Docs a.com, Blog b.com]` plus Chrome `[Docs2 a.com]`
    pub fn with_overlapping_bookmarks() -> Self {
        let home = Self::new();
        home.add_firefox_profile(
            "ff.default",
            &[("Docs", "https://a.com"), ("Blog", "https://b.com")],
        );
        home.add_chromium_profile(Browser::Chrome, "Default", &[("Docs2", "https://a.com")]);
        home
    }

    /// `fzbmark` pointed at this home, isolated from the caller's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_fzbmark_bin());
        cmd.env("FZBMARK_HOME", self.path())
            .env_remove("FZBMARK_FINDER")
            .env_remove("FZBMARK_OPENER")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Write an executable shell script standing in for the finder
#[cfg(unix)]
pub fn fake_finder(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-fzf");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
