mod common;

use common::FakeHome;
use fzbmark_core::Browser;
use predicates::prelude::*;

#[test]
fn test_preview_shows_bookmark_details() {
    let home = FakeHome::with_overlapping_bookmarks();
    let mut cmd = home.command();
    cmd.arg("--preview").arg("1\u{1f}Blog — https://b.com");

    cmd.assert().success().stdout(predicate::str::diff(
        "https://b.com\nFolder: Bookmarks Toolbar\nSource: Firefox (ff.default)\n",
    ));
}

#[test]
fn test_preview_respects_browser_restriction() {
    let home = FakeHome::with_overlapping_bookmarks();
    let mut cmd = home.command();
    cmd.args(["--browser", "chrome", "--preview"])
        .arg("0\u{1f}Docs2 — https://a.com");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Folder: Bookmarks bar"))
        .stdout(predicate::str::contains("Source: Google Chrome (Default)"));
}

#[test]
fn test_preview_output_has_no_warnings() {
    let home = FakeHome::new();
    let corrupt =
        home.add_chromium_profile(Browser::Chromium, "Default", &[("Docs", "https://a.com")]);
    std::fs::write(&corrupt, "{ not json").unwrap();
    home.add_chromium_profile(Browser::Brave, "Default", &[("Blog", "https://b.com")]);

    let mut cmd = home.command();
    cmd.arg("--preview").arg("0\u{1f}Blog — https://b.com");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "https://b.com\nFolder: Bookmarks bar\nSource: Brave (Default)\n",
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_preview_padded_index() {
    let home = FakeHome::new();
    let bookmarks: Vec<(String, String)> = (0..12)
        .map(|i| (format!("Page {i}"), format!("https://example.com/{i}")))
        .collect();
    let bookmarks: Vec<(&str, &str)> = bookmarks
        .iter()
        .map(|(title, url)| (title.as_str(), url.as_str()))
        .collect();
    home.add_chromium_profile(Browser::Brave, "Default", &bookmarks);

    let mut cmd = home.command();
    cmd.arg("--preview").arg(" 3\u{1f}Page 3 — https://example.com/3");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("https://example.com/3\n"));
}

#[test]
fn test_preview_line_without_separator() {
    let home = FakeHome::with_overlapping_bookmarks();
    let mut cmd = home.command();
    cmd.args(["--preview", "Blog — https://b.com"]);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("missing field separator"));
}

#[test]
fn test_preview_index_out_of_range() {
    let home = FakeHome::with_overlapping_bookmarks();
    let mut cmd = home.command();
    cmd.arg("--preview").arg("9\u{1f}Gone — https://gone.example");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::diff("No bookmark at index 9\n"));
}
