use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Browser families fzbmark knows how to read.
///
/// Variant order is the catalog priority order: when two browsers hold the
/// same URL, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Firefox,
    Chrome,
    Chromium,
    Brave,
}

impl Browser {
    /// All browsers in priority order
    pub const ALL: [Browser; 4] = [
        Browser::Firefox,
        Browser::Chrome,
        Browser::Chromium,
        Browser::Brave,
    ];

    /// Lowercase tag used on the command line and in output
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Firefox => "firefox",
            Browser::Chrome => "chrome",
            Browser::Chromium => "chromium",
            Browser::Brave => "brave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Browser::Firefox => "Firefox",
            Browser::Chrome => "Google Chrome",
            Browser::Chromium => "Chromium",
            Browser::Brave => "Brave",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "firefox" => Ok(Browser::Firefox),
            "chrome" | "google-chrome" => Ok(Browser::Chrome),
            "chromium" => Ok(Browser::Chromium),
            "brave" => Ok(Browser::Brave),
            _ => Err(Error::UnknownBrowser(s.to_string())),
        }
    }
}

/// A single bookmark, normalized across browser formats.
///
/// Records are immutable once built; the catalog never edits one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    title: String,
    url: String,
    browser: Browser,
    profile: String,
    folder_path: Vec<String>,
}

impl BookmarkRecord {
    /// Build a record, rejecting an empty URL
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        browser: Browser,
        profile: impl Into<String>,
        folder_path: Vec<String>,
    ) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(Error::InvalidRecord("bookmark URL is empty".to_string()));
        }

        let profile = profile.into();
        let profile = if profile.is_empty() {
            "default".to_string()
        } else {
            profile
        };

        Ok(Self {
            title: title.into(),
            url,
            browser,
            profile,
            folder_path,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display, falling back to the URL when the title is blank
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn browser(&self) -> Browser {
        self.browser
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn folder_path(&self) -> &[String] {
        &self.folder_path
    }
}
