mod chromium;
mod places;

use crate::Result;
use crate::locator::Profile;
use fzbmark_core::{BookmarkRecord, Browser};
use std::path::Path;

/// On-disk bookmark store formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// Firefox `places.sqlite`
    Places,
    /// Chromium-family `Bookmarks` JSON tree
    ChromiumJson,
}

impl StoreFormat {
    pub fn for_browser(browser: Browser) -> Self {
        match browser {
            Browser::Firefox => StoreFormat::Places,
            Browser::Chrome | Browser::Chromium | Browser::Brave => StoreFormat::ChromiumJson,
        }
    }

    /// Read every bookmark in the store at `path`, in the store's own order
    pub fn read(self, path: &Path, browser: Browser, profile: &str) -> Result<Vec<BookmarkRecord>> {
        match self {
            StoreFormat::Places => places::read(path, browser, profile),
            StoreFormat::ChromiumJson => chromium::read(path, browser, profile),
        }
    }
}

impl Profile {
    pub fn format(&self) -> StoreFormat {
        StoreFormat::for_browser(self.browser)
    }

    /// Parse this profile's bookmark store
    pub fn try_parse(&self) -> Result<Vec<BookmarkRecord>> {
        tracing::debug!(
            "Reading {} bookmarks for profile '{}' from {}",
            self.browser,
            self.name,
            self.store.display()
        );

        let records = self.format().read(&self.store, self.browser, &self.name)?;

        tracing::debug!(
            "Read {} bookmarks from {}/{}",
            records.len(),
            self.browser,
            self.name
        );
        Ok(records)
    }

    /// Parse this profile's bookmark store, turning any failure into a
    /// warning and an empty result
    pub fn parse(&self) -> Vec<BookmarkRecord> {
        match self.try_parse() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Skipping {} profile '{}': {}", self.browser, self.name, e);
                Vec::new()
            }
        }
    }
}
