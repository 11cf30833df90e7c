pub mod browsers;
pub mod list;
pub mod pick;
pub mod preview;
pub mod search;

use anyhow::{Result, bail};
use fzbmark_browser::{Profile, ProfileLocator};
use fzbmark_core::{Browser, Catalog, CatalogQuery};
use std::path::PathBuf;

/// What every command needs: where to look and which browsers to read
pub struct Context {
    pub locator: ProfileLocator,
    /// Restrict discovery, search and launching to one browser
    pub browser: Option<Browser>,
}

impl Context {
    pub fn new(home: Option<PathBuf>, browser: Option<Browser>) -> Result<Self> {
        let locator = match home {
            Some(home) => ProfileLocator::new(home),
            None => ProfileLocator::from_home_dir()?,
        };
        tracing::debug!("Looking for browser profiles under {}", locator.home().display());

        Ok(Self { locator, browser })
    }

    /// Browsers to read, in catalog priority order
    pub fn browsers(&self) -> Vec<Browser> {
        match self.browser {
            Some(browser) => vec![browser],
            None => Browser::ALL.to_vec(),
        }
    }

    /// All profiles with a bookmark store.
    ///
    /// Finding none at all is the one fatal discovery outcome.
    pub fn profiles(&self) -> Result<Vec<Profile>> {
        let profiles = self.locator.locate_all(&self.browsers());

        if profiles.is_empty() {
            match self.browser {
                Some(browser) => bail!(
                    "No {} profile with bookmarks found under {}",
                    browser.display_name(),
                    self.locator.home().display()
                ),
                None => bail!(
                    "No supported browser found under {}. Supported browsers: {}",
                    self.locator.home().display(),
                    Browser::ALL
                        .iter()
                        .map(|b| b.display_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }

        Ok(profiles)
    }

    /// Parse every profile and build the catalog
    pub fn catalog(&self) -> Result<Catalog> {
        let profiles = self.profiles()?;
        Ok(Catalog::build(profiles.iter().map(Profile::parse)))
    }

    /// Base query carrying the browser restriction
    pub fn query(&self) -> CatalogQuery {
        match self.browser {
            Some(browser) => CatalogQuery::new().with_browser(browser),
            None => CatalogQuery::new(),
        }
    }
}
