use crate::{Error, Result};
use fzbmark_core::Browser;
use std::fs;
use std::path::{Path, PathBuf};

const FIREFOX_REGISTRY: &str = "profiles.ini";
const FIREFOX_STORE: &str = "places.sqlite";
const CHROMIUM_STORE: &str = "Bookmarks";

/// One browser profile with a bookmark store on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub browser: Browser,
    /// Profile identifier (registry name or directory name)
    pub name: String,
    /// Path to the bookmark store file
    pub store: PathBuf,
}

/// Finds bookmark stores for each browser family under a home directory.
///
/// Only stats, lists directories and reads the Firefox profile registry;
/// nothing is ever written.
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    home: PathBuf,
}

impl ProfileLocator {
    /// Locator rooted at an explicit home directory
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Locator rooted at the current user's home directory
    pub fn from_home_dir() -> Result<Self> {
        dirs::home_dir().map(Self::new).ok_or(Error::HomeNotFound)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// OS-conventional root directories for a browser, in lookup order
    pub fn store_roots(&self, browser: Browser) -> Vec<PathBuf> {
        Self::default_roots(browser)
            .into_iter()
            .map(|relative| self.home.join(relative))
            .collect()
    }

    /// Profiles for one browser; an absent browser yields no profiles
    pub fn locate(&self, browser: Browser) -> Vec<Profile> {
        match self.try_locate(browser) {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::debug!("{}", e);
                Vec::new()
            }
        }
    }

    /// Profiles for several browsers, concatenated in the given order
    pub fn locate_all(&self, browsers: &[Browser]) -> Vec<Profile> {
        browsers
            .iter()
            .flat_map(|&browser| self.locate(browser))
            .collect()
    }

    /// Like [`locate`](Self::locate) but reports a missing installation as
    /// [`Error::BrowserNotFound`]
    pub fn try_locate(&self, browser: Browser) -> Result<Vec<Profile>> {
        let roots: Vec<PathBuf> = self
            .store_roots(browser)
            .into_iter()
            .filter(|root| root.is_dir())
            .collect();

        if roots.is_empty() {
            return Err(Error::BrowserNotFound {
                browser,
                searched: self
                    .store_roots(browser)
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let mut profiles = Vec::new();
        for root in roots {
            let found = match browser {
                Browser::Firefox => firefox_profiles(&root)?,
                Browser::Chrome | Browser::Chromium | Browser::Brave => {
                    chromium_profiles(browser, &root)?
                }
            };
            tracing::debug!(
                "Found {} {} profile(s) in {}",
                found.len(),
                browser,
                root.display()
            );
            profiles.extend(found);
        }

        Ok(profiles)
    }

    /// Get platform-specific root directories, relative to the home directory
    fn default_roots(browser: Browser) -> Vec<PathBuf> {
        #[cfg(target_os = "macos")]
        return match browser {
            Browser::Firefox => vec![rel(&["Library", "Application Support", "Firefox"])],
            Browser::Chrome => vec![rel(&["Library", "Application Support", "Google", "Chrome"])],
            Browser::Chromium => vec![rel(&["Library", "Application Support", "Chromium"])],
            Browser::Brave => vec![rel(&[
                "Library",
                "Application Support",
                "BraveSoftware",
                "Brave-Browser",
            ])],
        };

        #[cfg(target_os = "windows")]
        return match browser {
            Browser::Firefox => vec![rel(&["AppData", "Roaming", "Mozilla", "Firefox"])],
            Browser::Chrome => vec![rel(&["AppData", "Local", "Google", "Chrome", "User Data"])],
            Browser::Chromium => vec![rel(&["AppData", "Local", "Chromium", "User Data"])],
            Browser::Brave => vec![rel(&[
                "AppData",
                "Local",
                "BraveSoftware",
                "Brave-Browser",
                "User Data",
            ])],
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return match browser {
            Browser::Firefox => vec![
                rel(&[".mozilla", "firefox"]),
                rel(&["snap", "firefox", "common", ".mozilla", "firefox"]),
                rel(&[".var", "app", "org.mozilla.firefox", ".mozilla", "firefox"]),
            ],
            Browser::Chrome => vec![rel(&[".config", "google-chrome"])],
            Browser::Chromium => vec![rel(&[".config", "chromium"])],
            Browser::Brave => vec![rel(&[".config", "BraveSoftware", "Brave-Browser"])],
        };
    }
}

fn rel(parts: &[&str]) -> PathBuf {
    parts.iter().collect()
}

/// Firefox profiles, in registry order when `profiles.ini` is usable
fn firefox_profiles(root: &Path) -> Result<Vec<Profile>> {
    let registry = root.join(FIREFOX_REGISTRY);

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    if registry.is_file() {
        match fs::read_to_string(&registry) {
            Ok(content) => {
                for entry in parse_registry(&content) {
                    let dir = if entry.is_relative {
                        root.join(&entry.path)
                    } else {
                        PathBuf::from(&entry.path)
                    };
                    let name = entry.name.unwrap_or_else(|| dir_name(&dir));
                    candidates.push((name, dir));
                }
            }
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", registry.display(), e);
            }
        }
    }

    if candidates.is_empty() {
        for dir in scan_profile_dirs(root, FIREFOX_STORE)?
            .into_iter()
            .chain(scan_profile_dirs(&root.join("Profiles"), FIREFOX_STORE)?)
        {
            candidates.push((dir_name(&dir), dir));
        }
    }

    Ok(candidates
        .into_iter()
        .filter_map(|(name, dir)| {
            let store = dir.join(FIREFOX_STORE);
            // Firefox leaves zero-byte placeholders behind in unused profiles
            match fs::metadata(&store) {
                Ok(meta) if meta.is_file() && meta.len() > 0 => Some(Profile {
                    browser: Browser::Firefox,
                    name,
                    store,
                }),
                _ => None,
            }
        })
        .collect())
}

/// Chromium-family profiles, sorted by directory name
fn chromium_profiles(browser: Browser, root: &Path) -> Result<Vec<Profile>> {
    Ok(scan_profile_dirs(root, CHROMIUM_STORE)?
        .into_iter()
        .map(|dir| Profile {
            browser,
            name: dir_name(&dir),
            store: dir.join(CHROMIUM_STORE),
        })
        .collect())
}

/// Direct subdirectories of `root` holding a `marker` file, sorted lexically
fn scan_profile_dirs(root: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && path.join(marker).is_file() {
            dirs.push(path);
        }
    }

    // read_dir order is platform dependent
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string())
}

/// A `[ProfileN]` section of Firefox's `profiles.ini`
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistryEntry {
    name: Option<String>,
    path: String,
    is_relative: bool,
}

#[derive(Default)]
struct PendingEntry {
    name: Option<String>,
    path: Option<String>,
    is_relative: Option<bool>,
}

impl PendingEntry {
    fn finish(self) -> Option<RegistryEntry> {
        Some(RegistryEntry {
            name: self.name,
            path: self.path?,
            is_relative: self.is_relative.unwrap_or(true),
        })
    }
}

/// Parse the profile sections of `profiles.ini`, keeping file order
fn parse_registry(content: &str) -> Vec<RegistryEntry> {
    let mut entries = Vec::new();
    let mut current: Option<PendingEntry> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            entries.extend(current.take().and_then(PendingEntry::finish));
            if is_profile_section(section) {
                current = Some(PendingEntry::default());
            }
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            match key.trim() {
                "Name" => pending.name = Some(value.to_string()),
                "Path" => pending.path = Some(value.to_string()),
                "IsRelative" => pending.is_relative = Some(value != "0"),
                _ => {}
            }
        }
    }

    entries.extend(current.and_then(PendingEntry::finish));
    entries
}

fn is_profile_section(section: &str) -> bool {
    section
        .strip_prefix("Profile")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}
