use crate::{Error, Result};
use fzbmark_core::{BookmarkRecord, Browser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A fully resolved command for opening one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Wait for the process and treat a non-zero exit as failure.
    /// Browsers started directly are left running detached instead.
    pub wait: bool,
}

/// Opens bookmark URLs with the OS opener, a specific browser, or a
/// user-configured command
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    opener: Option<String>,
    browser: Option<Browser>,
    #[cfg_attr(target_os = "macos", allow(dead_code))]
    search_path: Option<OsString>,
}

impl Launcher {
    /// `opener` takes precedence over `browser`; with neither, the OS
    /// default handler is used
    pub fn new(opener: Option<String>, browser: Option<Browser>) -> Self {
        Self {
            opener,
            browser,
            search_path: None,
        }
    }

    /// Open the record's URL
    pub fn open(&self, record: &BookmarkRecord) -> Result<()> {
        let command = self.build_command(record.url())?;
        let program = command.program.display().to_string();

        tracing::debug!("Launching {} {:?}", program, command.args);

        let mut process = Command::new(&command.program);
        process.args(&command.args);

        if command.wait {
            let status = process
                .status()
                .map_err(|e| Error::Launcher(format!("Failed to run {}: {}", program, e)))?;
            if !status.success() {
                return Err(Error::Launcher(format!(
                    "{} exited with {}",
                    program,
                    status
                        .code()
                        .map_or_else(|| "a signal".to_string(), |c| format!("code {}", c))
                )));
            }
        } else {
            process
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| Error::Launcher(format!("Failed to launch {}: {}", program, e)))?;
        }

        Ok(())
    }

    /// Build the command that would open `url`.
    ///
    /// A configured opener is split on whitespace; quotes are not
    /// interpreted.
    pub fn build_command(&self, url: &str) -> Result<LaunchCommand> {
        if let Some(opener) = &self.opener {
            let mut parts = opener.split_whitespace();
            let program = parts
                .next()
                .ok_or_else(|| Error::Launcher("opener command is empty".to_string()))?;
            let mut args: Vec<String> = parts.map(str::to_string).collect();
            args.push(url.to_string());

            return Ok(LaunchCommand {
                program: PathBuf::from(program),
                args,
                wait: true,
            });
        }

        match self.browser {
            Some(browser) => self.browser_command(browser, url),
            None => Ok(Self::default_command(url)),
        }
    }

    #[cfg(target_os = "macos")]
    fn browser_command(&self, browser: Browser, url: &str) -> Result<LaunchCommand> {
        let app = match browser {
            Browser::Firefox => "Firefox",
            Browser::Chrome => "Google Chrome",
            Browser::Chromium => "Chromium",
            Browser::Brave => "Brave Browser",
        };
        Ok(LaunchCommand {
            program: PathBuf::from("open"),
            args: vec!["-a".to_string(), app.to_string(), url.to_string()],
            wait: true,
        })
    }

    #[cfg(not(target_os = "macos"))]
    fn browser_command(&self, browser: Browser, url: &str) -> Result<LaunchCommand> {
        let candidates = Self::executable_candidates(browser);

        let program = candidates
            .iter()
            .find_map(|name| self.find_executable(name))
            .ok_or_else(|| {
                Error::Launcher(format!(
                    "No executable found for {} (tried: {})",
                    browser.display_name(),
                    candidates.join(", ")
                ))
            })?;

        Ok(LaunchCommand {
            program,
            args: vec![url.to_string()],
            wait: false,
        })
    }

    #[cfg(not(target_os = "macos"))]
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => which::which_in(name, Some(paths), std::env::temp_dir()).ok(),
            None => which::which(name).ok(),
        }
    }

    /// Executable names to try for each browser, most common first
    #[cfg(not(target_os = "macos"))]
    fn executable_candidates(browser: Browser) -> &'static [&'static str] {
        match browser {
            Browser::Firefox => &["firefox"],
            Browser::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            Browser::Chromium => &["chromium", "chromium-browser"],
            Browser::Brave => &["brave-browser", "brave"],
        }
    }

    /// The platform's default URL handler
    fn default_command(url: &str) -> LaunchCommand {
        #[cfg(target_os = "macos")]
        return LaunchCommand {
            program: PathBuf::from("open"),
            args: vec![url.to_string()],
            wait: true,
        };

        #[cfg(target_os = "windows")]
        return LaunchCommand {
            program: PathBuf::from("rundll32"),
            args: vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
            wait: true,
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return LaunchCommand {
            program: PathBuf::from("xdg-open"),
            args: vec![url.to_string()],
            wait: true,
        };
    }
}
