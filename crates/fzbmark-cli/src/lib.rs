use clap::ValueEnum;
use fzbmark_core::Browser;
use std::process::ExitCode;

pub mod commands;
pub mod finder;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Command-line spelling of [`Browser`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum BrowserArg {
    Firefox,
    #[value(alias = "google-chrome")]
    Chrome,
    Chromium,
    Brave,
}

impl From<BrowserArg> for Browser {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Firefox => Browser::Firefox,
            BrowserArg::Chrome => Browser::Chrome,
            BrowserArg::Chromium => Browser::Chromium,
            BrowserArg::Brave => Browser::Brave,
        }
    }
}

/// How a command finished, mapped onto the process exit status
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Exit 0: work done, or the user cancelled the finder
    Success,
    /// Exit 1: nothing matched or nothing was selected
    NoResults,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NoResults => ExitCode::from(1),
        }
    }
}
