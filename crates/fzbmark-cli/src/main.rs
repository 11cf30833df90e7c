use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser};
use clap_complete::{Shell, generate};
use fzbmark_cli::commands::{self, Context};
use fzbmark_cli::{BrowserArg, OutputFormat, Outcome};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fzbmark")]
#[command(author, version)]
#[command(
    about = "Fuzzy-search and open your browser bookmarks",
    long_about = "fzbmark reads the bookmarks of every Firefox, Chrome, Chromium and Brave \
                  profile it can find, lets you pick one in fzf, and opens it.\n\n\
                  Without a mode flag the interactive finder is started. If the finder is \
                  not installed, a numbered list is printed instead."
)]
#[command(group(
    ArgGroup::new("mode").args(["list_browsers", "list", "search", "preview", "completions"])
))]
struct Cli {
    /// List detected browser profiles
    #[arg(long)]
    list_browsers: bool,

    /// Print all bookmarks
    #[arg(long)]
    list: bool,

    /// Print bookmarks whose title or URL contains TERM (case-insensitive)
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Only use bookmarks from this browser, and open URLs with it
    #[arg(short, long, value_enum)]
    browser: Option<BrowserArg>,

    /// Output format for --list and --search
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Look for browser profiles under DIR instead of the home directory
    #[arg(long, value_name = "DIR", env = "FZBMARK_HOME")]
    home: Option<PathBuf>,

    /// Fuzzy finder to run (must accept fzf's options)
    #[arg(long, value_name = "PROGRAM", env = "FZBMARK_FINDER", default_value = "fzf")]
    finder: String,

    /// Command used to open URLs; the URL is appended as the last argument
    ///
    /// The command is split on whitespace and quotes are not interpreted.
    /// For arguments containing spaces, point this at a wrapper script.
    #[arg(long, value_name = "CMD", env = "FZBMARK_OPENER")]
    opener: Option<String>,

    /// Print preview text for a finder line (called by the finder)
    #[arg(long, value_name = "LINE", hide = true)]
    preview: Option<String>,

    /// Generate a shell completion script
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The finder shows the preview's stderr in the pane, so keep it quiet
    init_logging(cli.verbose, cli.preview.is_some());

    match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(Outcome::Success);
    }

    let ctx = Context::new(cli.home, cli.browser.map(Into::into))?;

    if cli.list_browsers {
        return commands::browsers::execute(&ctx);
    }
    if let Some(line) = cli.preview {
        return commands::preview::execute(&ctx, &line);
    }
    if cli.list {
        return commands::list::execute(&ctx, cli.format);
    }
    if let Some(term) = cli.search {
        return commands::search::execute(&ctx, &term, cli.format);
    }

    commands::pick::execute(&ctx, &cli.finder, cli.opener)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fzbmark=debug,fzbmark_cli=debug,fzbmark_core=debug,fzbmark_browser=debug")
        } else {
            EnvFilter::new("fzbmark=warn,fzbmark_cli=warn,fzbmark_core=warn,fzbmark_browser=warn")
        }
    });

    // stdout carries bookmark output and the finder's selection
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .init();
}
