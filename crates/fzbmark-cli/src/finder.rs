//! Driver for an external fuzzy finder (`fzf` or a compatible tool).
//!
//! The feed is written to the finder's stdin, one encoded line each, and the
//! chosen line is read back from its stdout once it exits. The finder is
//! started with:
//!
//! ```text
//! <finder> --delimiter <U+001F> --with-nth 2.. --no-multi
//!          --preview <preview command> --preview-window down:3:wrap
//! ```
//!
//! `--with-nth 2..` hides the index field from the user while keeping it in
//! the line that is printed on selection.
//!
//! The preview command is `'<fzbmark>' --home '<dir>' [--browser <name>]
//! --preview {}`. The finder replaces `{}` with the quoted highlighted line
//! and shows whatever that invocation prints, stderr included, so the
//! preview process runs without logging. It rebuilds the same catalog, so
//! the index in the line points at the same bookmark. On Windows the paths
//! are double-quoted for `cmd.exe` instead.

use fzbmark_core::feed::FIELD_SEPARATOR;
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// fzf: no line matched the query
const EXIT_NO_MATCH: i32 = 1;
/// fzf: interrupted with Esc or Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

/// Result of one finder session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The line the user picked
    Chosen(String),
    /// User dismissed the finder
    Cancelled,
    /// Nothing matched the typed query
    NoMatch,
    /// The finder could not be run; the reason is for the user
    Unavailable(String),
}

pub struct Finder {
    program: String,
}

impl Finder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the finder
    pub fn build_args(&self, preview_command: &str) -> Vec<String> {
        vec![
            "--delimiter".to_string(),
            FIELD_SEPARATOR.to_string(),
            "--with-nth".to_string(),
            "2..".to_string(),
            "--no-multi".to_string(),
            "--preview".to_string(),
            preview_command.to_string(),
            "--preview-window".to_string(),
            "down:3:wrap".to_string(),
        ]
    }

    /// Run the finder over `lines` and wait for the user's choice
    pub fn select(&self, lines: &[String], preview_command: &str) -> Selection {
        let program = match which::which(&self.program) {
            Ok(path) => path,
            Err(_) => {
                return Selection::Unavailable(format!("'{}' is not installed", self.program));
            }
        };

        tracing::debug!("Starting finder {} with {} lines", program.display(), lines.len());

        let mut child = match Command::new(&program)
            .args(self.build_args(preview_command))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return Selection::Unavailable(format!("failed to start '{}': {}", self.program, e));
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = write_lines(&mut stdin, lines) {
                // The finder may exit before reading everything
                if e.kind() != io::ErrorKind::BrokenPipe {
                    tracing::warn!("Failed to feed finder: {}", e);
                }
            }
        }

        match child.wait_with_output() {
            Ok(output) => interpret(output.status.code(), &output.stdout),
            Err(e) => Selection::Unavailable(format!("'{}' failed: {}", self.program, e)),
        }
    }
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    let mut out = io::BufWriter::new(out);
    for line in lines {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Map the finder's exit status and output to a selection
fn interpret(code: Option<i32>, stdout: &[u8]) -> Selection {
    match code {
        Some(0) => {
            let text = String::from_utf8_lossy(stdout);
            match text.lines().next() {
                Some(line) if !line.is_empty() => Selection::Chosen(line.to_string()),
                _ => Selection::NoMatch,
            }
        }
        Some(EXIT_NO_MATCH) => Selection::NoMatch,
        Some(EXIT_INTERRUPTED) => Selection::Cancelled,
        Some(code) => Selection::Unavailable(format!("finder exited with code {}", code)),
        None => Selection::Unavailable("finder was terminated by a signal".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_exit_codes() {
        assert_eq!(
            interpret(Some(0), "3\u{1f}Docs — https://a.com\n".as_bytes()),
            Selection::Chosen("3\u{1f}Docs — https://a.com".to_string())
        );
        assert_eq!(interpret(Some(0), b""), Selection::NoMatch);
        assert_eq!(interpret(Some(1), b""), Selection::NoMatch);
        assert_eq!(interpret(Some(130), b""), Selection::Cancelled);
        assert!(matches!(interpret(Some(2), b""), Selection::Unavailable(_)));
        assert!(matches!(interpret(None, b""), Selection::Unavailable(_)));
    }

    #[test]
    fn test_build_args_hides_index_field() {
        let finder = Finder::new("fzf");
        let args = finder.build_args("fzbmark --preview {}");

        let delimiter = args.iter().position(|a| a == "--delimiter").unwrap();
        assert_eq!(args[delimiter + 1], "\u{1f}");
        let with_nth = args.iter().position(|a| a == "--with-nth").unwrap();
        assert_eq!(args[with_nth + 1], "2..");
        let preview = args.iter().position(|a| a == "--preview").unwrap();
        assert_eq!(args[preview + 1], "fzbmark --preview {}");
    }

    #[test]
    fn test_missing_finder_is_unavailable() {
        let finder = Finder::new("/nonexistent/fzf");
        let selection = finder.select(&["0\u{1f}A — https://a.com".to_string()], "true");
        assert!(matches!(selection, Selection::Unavailable(reason) if reason.contains("not installed")));
    }

    #[test]
    fn test_write_lines_terminates_each_line() {
        let mut out = Vec::new();
        write_lines(&mut out, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(out, b"a\nb\n");
    }
}
