//! Terminal UI — spinner and one-line transfer outcomes.
//!
//! While a file transfer runs the user sees a spinner and a short label.  The
//! client's own stderr is inherited, so anything it reports shows up as it
//! happens.  When the transfer finishes the spinner is cleared and a single
//! ✓/✗ line is printed; on failure the full error chain follows.
//!
//! Streaming commands (`cat`, `push`) do not use this module: their stdio
//! belongs to the data.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames — same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}

fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}

// ─── Outcome ──────────────────────────────────────────────────────────────────

/// The outcome of a single transfer.
#[derive(Debug)]
pub struct StageOutcome {
    /// Human-readable label, e.g. `"Upload backup/keyring"`.
    pub label: String,
    /// Whether the transfer completed without error.
    pub success: bool,
    /// The error chain, if any, rendered with `{:#}`.
    pub error: Option<String>,
}

impl StageOutcome {
    pub fn ok(label: &str) -> Self {
        Self {
            label: label.to_string(),
            success: true,
            error: None,
        }
    }

    pub fn failed_with(label: &str, error: &anyhow::Error) -> Self {
        Self {
            label: label.to_string(),
            success: false,
            error: Some(format!("{error:#}")),
        }
    }

    /// Print the one-line summary (✓/✗ + label).
    ///
    /// On failure, also prints the error chain to stderr.
    pub fn print(&self) {
        if self.success {
            println!("  {}  {}", icon_ok(), style(&self.label).bold());
        } else {
            println!("  {}  {}", icon_err(), style(&self.label).bold());
            if let Some(ref msg) = self.error {
                eprintln!();
                eprintln!("  {} {}", style("Error:").red().bold(), msg);
            }
        }
    }

    /// Returns `true` if the transfer did not succeed.
    pub const fn failed(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Create and start an indeterminate spinner for `label`.
fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("  {spinner:.cyan}  {msg}") {
        pb.set_style(template.tick_chars(SPINNER_CHARS));
    }
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── Stage runner ─────────────────────────────────────────────────────────────

/// Run `transfer` behind a spinner, returning a [`StageOutcome`].
///
/// The spinner is cleared before the outcome is returned, so the caller can
/// print a clean, static line.
pub fn run_stage<F>(label: &str, transfer: F) -> StageOutcome
where
    F: FnOnce() -> anyhow::Result<()>,
{
    let spinner = make_spinner(label);
    let result = transfer();
    spinner.finish_and_clear();

    match result {
        Ok(()) => StageOutcome::ok(label),
        Err(e) => StageOutcome::failed_with(label, &e),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
