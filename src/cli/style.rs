//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Cross used for failures
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize: Display {
    /// Bold
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    /// Names and values the user will look for
    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.to_string().dimmed().to_string()
    }

    /// Success
    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    /// Warning
    fn warn(&self) -> String {
        self.to_string().yellow().to_string()
    }

    /// Fatal failure
    fn failure(&self) -> String {
        self.to_string().red().bold().to_string()
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.failure()
}

/// Dimmed arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner used for long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
}

/// Render `url` as a terminal hyperlink when the terminal supports it
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        url.to_string()
    }
}
