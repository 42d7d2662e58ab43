//! Terminal helpers: the banner, colour detection and status lines.

use colored::Colorize;
use std::env;
use std::io::{self, IsTerminal};

pub fn print_header() {
    let version = env!("CARGO_PKG_VERSION");
    // Avoid panics when the version exceeds the expected width
    let spaces = " ".repeat(24usize.saturating_sub(version.len()));
    eprintln!(
        r#"
    ╭──────────────────────────────────────╮
    │                                      │
    │     SPA  SIMPLE  PROGRAM  ANALYZER   │
    │                                      │
    │     Design abstractions and PQL      │
    │     Version: {version}{spaces}│
    │                                      │
    ╰──────────────────────────────────────╯
"#
    );
}

/// Whether coloured output is appropriate for the current environment.
pub fn use_colored_output() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }
    if env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok() {
        return false;
    }
    io::stdout().is_terminal()
}

/// Prints a tagged status line on stderr.
pub fn print_status(tag: &str, message: &str, color: bool) {
    if color {
        eprintln!("[{}] {}", tag.bright_blue().bold(), message);
    } else {
        eprintln!("[{}] {}", tag, message);
    }
}

pub fn print_error(tag: &str, message: &str, color: bool) {
    if color {
        eprintln!("[{}] {}", tag.bright_red().bold(), message);
    } else {
        eprintln!("[{}] {}", tag, message);
    }
}
