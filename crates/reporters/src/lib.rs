//! Formatters for query answers, autotester batch results and knowledge
//! base statistics, in text and JSON.

use pkb::PkbStats;
use serde::Serialize;
use std::io::{self, Write};

mod batch;

pub use batch::{print_batch, BatchSummary, QueryOutcome};

/// Wraps `text` in an ANSI colour when `color` is set.
fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{code}{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn green(text: &str, color: bool) -> String {
    paint(text, "\x1b[32m", color)
}

fn red(text: &str, color: bool) -> String {
    paint(text, "\x1b[31m", color)
}

/// Simple box around a title.
fn simple_box(title: &str) -> String {
    let width = title.chars().count() + 2;
    format!(
        "╭{}╮\n│ {} │\n╰{}╯\n",
        "─".repeat(width),
        title,
        "─".repeat(width)
    )
}

const RULE: &str =
    "    ──────────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Supported output formats.
pub enum Format {
    /// Human-readable output in plain text.
    Text,
    /// JSON structure for integrations.
    Json,
}

#[derive(Serialize)]
struct AnswersOut<'a> {
    query: &'a str,
    answers: &'a [String],
    total: usize,
}

/// Prints the answers of one query.
///
/// # Example
/// ```
/// use reporters::{print_answers, Format};
/// print_answers("stmt s; Select s", &["1".into(), "2".into()], Format::Text).unwrap();
/// ```
pub fn print_answers(query: &str, answers: &[String], fmt: Format) -> io::Result<()> {
    let mut out = io::stdout();
    write_answers(&mut out, query, answers, fmt)
}

/// Writes answers to a generic `Write`, used for tests.
pub(crate) fn write_answers<W: Write>(
    out: &mut W,
    query: &str,
    answers: &[String],
    fmt: Format,
) -> io::Result<()> {
    match fmt {
        Format::Text => {
            if answers.is_empty() {
                writeln!(out, "none")?;
            } else {
                writeln!(out, "{}", answers.join(", "))?;
            }
        }
        Format::Json => {
            let json = AnswersOut {
                query,
                answers,
                total: answers.len(),
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Prints fact counts of a knowledge base.
pub fn print_facts(source: &str, stats: &PkbStats, fmt: Format) -> io::Result<()> {
    let mut out = io::stdout();
    write_facts(&mut out, source, stats, fmt)
}

#[derive(Serialize)]
struct FactsOut<'a> {
    source: &'a str,
    facts: &'a PkbStats,
}

pub(crate) fn write_facts<W: Write>(
    out: &mut W,
    source: &str,
    stats: &PkbStats,
    fmt: Format,
) -> io::Result<()> {
    match fmt {
        Format::Text => {
            writeln!(out, "{}", simple_box("Program Knowledge Base"))?;
            writeln!(out, "    Source: {source}\n")?;
            writeln!(out, "    Fact                      Count")?;
            writeln!(out, "{RULE}")?;
            for (name, count) in stats.entries() {
                writeln!(out, "    {name:<25} {count}")?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &FactsOut { source, facts: stats })?;
            writeln!(out)?;
        }
    }
    Ok(())
}
