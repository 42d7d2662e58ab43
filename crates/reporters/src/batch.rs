use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::{green, red, simple_box, Format, RULE};

/// Result of one autotester query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub id: String,
    pub comment: String,
    pub query: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl QueryOutcome {
    /// Answers match as sets.
    pub fn passed(&self) -> bool {
        let expected: BTreeSet<&str> = self.expected.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = self.actual.iter().map(String::as_str).collect();
        expected == actual
    }

    pub fn timed_out(&self) -> bool {
        self.timeout_ms.is_some_and(|t| self.elapsed_ms > t)
    }

    fn missing(&self) -> Vec<&str> {
        self.expected
            .iter()
            .filter(|e| !self.actual.contains(e))
            .map(String::as_str)
            .collect()
    }

    fn unexpected(&self) -> Vec<&str> {
        self.actual
            .iter()
            .filter(|a| !self.expected.contains(a))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub duration_ms: u64,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[QueryOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        BatchSummary {
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
            timed_out: outcomes.iter().filter(|o| o.timed_out()).count(),
            duration_ms: outcomes.iter().map(|o| o.elapsed_ms).sum(),
        }
    }
}

#[derive(Serialize)]
struct BatchOut<'a> {
    source: &'a str,
    queries: Vec<OutcomeOut<'a>>,
    summary: BatchSummary,
}

#[derive(Serialize)]
struct OutcomeOut<'a> {
    #[serde(flatten)]
    outcome: &'a QueryOutcome,
    passed: bool,
}

/// Prints per-query results of an autotester run and its summary.
pub fn print_batch(
    source: &str,
    outcomes: &[QueryOutcome],
    fmt: Format,
    color: bool,
) -> io::Result<BatchSummary> {
    let mut out = io::stdout();
    write_batch(&mut out, source, outcomes, fmt, color)
}

pub(crate) fn write_batch<W: Write>(
    out: &mut W,
    source: &str,
    outcomes: &[QueryOutcome],
    fmt: Format,
    color: bool,
) -> io::Result<BatchSummary> {
    let summary = BatchSummary::from_outcomes(outcomes);
    match fmt {
        Format::Text => {
            writeln!(out, "{}", simple_box("Query Results"))?;
            for o in outcomes {
                let mark = if o.passed() {
                    green("✔", color)
                } else {
                    red("✘", color)
                };
                writeln!(out, "{mark} {} - {} ({}ms)", o.id, o.comment, o.elapsed_ms)?;
                if !o.passed() {
                    writeln!(out, "    {}", o.query)?;
                    let missing = o.missing();
                    if !missing.is_empty() {
                        writeln!(out, "    • Missing: {}", missing.join(", "))?;
                    }
                    let unexpected = o.unexpected();
                    if !unexpected.is_empty() {
                        writeln!(out, "    • Unexpected: {}", unexpected.join(", "))?;
                    }
                }
                if o.timed_out() {
                    writeln!(out, "    • Exceeded timeout of {}ms", o.timeout_ms.unwrap_or(0))?;
                }
            }
            writeln!(out)?;
            writeln!(out, "    SUMMARY")?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "    Source                    {source}")?;
            writeln!(out, "    Queries                   {}", summary.total)?;
            writeln!(
                out,
                "    Passed                    {}",
                green(&summary.passed.to_string(), color)
            )?;
            let failed = summary.failed.to_string();
            let failed = if summary.failed > 0 {
                red(&failed, color)
            } else {
                failed
            };
            writeln!(out, "    Failed                    {failed}")?;
            writeln!(out, "    Timed out                 {}", summary.timed_out)?;
            writeln!(out, "    Duration                  {}ms", summary.duration_ms)?;
        }
        Format::Json => {
            let json = BatchOut {
                source,
                queries: outcomes
                    .iter()
                    .map(|o| OutcomeOut {
                        outcome: o,
                        passed: o.passed(),
                    })
                    .collect(),
                summary,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    Ok(summary)
}
