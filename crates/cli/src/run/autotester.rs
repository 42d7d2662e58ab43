//! Reader for autotester query files.
//!
//! Each query is a block of five lines:
//!
//! ```text
//! 1 - follows of the first statement
//! stmt s;
//! Select s such that Follows(1, s)
//! 2
//! 5000
//! ```
//!
//! The declaration and select lines are concatenated into one query, so a
//! whole query may sit on the declaration line with an empty select line.
//! Expected answers are comma separated; an empty line expects no answers.
//! Blank lines between blocks are ignored.

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCase {
    pub id: String,
    pub comment: String,
    pub query: String,
    pub expected: Vec<String>,
    pub timeout_ms: Option<u64>,
}

/// Normalises inner whitespace of one answer, so `1  2` matches `1 2`.
fn normalise_answer(answer: &str) -> String {
    answer.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_header(line: &str) -> (String, String) {
    match line.split_once(" - ") {
        Some((id, comment)) => (id.trim().to_string(), comment.trim().to_string()),
        None => (line.trim().to_string(), String::new()),
    }
}

fn parse_timeout(line: &str, line_no: usize) -> Result<Option<u64>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    line.parse()
        .map(Some)
        .with_context(|| format!("invalid timeout '{line}' on line {line_no}"))
}

pub fn parse_cases(content: &str) -> Result<Vec<QueryCase>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut cases = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }
        if i + 4 >= lines.len() {
            bail!(
                "query block starting on line {} has fewer than five lines",
                i + 1
            );
        }
        let (id, comment) = parse_header(lines[i]);
        let query = format!("{} {}", lines[i + 1].trim(), lines[i + 2].trim())
            .trim()
            .to_string();
        let expected = lines[i + 3]
            .split(',')
            .map(normalise_answer)
            .filter(|a| !a.is_empty())
            .collect();
        let timeout_ms = parse_timeout(lines[i + 4], i + 5)?;
        cases.push(QueryCase {
            id,
            comment,
            query,
            expected,
            timeout_ms,
        });
        i += 5;
    }
    Ok(cases)
}
