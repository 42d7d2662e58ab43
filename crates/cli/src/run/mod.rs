use anyhow::{Context, Result};
use reporters::QueryOutcome;
use std::fs;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::args::RunArgs;
use crate::config::Config;
use crate::output::Format;
use crate::{load_program, ui};

pub mod autotester;

pub use autotester::{parse_cases, QueryCase};

/// Runs every query of an autotester file against the program and reports
/// which answers match their expectations.
pub fn run_batch(args: RunArgs, config: &Config) -> Result<()> {
    let fmt = args.format.unwrap_or(config.output.format);
    let color = config.output.color && ui::use_colored_output();
    if fmt == Format::Text {
        ui::print_header();
    }

    let (_, pkb) = load_program(&args.source)?;
    let content = fs::read_to_string(&args.queries)
        .with_context(|| format!("failed to read {}", args.queries.display()))?;
    let cases = parse_cases(&content)
        .with_context(|| format!("failed to parse {}", args.queries.display()))?;
    info!(queries = cases.len(), file = %args.queries.display(), "Queries loaded");

    let outcomes: Vec<QueryOutcome> = cases
        .into_iter()
        .map(|case| {
            let start = Instant::now();
            let actual = engine::answer_with_config(&pkb, &case.query, config.engine);
            let elapsed_ms = start.elapsed().as_millis() as u64;
            debug!(id = %case.id, answers = actual.len(), elapsed_ms, "Query evaluated");
            QueryOutcome {
                id: case.id,
                comment: case.comment,
                query: case.query,
                expected: case.expected,
                actual,
                elapsed_ms,
                timeout_ms: case.timeout_ms,
            }
        })
        .collect();

    let source = args.source.display().to_string();
    let summary = reporters::print_batch(&source, &outcomes, fmt.into(), color)?;
    if summary.timed_out > 0 {
        warn!(count = summary.timed_out, "Queries exceeded their timeout");
    }
    info!(
        passed = summary.passed,
        failed = summary.failed,
        duration_ms = summary.duration_ms,
        "Run completed"
    );

    if summary.failed > 0 {
        ui::print_error(
            "FAIL",
            &format!("{} of {} queries failed", summary.failed, summary.total),
            color,
        );
        if args.fail_on_mismatch {
            std::process::exit(1);
        }
    } else {
        ui::print_status(
            "PASS",
            &format!("all {} queries passed", summary.total),
            color,
        );
    }
    Ok(())
}
