use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::args::QueryArgs;
use crate::config::Config;
use crate::load_program;

/// Evaluates each query on the command line and prints its answers.
pub fn run_queries(args: QueryArgs, config: &Config) -> Result<()> {
    let (_, pkb) = load_program(&args.source)?;
    let fmt = args.format.unwrap_or(config.output.format);
    for query in &args.queries {
        let start = Instant::now();
        let answers = engine::answer_with_config(&pkb, query, config.engine);
        info!(
            answers = answers.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query evaluated"
        );
        reporters::print_answers(query, &answers, fmt.into())?;
    }
    Ok(())
}
