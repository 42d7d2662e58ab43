use anyhow::Result;
use tracing::debug;

use crate::args::FactsArgs;
use crate::config::Config;
use crate::load_program;

pub fn show_facts(args: FactsArgs, config: &Config) -> Result<()> {
    let (_, pkb) = load_program(&args.source)?;
    let stats = pkb.stats();
    debug!(statements = stats.statements, "Collected knowledge base statistics");
    let fmt = args.format.unwrap_or(config.output.format);
    reporters::print_facts(&args.source.display().to_string(), &stats, fmt.into())?;
    Ok(())
}
