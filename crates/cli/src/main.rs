//! Entry point for the command-line interface.
//! Loads the configuration, installs logging and delegates to the
//! subcommand modules.

use spa::args::{parse_cli, Commands};
use spa::cfg::export_cfg;
use spa::config::load_config;
use spa::facts::show_facts;
use spa::init_logging;
use spa::query::run_queries;
use spa::run::run_batch;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.debug, cli.quiet, &config.logging.level);
    match cli.command {
        Commands::Query(args) => run_queries(args, &config),
        Commands::Run(args) => run_batch(args, &config),
        Commands::Facts(args) => show_facts(args, &config),
        Commands::Cfg(args) => export_cfg(args),
    }
}
