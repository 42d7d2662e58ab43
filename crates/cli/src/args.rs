use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::{CfgFormat, Format};

fn parse_query_text(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("query must not be empty".into())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "SIMPLE program analyzer: extracts design abstractions and answers PQL queries",
    long_about = "spa parses a SIMPLE source program, extracts its design abstractions \
(Follows, Parent, Uses, Modifies, Calls, Next, Affects and their transitive closures) \
into a program knowledge base and answers Program Query Language (PQL) queries over it.

Examples:
  spa query prog.txt 'stmt s; Select s such that Follows*(1, s)'
  spa run prog.txt queries.txt --fail-on-mismatch
  spa facts prog.txt --format json
  spa cfg prog.txt --format dot --procedure main",
    subcommand_required = true
)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
    /// Suppress log output
    #[arg(long, global = true)]
    pub quiet: bool,
    /// Path to a configuration file (defaults to <config_dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one or more PQL queries against a SIMPLE program
    #[command(alias = "q")]
    Query(QueryArgs),
    /// Run an autotester query file and compare answers with expectations
    Run(RunArgs),
    /// Show knowledge base statistics for a SIMPLE program
    Facts(FactsArgs),
    /// Export the control flow graphs of a SIMPLE program
    Cfg(CfgArgs),
}

#[derive(ClapArgs)]
pub struct QueryArgs {
    /// SIMPLE source file
    pub source: PathBuf,
    /// PQL queries to evaluate
    #[arg(required = true, value_parser = parse_query_text)]
    pub queries: Vec<String>,
    /// Output format for answers
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

#[derive(ClapArgs)]
pub struct RunArgs {
    /// SIMPLE source file
    pub source: PathBuf,
    /// Autotester query file
    pub queries: PathBuf,
    /// Output format for results
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Exit with error code if any query answer differs from its expectation
    #[arg(long = "fail-on-mismatch")]
    pub fail_on_mismatch: bool,
}

#[derive(ClapArgs)]
pub struct FactsArgs {
    /// SIMPLE source file
    pub source: PathBuf,
    /// Output format for statistics
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

#[derive(ClapArgs)]
pub struct CfgArgs {
    /// SIMPLE source file
    pub source: PathBuf,
    /// Graph export format
    #[arg(long, value_enum, default_value_t = CfgFormat::Dot)]
    pub format: CfgFormat,
    /// Only export the graph of this procedure
    #[arg(long)]
    pub procedure: Option<String>,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
