//! Query evaluation over the program knowledge base.
//!
//! Clauses are evaluated into [`OutputTable`]s and combined with natural
//! joins. The optimiser groups clauses by shared synonyms so independent
//! groups can run in parallel and an empty group ends evaluation early.

use pkb::Pkb;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod clause;
pub mod domain;
mod evaluator;
pub mod optimiser;
pub mod table;

pub use clause::evaluate_clause;
pub use evaluator::{answer_order, QueryEvaluator};
pub use table::{Entity, OutputTable, Row};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{relation} does not accept {argument} as an argument")]
    UnsupportedArgument { relation: String, argument: String },
}

/// Evaluation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deduplicate, group and reorder clauses before evaluation.
    pub optimise: bool,
    /// Evaluate independent clause groups on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            optimise: true,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineMetrics {
    pub groups: usize,
    pub clauses: usize,
    /// Largest intermediate table produced by a clause group.
    pub max_rows: usize,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Distinct answers in display order.
    pub answers: Vec<String>,
    pub metrics: EngineMetrics,
}

/// Parses and evaluates `query`, answering invalid queries with a single
/// `SyntaxError` or `SemanticError` entry.
///
/// # Example
/// ```
/// let parsed = parsers::parse_program("procedure P { x = 1; y = x + 1; }").unwrap();
/// let pkb = pkb::Pkb::from_program(&parsed);
/// assert_eq!(engine::answer(&pkb, "stmt s1, s2; Select s1 such that Follows(s1, s2)"), ["1"]);
/// assert_eq!(engine::answer(&pkb, "stmt s; Select s such"), ["SyntaxError"]);
/// ```
pub fn answer(pkb: &Pkb, query: &str) -> Vec<String> {
    answer_with_config(pkb, query, EngineConfig::default())
}

pub fn answer_with_config(pkb: &Pkb, query: &str, config: EngineConfig) -> Vec<String> {
    let parsed = match pql::parse_query(query) {
        Ok(q) => q,
        Err(e) => return vec![e.kind_str().to_string()],
    };
    match QueryEvaluator::with_config(pkb.reader(), config).evaluate(&parsed) {
        Ok(result) => result.answers,
        Err(e) => {
            warn!(error = %e, "Query rejected during evaluation");
            vec!["SemanticError".to_string()]
        }
    }
}

#[cfg(test)]
mod tests;
