//! Program Query Language front end.
//!
//! A query goes through three stages: [`tokens`] splits the text, the
//! grammar parser checks syntax and the validator resolves synonyms and
//! argument kinds. Syntax errors are always reported ahead of semantic ones.

use thiserror::Error;
use tracing::debug;

pub mod model;
mod parser;
mod tokens;
mod validate;

pub use model::*;

/// Rejection of a query. The two kinds map to the `SyntaxError` and
/// `SemanticError` answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("semantic error: {0}")]
    Semantic(String),
}

impl QueryError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        QueryError::Syntax(msg.into())
    }

    pub fn semantic(msg: impl Into<String>) -> Self {
        QueryError::Semantic(msg.into())
    }

    /// The single answer a query with this error produces.
    pub fn kind_str(&self) -> &'static str {
        match self {
            QueryError::Syntax(_) => "SyntaxError",
            QueryError::Semantic(_) => "SemanticError",
        }
    }
}

/// Parses and validates a PQL query.
///
/// # Example
/// ```
/// use pql::{parse_query, Relation, ClauseKind};
/// let q = parse_query("stmt s; Select s such that Follows*(1, s)").unwrap();
/// match &q.clauses[0].kind {
///     ClauseKind::SuchThat(st) => assert_eq!(st.relation, Relation::FollowsT),
///     _ => unreachable!(),
/// }
/// assert_eq!(
///     parse_query("stmt s; Select v").unwrap_err().kind_str(),
///     "SemanticError"
/// );
/// ```
pub fn parse_query(query: &str) -> Result<Query, QueryError> {
    let tokens = tokens::tokenize(query)?;
    let parsed = parser::Parser::new(tokens).parse()?;
    let query = validate::validate(parsed)?;
    debug!(
        declarations = query.declarations.len(),
        clauses = query.clauses.len(),
        "Query parsed"
    );
    Ok(query)
}

#[cfg(test)]
mod tests;
