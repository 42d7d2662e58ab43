//! Evaluation of single clauses against the knowledge base.

mod pattern;
mod relation;
mod with;

use pkb::ReadFacade;
use pql::{Clause, ClauseKind};
use tracing::trace;

use crate::domain::domain_table;
use crate::table::OutputTable;
use crate::EngineError;

/// Evaluates one clause. A negated clause yields the rows of the cross
/// product of its synonyms' domains that the positive clause rejects.
pub fn evaluate_clause(read: &ReadFacade<'_>, clause: &Clause) -> Result<OutputTable, EngineError> {
    let positive = match &clause.kind {
        ClauseKind::SuchThat(st) => relation::evaluate(read, st)?,
        ClauseKind::Pattern(p) => pattern::evaluate(read, p)?,
        ClauseKind::With(w) => with::evaluate(read, w),
    };
    let table = if clause.negated {
        complement(read, clause, positive)
    } else {
        positive
    };
    trace!(
        negated = clause.negated,
        columns = table.columns().len(),
        rows = table.len(),
        "Clause evaluated"
    );
    Ok(table)
}

fn complement(read: &ReadFacade<'_>, clause: &Clause, positive: OutputTable) -> OutputTable {
    let universe = clause
        .synonyms()
        .into_iter()
        .fold(OutputTable::unit(), |acc, s| acc.join(domain_table(read, s)));
    universe.subtract(&positive)
}
