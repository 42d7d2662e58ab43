use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Instant;

use pkb::ReadFacade;
use pql::{Element, Query, Selection, Synonym};
use rayon::prelude::*;
use tracing::debug;

use crate::clause::evaluate_clause;
use crate::domain::{attr_value, domain_table};
use crate::optimiser::{has_opposite_pair, plan, unplanned, ClauseGroup};
use crate::table::{OutputTable, Row};
use crate::{EngineConfig, EngineError, EngineMetrics, QueryResult};

/// Evaluates validated queries against a finalized knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    read: ReadFacade<'a>,
    config: EngineConfig,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(read: ReadFacade<'a>) -> Self {
        Self::with_config(read, EngineConfig::default())
    }

    pub fn with_config(read: ReadFacade<'a>, config: EngineConfig) -> Self {
        Self { read, config }
    }

    pub fn evaluate(&self, query: &Query) -> Result<QueryResult, EngineError> {
        let start = Instant::now();
        if self.config.optimise && has_opposite_pair(query) {
            debug!("Query contains a clause and its negation");
            let answers = match query.selection {
                Selection::Boolean => vec!["FALSE".to_string()],
                Selection::Tuple(_) => Vec::new(),
            };
            let metrics = EngineMetrics {
                elapsed_ms: start.elapsed().as_millis(),
                ..EngineMetrics::default()
            };
            return Ok(QueryResult { answers, metrics });
        }
        let groups = if self.config.optimise {
            plan(query)
        } else {
            unplanned(query)
        };
        let mut metrics = EngineMetrics {
            groups: groups.len(),
            clauses: groups.iter().map(|g| g.clauses.len()).sum(),
            ..EngineMetrics::default()
        };

        let tables: Vec<OutputTable> = if self.config.parallel && groups.len() > 1 {
            groups
                .par_iter()
                .map(|g| self.evaluate_group(g))
                .collect::<Result<_, _>>()?
        } else {
            let mut tables = Vec::with_capacity(groups.len());
            for g in &groups {
                let table = self.evaluate_group(g)?;
                let empty = table.is_empty();
                tables.push(table);
                if empty {
                    break;
                }
            }
            tables
        };
        metrics.max_rows = tables.iter().map(OutputTable::len).max().unwrap_or(0);

        let holds = tables.iter().all(|t| !t.is_empty());
        let answers = match &query.selection {
            Selection::Boolean => vec![if holds { "TRUE" } else { "FALSE" }.to_string()],
            Selection::Tuple(_) if !holds => Vec::new(),
            Selection::Tuple(elements) => {
                let table = groups
                    .iter()
                    .zip(tables)
                    .filter(|(g, _)| g.selected)
                    .fold(OutputTable::unit(), |acc, (_, t)| acc.join(t));
                self.project(query, elements, table)
            }
        };

        metrics.elapsed_ms = start.elapsed().as_millis();
        debug!(
            groups = metrics.groups,
            clauses = metrics.clauses,
            answers = answers.len(),
            elapsed_ms = metrics.elapsed_ms as u64,
            "Query evaluated"
        );
        Ok(QueryResult { answers, metrics })
    }

    fn evaluate_group(&self, group: &ClauseGroup<'_>) -> Result<OutputTable, EngineError> {
        let mut table = OutputTable::unit();
        for clause in &group.clauses {
            table = table.join(evaluate_clause(&self.read, clause)?);
            if table.is_empty() {
                debug!(synonyms = ?group.synonyms, "Clause group has no results");
                break;
            }
        }
        Ok(table)
    }

    fn project(&self, query: &Query, elements: &[Element], table: OutputTable) -> Vec<String> {
        let selected: Vec<&Synonym> = query.selected_synonyms();
        let unbound: Vec<&Synonym> = selected
            .iter()
            .copied()
            .filter(|s| !table.columns().contains(s))
            .collect();
        let table = unbound
            .into_iter()
            .fold(table, |acc, s| acc.join(domain_table(&self.read, s)));
        let columns: Vec<Synonym> = selected.iter().map(|s| (*s).clone()).collect();
        let projected = table.project(&columns);

        let mut answers: Vec<String> = projected
            .rows()
            .filter_map(|row| self.render(elements, &columns, row))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        answers.sort_by(|a, b| answer_order(a, b));
        answers
    }

    fn render(&self, elements: &[Element], columns: &[Synonym], row: &Row) -> Option<String> {
        let mut parts = Vec::with_capacity(elements.len());
        for e in elements {
            let i = columns.iter().position(|c| c == e.synonym())?;
            parts.push(match e {
                Element::Synonym(_) => row[i].to_string(),
                Element::Attr(a) => attr_value(&self.read, a, &row[i])?,
            });
        }
        Some(parts.join(" "))
    }
}

/// Orders answers field by field, comparing numeric fields by value.
pub fn answer_order(a: &str, b: &str) -> Ordering {
    let mut left = a.split(' ');
    let mut right = b.split(' ');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(n), Ok(m)) => n.cmp(&m),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
