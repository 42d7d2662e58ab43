//! Intermediate results: tables of synonym bindings and the operations
//! used to combine them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ir::StmtNum;
use pql::Synonym;
use serde::Serialize;

/// One bound value: a statement number, or the name of a procedure or
/// variable, or a constant literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Stmt(StmtNum),
    Name(String),
}

impl From<StmtNum> for Entity {
    fn from(n: StmtNum) -> Self {
        Entity::Stmt(n)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Entity::Name(s.to_string())
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity::Name(s)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Stmt(n) => write!(f, "{n}"),
            Entity::Name(s) => f.write_str(s),
        }
    }
}

pub type Row = Vec<Entity>;

/// Result of evaluating one or more clauses.
///
/// `Unit` is the answer of a clause that holds without binding anything and
/// is the identity of [`OutputTable::join`]. A `Table` with no rows is the
/// empty answer and absorbs every join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTable {
    Unit,
    Table {
        columns: Vec<Synonym>,
        rows: HashSet<Row>,
    },
}

impl OutputTable {
    pub fn unit() -> Self {
        OutputTable::Unit
    }

    pub fn empty(columns: Vec<Synonym>) -> Self {
        OutputTable::Table {
            columns,
            rows: HashSet::new(),
        }
    }

    /// Unit when `holds`, empty otherwise.
    pub fn truth(holds: bool) -> Self {
        if holds {
            OutputTable::Unit
        } else {
            OutputTable::empty(Vec::new())
        }
    }

    /// Builds a table; a zero-column table with a row collapses to `Unit`.
    pub fn new(columns: Vec<Synonym>, rows: impl IntoIterator<Item = Row>) -> Self {
        let rows: HashSet<Row> = rows.into_iter().collect();
        if columns.is_empty() && !rows.is_empty() {
            return OutputTable::Unit;
        }
        OutputTable::Table { columns, rows }
    }

    /// Single-column table.
    pub fn column(synonym: Synonym, values: impl IntoIterator<Item = Entity>) -> Self {
        OutputTable::new(vec![synonym], values.into_iter().map(|v| vec![v]))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OutputTable::Unit => false,
            OutputTable::Table { rows, .. } => rows.is_empty(),
        }
    }

    pub fn columns(&self) -> &[Synonym] {
        match self {
            OutputTable::Unit => &[],
            OutputTable::Table { columns, .. } => columns,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OutputTable::Unit => 1,
            OutputTable::Table { rows, .. } => rows.len(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        let rows = match self {
            OutputTable::Unit => None,
            OutputTable::Table { rows, .. } => Some(rows),
        };
        rows.into_iter().flatten()
    }

    fn position(&self, synonym: &Synonym) -> Option<usize> {
        self.columns().iter().position(|c| c == synonym)
    }

    /// Natural join on shared synonyms; cross product when none are shared.
    pub fn join(self, other: OutputTable) -> OutputTable {
        let (left_cols, left_rows, right_cols, right_rows) = match (self, other) {
            (OutputTable::Unit, t) | (t, OutputTable::Unit) => return t,
            (
                OutputTable::Table {
                    columns: lc,
                    rows: lr,
                },
                OutputTable::Table {
                    columns: rc,
                    rows: rr,
                },
            ) => (lc, lr, rc, rr),
        };

        let shared: Vec<(usize, usize)> = left_cols
            .iter()
            .enumerate()
            .filter_map(|(li, c)| right_cols.iter().position(|r| r == c).map(|ri| (li, ri)))
            .collect();
        let extra: Vec<usize> = (0..right_cols.len())
            .filter(|ri| !shared.iter().any(|&(_, s)| s == *ri))
            .collect();
        let mut columns = left_cols;
        columns.extend(extra.iter().map(|&ri| right_cols[ri].clone()));

        if left_rows.is_empty() || right_rows.is_empty() {
            return OutputTable::empty(columns);
        }

        let mut index: HashMap<Vec<&Entity>, Vec<&Row>> = HashMap::new();
        for row in &right_rows {
            let key = shared.iter().map(|&(_, ri)| &row[ri]).collect();
            index.entry(key).or_default().push(row);
        }

        let mut rows = HashSet::new();
        for left in &left_rows {
            let key: Vec<&Entity> = shared.iter().map(|&(li, _)| &left[li]).collect();
            let Some(matches) = index.get(&key) else {
                continue;
            };
            for right in matches {
                let mut row = left.clone();
                row.extend(extra.iter().map(|&ri| right[ri].clone()));
                rows.insert(row);
            }
        }
        OutputTable::Table { columns, rows }
    }

    /// Rows of `self` whose values on `other`'s columns are not a row of
    /// `other`. Every column of `other` must be a column of `self`.
    pub fn subtract(self, other: &OutputTable) -> OutputTable {
        let (columns, rows) = match self {
            OutputTable::Unit => return OutputTable::truth(other.is_empty()),
            OutputTable::Table { columns, rows } => (columns, rows),
        };
        let other_rows = match other {
            OutputTable::Unit => return OutputTable::empty(columns),
            OutputTable::Table { rows: removed, .. } if removed.is_empty() => {
                return OutputTable::Table { columns, rows }
            }
            OutputTable::Table { rows: removed, .. } => removed,
        };
        let positions: Vec<usize> = other
            .columns()
            .iter()
            .filter_map(|c| columns.iter().position(|s| s == c))
            .collect();
        let rows = rows
            .into_iter()
            .filter(|row| {
                let key: Row = positions.iter().map(|&i| row[i].clone()).collect();
                !other_rows.contains(&key)
            })
            .collect();
        OutputTable::Table { columns, rows }
    }

    /// Distinct rows restricted to `columns`, in that order. Columns not in
    /// the table are skipped.
    pub fn project(&self, columns: &[Synonym]) -> OutputTable {
        if let OutputTable::Unit = self {
            return OutputTable::Unit;
        }
        let kept: Vec<(usize, &Synonym)> = columns
            .iter()
            .filter_map(|c| self.position(c).map(|i| (i, c)))
            .collect();
        if self.is_empty() {
            return OutputTable::empty(kept.into_iter().map(|(_, c)| c.clone()).collect());
        }
        let rows: Vec<Row> = self
            .rows()
            .map(|row| kept.iter().map(|&(i, _)| row[i].clone()).collect())
            .collect();
        OutputTable::new(kept.into_iter().map(|(_, c)| c.clone()).collect(), rows)
    }
}
