//! Population pass: walks a parsed program and drives the [`WriteFacade`].

use std::collections::{BTreeSet, HashMap};

use ir::{ParsedProgram, StmtId, StmtKind};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::WriteFacade;

/// Runs every population step and finalizes the knowledge base.
pub fn populate(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    populate_entities(w, parsed);
    populate_follows(w, parsed);
    populate_parent(w, parsed);
    populate_calls(w, parsed);
    let order = callee_first_order(parsed);
    populate_modifies(w, parsed, &order);
    populate_uses(w, parsed, &order);
    populate_next(w, parsed);
    w.finalize();
}

/// Procedures, variables, constants, statement types and the per-statement
/// attributes used by patterns and attribute projections.
pub fn populate_entities(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    for procedure in &parsed.program.procedures {
        w.add_procedure(&procedure.name);
    }
    for (num, id) in parsed.numbers.iter() {
        let kind = &parsed.program.statement(id).kind;
        w.add_statement(num, kind.stmt_type());
        match kind {
            StmtKind::Read { var } => {
                w.add_variable(var);
                w.add_read_var(num, var);
            }
            StmtKind::Print { var } => {
                w.add_variable(var);
                w.add_print_var(num, var);
            }
            StmtKind::Call { procedure } => w.add_call_statement(num, procedure),
            StmtKind::Assign { var, expr } => {
                w.add_variable(var);
                for v in expr.variables() {
                    w.add_variable(&v);
                }
                for c in expr.constants() {
                    w.add_constant(&c);
                }
                w.add_assignment(num, var, expr.postfix());
            }
            StmtKind::While { cond, .. } | StmtKind::If { cond, .. } => {
                let is_while = matches!(kind, StmtKind::While { .. });
                for v in cond.variables() {
                    w.add_variable(&v);
                    if is_while {
                        w.add_while_control_var(num, &v);
                    } else {
                        w.add_if_control_var(num, &v);
                    }
                }
                for c in cond.constants() {
                    w.add_constant(&c);
                }
            }
        }
    }
}

/// Consecutive statements of every statement list.
pub fn populate_follows(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    let mut lists: Vec<&[StmtId]> = parsed
        .program
        .procedures
        .iter()
        .map(|p| p.body.as_slice())
        .collect();
    while let Some(list) = lists.pop() {
        for pair in list.windows(2) {
            w.add_follows(parsed.number(pair[0]), parsed.number(pair[1]));
        }
        for &id in list {
            lists.extend(parsed.program.statement(id).kind.blocks());
        }
    }
}

/// Container statements to their direct children.
pub fn populate_parent(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    for (num, id) in parsed.numbers.iter() {
        for child in parsed.program.statement(id).kind.children() {
            w.add_parent(num, parsed.number(child));
        }
    }
}

pub fn populate_calls(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    for procedure in &parsed.program.procedures {
        for id in parsed.program.descendants(&procedure.body) {
            if let StmtKind::Call { procedure: callee } = &parsed.program.statement(id).kind {
                w.add_calls(&procedure.name, callee);
            }
        }
    }
}

pub fn populate_next(w: &mut WriteFacade<'_>, parsed: &ParsedProgram) {
    for cfg in &parsed.cfgs {
        for &(from, to) in &cfg.edges {
            w.add_next(from, to);
        }
    }
}

pub fn populate_modifies(w: &mut WriteFacade<'_>, parsed: &ParsedProgram, order: &[usize]) {
    let facts = collect(parsed, order, Facet::Modifies);
    for (num, var) in facts.statements {
        w.add_statement_modifies_var(num, &var);
    }
    for (procedure, var) in facts.procedures {
        w.add_procedure_modifies_var(&procedure, &var);
    }
}

pub fn populate_uses(w: &mut WriteFacade<'_>, parsed: &ParsedProgram, order: &[usize]) {
    let facts = collect(parsed, order, Facet::Uses);
    for (num, var) in facts.statements {
        w.add_statement_uses_var(num, &var);
    }
    for (procedure, var) in facts.procedures {
        w.add_procedure_uses_var(&procedure, &var);
    }
}

/// Procedure indices with every callee before its callers, so a call
/// statement can inherit the callee's procedure level facts.
pub fn callee_first_order(parsed: &ParsedProgram) -> Vec<usize> {
    let procedures = &parsed.program.procedures;
    let index: HashMap<&str, usize> = procedures
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), i))
        .collect();
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for (i, procedure) in procedures.iter().enumerate() {
        graph.add_node(i);
        for id in parsed.program.descendants(&procedure.body) {
            if let StmtKind::Call { procedure: callee } = &parsed.program.statement(id).kind {
                if let Some(&j) = index.get(callee.as_str()) {
                    graph.add_edge(i, j, ());
                }
            }
        }
    }
    match toposort(&graph, None) {
        Ok(order) => order.into_iter().rev().collect(),
        Err(cycle) => {
            warn!(
                procedure = %procedures[cycle.node_id()].name,
                "Recursive calls, falling back to declaration order"
            );
            (0..procedures.len()).collect()
        }
    }
}

#[derive(Clone, Copy)]
enum Facet {
    Modifies,
    Uses,
}

#[derive(Default)]
struct Facts {
    statements: Vec<(ir::StmtNum, String)>,
    procedures: Vec<(String, String)>,
}

fn collect(parsed: &ParsedProgram, order: &[usize], facet: Facet) -> Facts {
    let mut facts = Facts::default();
    let mut by_procedure: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for &i in order {
        let procedure = &parsed.program.procedures[i];
        let mut vars = BTreeSet::new();
        for &id in &procedure.body {
            vars.extend(statement_vars(parsed, id, facet, &by_procedure, &mut facts));
        }
        for var in &vars {
            facts.procedures.push((procedure.name.clone(), var.clone()));
        }
        by_procedure.insert(procedure.name.as_str(), vars);
    }
    debug!(
        statements = facts.statements.len(),
        procedures = facts.procedures.len(),
        "Collected {} facts",
        match facet {
            Facet::Modifies => "modifies",
            Facet::Uses => "uses",
        }
    );
    facts
}

fn statement_vars(
    parsed: &ParsedProgram,
    id: StmtId,
    facet: Facet,
    by_procedure: &HashMap<&str, BTreeSet<String>>,
    facts: &mut Facts,
) -> BTreeSet<String> {
    let kind = &parsed.program.statement(id).kind;
    let mut vars = BTreeSet::new();
    match (kind, facet) {
        (StmtKind::Read { var }, Facet::Modifies)
        | (StmtKind::Print { var }, Facet::Uses)
        | (StmtKind::Assign { var, .. }, Facet::Modifies) => {
            vars.insert(var.clone());
        }
        (StmtKind::Assign { expr, .. }, Facet::Uses) => vars.extend(expr.variables()),
        (StmtKind::Call { procedure }, _) => {
            if let Some(callee) = by_procedure.get(procedure.as_str()) {
                vars.extend(callee.iter().cloned());
            }
        }
        (StmtKind::While { cond, .. } | StmtKind::If { cond, .. }, _) => {
            if let Facet::Uses = facet {
                vars.extend(cond.variables());
            }
            for child in kind.children() {
                vars.extend(statement_vars(parsed, child, facet, by_procedure, facts));
            }
        }
        _ => {}
    }
    let num = parsed.number(id);
    for var in &vars {
        facts.statements.push((num, var.clone()));
    }
    vars
}
