//! Control flow graph construction over the numbered AST.

use ir::{Cfg, CfgNode, Program, StmtId, StmtKind, StmtNum, StmtNumbers};

/// Builds one CFG per procedure, in declaration order.
pub fn build_cfg(program: &Program, numbers: &StmtNumbers) -> Vec<Cfg> {
    program
        .procedures
        .iter()
        .map(|procedure| {
            let mut cfg = Cfg::new(procedure.name.clone());
            for id in program.descendants(&procedure.body) {
                let stmt = program.statement(id);
                cfg.nodes.push(CfgNode {
                    id: numbers.number(id),
                    line: stmt.meta.line,
                    code: stmt.label(),
                });
            }
            cfg.nodes.sort_by_key(|n| n.id);
            link(program, numbers, &procedure.body, Vec::new(), &mut cfg);
            cfg.edges.sort_unstable();
            cfg
        })
        .collect()
}

/// Wires `list` after `preds` and returns the statements control leaves
/// the list from.
fn link(
    program: &Program,
    numbers: &StmtNumbers,
    list: &[StmtId],
    mut preds: Vec<StmtNum>,
    cfg: &mut Cfg,
) -> Vec<StmtNum> {
    for &id in list {
        let num = numbers.number(id);
        for &p in &preds {
            cfg.add_edge(p, num);
        }
        preds = match &program.statement(id).kind {
            StmtKind::While { body, .. } => {
                for exit in link(program, numbers, body, vec![num], cfg) {
                    cfg.add_edge(exit, num);
                }
                vec![num]
            }
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                let mut exits = link(program, numbers, then_branch, vec![num], cfg);
                exits.extend(link(program, numbers, else_branch, vec![num], cfg));
                exits
            }
            _ => vec![num],
        };
    }
    preds
}
