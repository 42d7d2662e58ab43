use std::collections::HashSet;

use ir::{Program, StmtKind};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::ParseError;

/// Program level rules: unique procedure names, calls to existing
/// procedures only, no direct or indirect recursion.
pub(crate) fn validate(program: &Program) -> Result<(), ParseError> {
    let mut names = HashSet::new();
    for procedure in &program.procedures {
        if !names.insert(procedure.name.as_str()) {
            return Err(ParseError::DuplicateProcedure(procedure.name.clone()));
        }
    }

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for procedure in &program.procedures {
        graph.add_node(procedure.name.as_str());
        for id in program.descendants(&procedure.body) {
            if let StmtKind::Call { procedure: callee } = &program.statement(id).kind {
                if !names.contains(callee.as_str()) {
                    return Err(ParseError::UndefinedProcedure {
                        caller: procedure.name.clone(),
                        callee: callee.clone(),
                    });
                }
                graph.add_edge(procedure.name.as_str(), callee.as_str(), ());
            }
        }
    }

    toposort(&graph, None).map_err(|cycle| ParseError::RecursiveCall(cycle.node_id().to_string()))?;
    debug!(
        procedures = program.procedures.len(),
        calls = graph.edge_count(),
        "Call graph validated"
    );
    Ok(())
}
