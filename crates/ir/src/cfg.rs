use serde::{Deserialize, Serialize};

use crate::StmtNum;

/// CFG node: one statement of the procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgNode {
    pub id: StmtNum,
    pub line: usize,
    pub code: String,
}

/// Statement level control flow graph of a single procedure.
///
/// Edges are the direct `Next` facts; branches fan out from `if` nodes and
/// loop bodies flow back to their `while` node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cfg {
    pub procedure: String,
    pub nodes: Vec<CfgNode>,
    pub edges: Vec<(StmtNum, StmtNum)>,
}

impl Cfg {
    pub fn new(procedure: impl Into<String>) -> Self {
        Self {
            procedure: procedure.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds an edge unless it is already present.
    pub fn add_edge(&mut self, from: StmtNum, to: StmtNum) {
        if !self.edges.contains(&(from, to)) {
            self.edges.push((from, to));
        }
    }

    pub fn successors(&self, id: StmtNum) -> impl Iterator<Item = StmtNum> + '_ {
        self.edges
            .iter()
            .filter(move |(a, _)| *a == id)
            .map(|(_, b)| *b)
    }

    /// Exports the graph to DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = format!("digraph {} {{\n", self.procedure);
        for node in &self.nodes {
            out.push_str(&format!(
                "    {} [label=\"{}: {}\"];\n",
                node.id,
                node.id,
                node.code.replace('"', "\\\"")
            ));
        }
        for (a, b) in &self.edges {
            out.push_str(&format!("    {a} -> {b};\n"));
        }
        out.push('}');
        out
    }

    /// Exports the graph to Mermaid format.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");
        for node in &self.nodes {
            out.push_str(&format!(
                "    s{}[\"{}: {}\"]\n",
                node.id,
                node.id,
                node.code.replace('"', "#quot;")
            ));
        }
        for (a, b) in &self.edges {
            out.push_str(&format!("    s{a} --> s{b}\n"));
        }
        out
    }

    /// Exports the graph to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
