//! Front end that turns SIMPLE source files into the numbered AST and
//! control flow graphs consumed by the knowledge base.

use anyhow::{Context, Result};
use ir::{annotate, ParsedProgram};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::debug;

pub mod cfg;
pub mod simple;

pub use cfg::build_cfg;
pub use simple::{parse_ast, parse_expr};

/// Rejection of a SIMPLE program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{line}:{column}: unexpected character '{found}'")]
    UnexpectedChar {
        found: char,
        line: usize,
        column: usize,
    },
    #[error("{line}:{column}: expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("program has no procedures")]
    EmptyProgram,
    #[error("procedure '{0}' is declared more than once")]
    DuplicateProcedure(String),
    #[error("procedure '{caller}' calls undefined procedure '{callee}'")]
    UndefinedProcedure { caller: String, callee: String },
    #[error("recursive call chain through procedure '{0}'")]
    RecursiveCall(String),
}

/// Parses SIMPLE source, numbers its statements and builds the CFGs.
///
/// # Example
/// ```
/// use parsers::parse_program;
/// let parsed = parse_program("procedure main { x = 1; print x; }").unwrap();
/// assert_eq!(parsed.numbers.len(), 2);
/// assert_eq!(parsed.cfgs[0].edges, vec![(1, 2)]);
/// ```
pub fn parse_program(src: &str) -> Result<ParsedProgram, ParseError> {
    let program = parse_ast(src)?;
    let numbers = annotate(&program);
    let cfgs = build_cfg(&program, &numbers);
    debug!(
        procedures = program.procedures.len(),
        statements = numbers.len(),
        "Program parsed"
    );
    Ok(ParsedProgram {
        program,
        numbers,
        cfgs,
    })
}

/// Reads a SIMPLE source file and parses it with [`parse_program`].
///
/// # Example
/// ```
/// use parsers::parse_file;
/// use std::fs;
/// let path = std::env::temp_dir().join("parse_file_doc.simple");
/// fs::write(&path, "procedure p { read x; }").unwrap();
/// let parsed = parse_file(&path).unwrap();
/// assert_eq!(parsed.program.procedures[0].name, "p");
/// ```
pub fn parse_file(path: &Path) -> Result<ParsedProgram> {
    debug!(file = %path.display(), "Parsing SIMPLE source");
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_program(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
