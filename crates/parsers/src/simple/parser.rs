//! Recursive descent parser for SIMPLE.
//!
//! Keywords are not reserved: `read = read + 1;` is a valid assignment, so
//! statements are classified by looking one token past the leading name.

use ir::{BinOp, CondExpr, Expr, Meta, Procedure, Program, RelOp, StmtId, StmtKind};

use super::tokens::{Token, TokenKind};
use crate::ParseError;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    program: Program,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            program: Program::default(),
        }
    }

    /// A standalone expression spanning every token.
    pub(crate) fn parse_standalone_expr(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        match self.peek().kind {
            TokenKind::Eof => Ok(expr),
            _ => Err(self.unexpected("end of expression")),
        }
    }

    /// program: procedure+
    pub(crate) fn parse_program(mut self) -> Result<Program, ParseError> {
        while !matches!(self.peek().kind, TokenKind::Eof) {
            let procedure = self.parse_procedure()?;
            self.program.procedures.push(procedure);
        }
        if self.program.procedures.is_empty() {
            return Err(ParseError::EmptyProgram);
        }
        Ok(self.program)
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn meta(&self) -> Meta {
        let tok = self.peek();
        Meta::new(tok.line, tok.column)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: tok.kind.to_string(),
            line: tok.line,
            column: tok.column,
        }
    }

    fn is_symbol(&self, symbol: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Symbol(s) if *s == symbol)
    }

    fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.is_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<(), ParseError> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{symbol}'")))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        match &self.peek().kind {
            TokenKind::Name(name) if name == keyword => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(&format!("'{keyword}'"))),
        }
    }

    /// procedure: 'procedure' proc_name '{' stmtLst '}'
    fn parse_procedure(&mut self) -> Result<Procedure, ParseError> {
        let meta = self.meta();
        self.expect_keyword("procedure")?;
        let name = self.expect_name()?;
        let body = self.parse_block()?;
        Ok(Procedure { name, body, meta })
    }

    /// '{' stmt+ '}'
    fn parse_block(&mut self) -> Result<Vec<StmtId>, ParseError> {
        self.expect_symbol("{")?;
        let mut list = Vec::new();
        while !self.is_symbol("}") {
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            list.push(self.parse_statement()?);
        }
        if list.is_empty() {
            return Err(self.unexpected("a statement"));
        }
        self.advance();
        Ok(list)
    }

    fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        let meta = self.meta();
        let keyword = match &self.peek().kind {
            TokenKind::Name(name) => name.clone(),
            _ => return Err(self.unexpected("a statement")),
        };
        let next_is_assign =
            matches!(&self.peek_at(1).kind, TokenKind::Symbol(s) if *s == "=");
        let kind = if next_is_assign {
            self.parse_assign()?
        } else {
            match keyword.as_str() {
                "read" | "print" | "call" => {
                    self.advance();
                    let name = self.expect_name()?;
                    self.expect_symbol(";")?;
                    match keyword.as_str() {
                        "read" => StmtKind::Read { var: name },
                        "print" => StmtKind::Print { var: name },
                        _ => StmtKind::Call { procedure: name },
                    }
                }
                "while" => {
                    self.advance();
                    let cond = self.parse_paren_cond()?;
                    let body = self.parse_block()?;
                    StmtKind::While { cond, body }
                }
                "if" => {
                    self.advance();
                    let cond = self.parse_paren_cond()?;
                    self.expect_keyword("then")?;
                    let then_branch = self.parse_block()?;
                    self.expect_keyword("else")?;
                    let else_branch = self.parse_block()?;
                    StmtKind::If {
                        cond,
                        then_branch,
                        else_branch,
                    }
                }
                _ => {
                    self.advance();
                    return Err(self.unexpected("'='"));
                }
            }
        };
        Ok(self.program.push_statement(kind, meta))
    }

    fn parse_assign(&mut self) -> Result<StmtKind, ParseError> {
        let var = self.expect_name()?;
        self.expect_symbol("=")?;
        let expr = self.parse_expr()?;
        self.expect_symbol(";")?;
        Ok(StmtKind::Assign { var, expr })
    }

    fn parse_paren_cond(&mut self) -> Result<CondExpr, ParseError> {
        self.expect_symbol("(")?;
        let cond = self.parse_cond()?;
        self.expect_symbol(")")?;
        Ok(cond)
    }

    /// cond_expr: rel_expr | '!' '(' cond ')' | '(' cond ')' ('&&' | '||') '(' cond ')'
    fn parse_cond(&mut self) -> Result<CondExpr, ParseError> {
        if self.is_symbol("!") {
            self.advance();
            let inner = self.parse_paren_cond()?;
            return Ok(CondExpr::Not(Box::new(inner)));
        }
        if self.is_symbol("(") {
            let saved = self.pos;
            if let Ok(lhs) = self.parse_paren_cond() {
                let combinator = if self.is_symbol("&&") {
                    Some(true)
                } else if self.is_symbol("||") {
                    Some(false)
                } else {
                    None
                };
                if let Some(is_and) = combinator {
                    self.advance();
                    let rhs = self.parse_paren_cond()?;
                    return Ok(if is_and {
                        CondExpr::And(Box::new(lhs), Box::new(rhs))
                    } else {
                        CondExpr::Or(Box::new(lhs), Box::new(rhs))
                    });
                }
            }
            self.pos = saved;
        }
        self.parse_rel()
    }

    fn parse_rel(&mut self) -> Result<CondExpr, ParseError> {
        let lhs = self.parse_expr()?;
        let op = match &self.peek().kind {
            TokenKind::Symbol(">") => RelOp::Gt,
            TokenKind::Symbol(">=") => RelOp::Ge,
            TokenKind::Symbol("<") => RelOp::Lt,
            TokenKind::Symbol("<=") => RelOp::Le,
            TokenKind::Symbol("==") => RelOp::Eq,
            TokenKind::Symbol("!=") => RelOp::Ne,
            _ => return Err(self.unexpected("a relational operator")),
        };
        self.advance();
        let rhs = self.parse_expr()?;
        Ok(CondExpr::Rel { op, lhs, rhs })
    }

    /// expr: term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("+") => BinOp::Add,
                TokenKind::Symbol("-") => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    /// term: factor (('*' | '/' | '%') factor)*
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("*") => BinOp::Mul,
                TokenKind::Symbol("/") => BinOp::Div,
                TokenKind::Symbol("%") => BinOp::Mod,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::Name(name) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            TokenKind::Integer(value) => {
                self.advance();
                Ok(Expr::Const(value))
            }
            TokenKind::Symbol("(") => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_symbol(")")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}
