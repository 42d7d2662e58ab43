//! Grammar level parsing into an untyped query.
//!
//! Only syntax is checked here. Synonyms stay plain names until
//! [`crate::validate`] resolves them against the declarations, so a query
//! with both kinds of problems reports the syntax error.

use ir::StmtNum;
use parsers::simple::tokens::normalise_integer;

use crate::model::{AttrName, DesignEntity, ExprSpec};
use crate::tokens::Token;
use crate::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum URef {
    Name(String),
    Quoted(String),
    Integer(StmtNum),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UElem {
    pub name: String,
    pub attr: Option<AttrName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum USelection {
    Boolean,
    Tuple(Vec<UElem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UWithRef {
    Attr(UElem),
    Quoted(String),
    Integer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UClause {
    SuchThat {
        relation: String,
        lhs: URef,
        rhs: URef,
    },
    Pattern {
        synonym: String,
        var: URef,
        expr: ExprSpec,
        /// Two for assign/while shaped patterns, three for if.
        arity: usize,
    },
    With {
        lhs: UWithRef,
        rhs: UWithRef,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UQuery {
    pub declarations: Vec<(DesignEntity, String)>,
    pub selection: USelection,
    pub clauses: Vec<(UClause, bool)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    SuchThat,
    Pattern,
    With,
}

#[derive(Clone, Copy)]
enum Slot {
    Stmt,
    Ent,
    Any,
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn parse(mut self) -> Result<UQuery, QueryError> {
        let mut declarations = Vec::new();
        while let Some(entity) = self.peek_name().and_then(DesignEntity::from_keyword) {
            self.pos += 1;
            loop {
                declarations.push((entity, self.expect_name()?));
                if !self.eat(',') {
                    break;
                }
            }
            self.expect(';')?;
        }

        if self.peek_name() != Some("Select") {
            return Err(QueryError::syntax("expected 'Select'"));
        }
        self.pos += 1;
        let selection = self.parse_selection()?;

        let mut clauses = Vec::new();
        let mut section = None;
        while let Some(token) = self.peek().cloned() {
            let next = match token {
                Token::Name(ref n) if n == "such" => {
                    self.pos += 1;
                    if self.peek_name() != Some("that") {
                        return Err(QueryError::syntax("expected 'that' after 'such'"));
                    }
                    self.pos += 1;
                    Section::SuchThat
                }
                Token::Name(ref n) if n == "pattern" => {
                    self.pos += 1;
                    Section::Pattern
                }
                Token::Name(ref n) if n == "with" => {
                    self.pos += 1;
                    Section::With
                }
                Token::Name(ref n) if n == "and" => match section {
                    Some(current) => {
                        self.pos += 1;
                        current
                    }
                    None => return Err(QueryError::syntax("'and' without a preceding clause")),
                },
                _ => return Err(QueryError::syntax("expected a clause")),
            };
            section = Some(next);
            let negated = self.eat_not(next);
            let clause = match next {
                Section::SuchThat => self.parse_such_that()?,
                Section::Pattern => self.parse_pattern()?,
                Section::With => self.parse_with()?,
            };
            clauses.push((clause, negated));
        }

        Ok(UQuery {
            declarations,
            selection,
            clauses,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn peek_name(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Name(n)) => Some(n.as_str()),
            _ => None,
        }
    }

    fn eat(&mut self, symbol: char) -> bool {
        if self.peek() == Some(&Token::Symbol(symbol)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, symbol: char) -> Result<(), QueryError> {
        if self.eat(symbol) {
            Ok(())
        } else {
            Err(QueryError::syntax(format!("expected '{symbol}'")))
        }
    }

    fn expect_name(&mut self) -> Result<String, QueryError> {
        match self.peek() {
            Some(Token::Name(n)) if is_ident(n) => {
                let n = n.clone();
                self.pos += 1;
                Ok(n)
            }
            _ => Err(QueryError::syntax("expected a synonym")),
        }
    }

    /// `not` is a keyword only where a clause body follows; a synonym
    /// called `not` is still usable.
    fn eat_not(&mut self, section: Section) -> bool {
        if self.peek_name() != Some("not") {
            return false;
        }
        let follows_body = match (section, self.peek_at(1)) {
            (Section::SuchThat, Some(Token::Name(_))) => true,
            (Section::Pattern, Some(Token::Name(_))) => true,
            (Section::With, Some(Token::Symbol('.'))) | (Section::With, None) => false,
            (Section::With, Some(_)) => true,
            _ => false,
        };
        if follows_body {
            self.pos += 1;
        }
        follows_body
    }

    fn parse_selection(&mut self) -> Result<USelection, QueryError> {
        if self.peek_name() == Some("BOOLEAN") && self.peek_at(1) != Some(&Token::Symbol('.')) {
            self.pos += 1;
            return Ok(USelection::Boolean);
        }
        if self.eat('<') {
            let mut elements = vec![self.parse_elem()?];
            while self.eat(',') {
                elements.push(self.parse_elem()?);
            }
            self.expect('>')?;
            return Ok(USelection::Tuple(elements));
        }
        Ok(USelection::Tuple(vec![self.parse_elem()?]))
    }

    fn parse_elem(&mut self) -> Result<UElem, QueryError> {
        let name = self.expect_name()?;
        let attr = if self.eat('.') {
            Some(self.parse_attr_name()?)
        } else {
            None
        };
        Ok(UElem { name, attr })
    }

    fn parse_attr_name(&mut self) -> Result<AttrName, QueryError> {
        let attr = self
            .peek_name()
            .and_then(AttrName::from_name)
            .ok_or_else(|| QueryError::syntax("expected an attribute name"))?;
        self.pos += 1;
        Ok(attr)
    }

    fn parse_such_that(&mut self) -> Result<UClause, QueryError> {
        let relation = match self.peek_name() {
            Some(name) => name.to_string(),
            None => return Err(QueryError::syntax("expected a relationship")),
        };
        let (lhs_slot, rhs_slot) = match relation.as_str() {
            "Follows" | "Follows*" | "Parent" | "Parent*" | "Next" | "Next*" | "Affects" => {
                (Slot::Stmt, Slot::Stmt)
            }
            "Calls" | "Calls*" => (Slot::Ent, Slot::Ent),
            "Uses" | "Modifies" => (Slot::Any, Slot::Ent),
            other => return Err(QueryError::syntax(format!("unknown relationship '{other}'"))),
        };
        self.pos += 1;
        self.expect('(')?;
        let lhs = self.parse_ref(lhs_slot)?;
        self.expect(',')?;
        let rhs = self.parse_ref(rhs_slot)?;
        self.expect(')')?;
        Ok(UClause::SuchThat { relation, lhs, rhs })
    }

    fn parse_ref(&mut self, slot: Slot) -> Result<URef, QueryError> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| QueryError::syntax("expected an argument"))?;
        let r = match (token, slot) {
            (Token::Symbol('_'), _) => URef::Wildcard,
            (Token::Name(n), _) if is_ident(&n) => URef::Name(n),
            (Token::Integer(raw), Slot::Stmt | Slot::Any) => URef::Integer(parse_stmt_num(&raw)?),
            (Token::Quoted(raw), Slot::Ent | Slot::Any) => URef::Quoted(parse_quoted_ident(&raw)?),
            _ => return Err(QueryError::syntax("invalid argument")),
        };
        self.pos += 1;
        Ok(r)
    }

    fn parse_pattern(&mut self) -> Result<UClause, QueryError> {
        let synonym = self.expect_name()?;
        self.expect('(')?;
        let var = self.parse_ref(Slot::Ent)?;
        self.expect(',')?;
        let expr = self.parse_expr_spec()?;
        let mut arity = 2;
        if self.eat(',') {
            if expr != ExprSpec::Wildcard || !self.eat('_') {
                return Err(QueryError::syntax("if pattern takes wildcards only"));
            }
            arity = 3;
        }
        self.expect(')')?;
        Ok(UClause::Pattern {
            synonym,
            var,
            expr,
            arity,
        })
    }

    fn parse_expr_spec(&mut self) -> Result<ExprSpec, QueryError> {
        if self.eat('_') {
            if let Some(Token::Quoted(raw)) = self.peek().cloned() {
                self.pos += 1;
                let postfix = parse_postfix(&raw)?;
                self.expect('_')?;
                return Ok(ExprSpec::Partial(postfix));
            }
            return Ok(ExprSpec::Wildcard);
        }
        match self.peek().cloned() {
            Some(Token::Quoted(raw)) => {
                self.pos += 1;
                Ok(ExprSpec::Exact(parse_postfix(&raw)?))
            }
            _ => Err(QueryError::syntax("expected an expression spec")),
        }
    }

    fn parse_with(&mut self) -> Result<UClause, QueryError> {
        let lhs = self.parse_with_ref()?;
        self.expect('=')?;
        let rhs = self.parse_with_ref()?;
        Ok(UClause::With { lhs, rhs })
    }

    fn parse_with_ref(&mut self) -> Result<UWithRef, QueryError> {
        match self.peek().cloned() {
            Some(Token::Quoted(raw)) => {
                self.pos += 1;
                Ok(UWithRef::Quoted(parse_quoted_ident(&raw)?))
            }
            Some(Token::Integer(raw)) => {
                self.pos += 1;
                Ok(UWithRef::Integer(normalise_integer(&raw)))
            }
            Some(Token::Name(_)) => {
                let name = self.expect_name()?;
                self.expect('.')?;
                let attr = Some(self.parse_attr_name()?);
                Ok(UWithRef::Attr(UElem { name, attr }))
            }
            _ => Err(QueryError::syntax("expected an attribute reference")),
        }
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

fn parse_quoted_ident(raw: &str) -> Result<String, QueryError> {
    let ident = raw.trim();
    if is_ident(ident) {
        Ok(ident.to_string())
    } else {
        Err(QueryError::syntax(format!("'{raw}' is not an identifier")))
    }
}

fn parse_stmt_num(raw: &str) -> Result<StmtNum, QueryError> {
    normalise_integer(raw)
        .parse()
        .map_err(|_| QueryError::syntax(format!("statement number '{raw}' out of range")))
}

fn parse_postfix(raw: &str) -> Result<Vec<String>, QueryError> {
    parsers::parse_expr(raw)
        .map(|e| e.postfix())
        .map_err(|e| QueryError::syntax(format!("invalid expression '{raw}': {e}")))
}
