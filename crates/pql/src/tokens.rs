use crate::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Identifier or keyword; `Follows*`-style names and `stmt#` are
    /// folded into a single token when written without spaces.
    Name(String),
    Integer(String),
    /// Raw text between double quotes.
    Quoted(String),
    Symbol(char),
}

const SYMBOLS: &[char] = &['(', ')', ',', ';', '_', '.', '<', '>', '='];
const STARRED: &[&str] = &["Follows", "Parent", "Calls", "Next", "Affects"];

pub(crate) fn tokenize(query: &str) -> Result<Vec<Token>, QueryError> {
    let chars: Vec<char> = query.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let mut name: String = chars[start..i].iter().collect();
            let next = chars.get(i).copied();
            if next == Some('*') && STARRED.contains(&name.as_str()) {
                name.push('*');
                i += 1;
            } else if next == Some('#') && name == "stmt" {
                name.push('#');
                i += 1;
            }
            tokens.push(Token::Name(name));
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if chars.get(i).is_some_and(|c| c.is_ascii_alphabetic()) {
                return Err(QueryError::syntax("identifier cannot start with a digit"));
            }
            tokens.push(Token::Integer(chars[start..i].iter().collect()));
        } else if c == '"' {
            let start = i + 1;
            let Some(len) = chars[start..].iter().position(|&c| c == '"') else {
                return Err(QueryError::syntax("unterminated quote"));
            };
            tokens.push(Token::Quoted(chars[start..start + len].iter().collect()));
            i = start + len + 1;
        } else if SYMBOLS.contains(&c) {
            tokens.push(Token::Symbol(c));
            i += 1;
        } else {
            return Err(QueryError::syntax(format!("unexpected character '{c}'")));
        }
    }
    Ok(tokens)
}
