use std::fmt;

use crate::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Name(String),
    Integer(String),
    Symbol(&'static str),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(n) => write!(f, "name '{n}'"),
            TokenKind::Integer(i) => write!(f, "integer '{i}'"),
            TokenKind::Symbol(s) => write!(f, "'{s}'"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

const SYMBOLS: [&str; 20] = [
    "&&", "||", "==", "!=", ">=", "<=", "{", "}", "(", ")", ";", "=", "+", "-", "*", "/", "%",
    ">", "<", "!",
];

/// Strips leading zeros so that `007` and `7` denote the same constant.
pub fn normalise_integer(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Splits SIMPLE source text into tokens; the result always ends with `Eof`.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let (mut i, mut line, mut column) = (0usize, 1usize, 1usize);

    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            i += 1;
            line += 1;
            column = 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            column += 1;
            continue;
        }
        let start = i;
        let kind = if c.is_ascii_alphabetic() {
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            TokenKind::Name(chars[start..i].iter().collect())
        } else if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i].is_ascii_alphabetic() {
                return Err(ParseError::UnexpectedChar {
                    found: chars[i],
                    line,
                    column: column + (i - start),
                });
            }
            let raw: String = chars[start..i].iter().collect();
            TokenKind::Integer(normalise_integer(&raw))
        } else {
            let symbol = SYMBOLS.iter().find(|s| {
                s.chars()
                    .enumerate()
                    .all(|(k, sc)| chars.get(i + k) == Some(&sc))
            });
            match symbol {
                Some(s) => {
                    i += s.len();
                    TokenKind::Symbol(*s)
                }
                None => {
                    return Err(ParseError::UnexpectedChar {
                        found: c,
                        line,
                        column,
                    })
                }
            }
        };
        tokens.push(Token { kind, line, column });
        column += i - start;
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
        column,
    });
    Ok(tokens)
}
