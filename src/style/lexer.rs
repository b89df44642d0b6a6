use crate::foundation::error::{FuzzError, FuzzResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// A bare number, e.g. `1.5`.
    Number(f64),
    /// A number with a unit suffix, e.g. `2rem` or `50%`.
    Dimension(f64, String),
    Ident(String),

    LParen,
    RParen,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,

    Eof,
}

fn lex_error(pos: usize, msg: impl std::fmt::Display) -> FuzzError {
    FuzzError::validation(format!("length expression at {pos}: {msg}"))
}

pub(crate) fn lex(input: &str) -> FuzzResult<Vec<Token>> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        // Number: [0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)? or .[0-9]+..., optionally followed by a unit.
        if c.is_ascii_digit()
            || (c == '.' && i + 1 < bytes.len() && (bytes[i + 1] as char).is_ascii_digit())
        {
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len()
                && (bytes[i] as char) == '.'
                && i + 1 < bytes.len()
                && (bytes[i + 1] as char).is_ascii_digit()
            {
                i += 1;
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
            }

            // `2em` is a unit, `2e3` is an exponent.
            if i < bytes.len() && matches!(bytes[i] as char, 'e' | 'E') {
                let mut j = i + 1;
                if j < bytes.len() && matches!(bytes[j] as char, '+' | '-') {
                    j += 1;
                }
                if j < bytes.len() && (bytes[j] as char).is_ascii_digit() {
                    i = j;
                    while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let v: f64 = input[start..i]
                .parse()
                .map_err(|_| lex_error(start, "invalid number"))?;

            let unit_start = i;
            if i < bytes.len() && (bytes[i] as char) == '%' {
                i += 1;
            } else {
                while i < bytes.len() && (bytes[i] as char).is_ascii_alphabetic() {
                    i += 1;
                }
            }

            let kind = if unit_start == i {
                TokenKind::Number(v)
            } else {
                TokenKind::Dimension(v, input[unit_start..i].to_ascii_lowercase())
            };
            out.push(Token { kind, pos: start });
            continue;
        }

        if c.is_ascii_alphabetic() {
            i += 1;
            while i < bytes.len() {
                let ch = bytes[i] as char;
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    i += 1;
                } else {
                    break;
                }
            }
            out.push(Token {
                kind: TokenKind::Ident(input[start..i].to_ascii_lowercase()),
                pos: start,
            });
            continue;
        }

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            _ => return Err(lex_error(start, format!("unexpected character '{c}'"))),
        };
        i += 1;
        out.push(Token { kind, pos: start });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        pos: input.len(),
    });

    Ok(out)
}

