//! CSS-like length expressions (`32px`, `2rem`, `clamp(2rem, 8vw, 8rem)`, `calc(...)`).
//!
//! Expressions are parsed once and resolved against a [`LengthContext`] whenever the viewport
//! changes. Arithmetic is unit-checked: lengths add to lengths and scale by plain numbers.

use crate::foundation::error::{FuzzError, FuzzResult};
use crate::style::lexer::{Token, TokenKind, lex};

/// Environment a length resolves against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthContext {
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Viewport height in CSS pixels.
    pub viewport_height: f64,
    /// Root element font size (`rem`).
    pub root_font_px: f64,
    /// Font size of the enclosing element (`em`, `%`).
    pub parent_font_px: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Px,
    Pt,
    Rem,
    Em,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
}

impl Unit {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "px" => Self::Px,
            "pt" => Self::Pt,
            "rem" => Self::Rem,
            "em" => Self::Em,
            "%" => Self::Percent,
            "vw" => Self::Vw,
            "vh" => Self::Vh,
            "vmin" => Self::Vmin,
            "vmax" => Self::Vmax,
            _ => return None,
        })
    }

    fn to_px(self, v: f64, ctx: &LengthContext) -> f64 {
        match self {
            Self::Px => v,
            Self::Pt => v * 96.0 / 72.0,
            Self::Rem => v * ctx.root_font_px,
            Self::Em => v * ctx.parent_font_px,
            Self::Percent => v / 100.0 * ctx.parent_font_px,
            Self::Vw => v / 100.0 * ctx.viewport_width,
            Self::Vh => v / 100.0 * ctx.viewport_height,
            Self::Vmin => v / 100.0 * ctx.viewport_width.min(ctx.viewport_height),
            Self::Vmax => v / 100.0 * ctx.viewport_width.max(ctx.viewport_height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Func {
    Calc,
    Min,
    Max,
    Clamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Number(f64),
    Length(f64, Unit),
    Neg(Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
    Call(Func, Vec<Node>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Quantity {
    Number(f64),
    Px(f64),
}

/// A parsed length expression.
#[derive(Clone, Debug, PartialEq)]
pub struct LengthExpr {
    src: String,
    root: Node,
}

impl LengthExpr {
    /// Source text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.src
    }

    /// Resolve to CSS pixels.
    pub fn resolve_px(&self, ctx: &LengthContext) -> FuzzResult<f64> {
        match eval(&self.root, ctx)? {
            Quantity::Px(v) if v.is_finite() => Ok(v),
            Quantity::Px(_) => Err(eval_error(&self.src, "resolved to a non-finite length")),
            // A bare zero is a valid length in CSS; any other unitless number is not.
            Quantity::Number(v) if v == 0.0 => Ok(0.0),
            Quantity::Number(_) => Err(eval_error(&self.src, "expected a length, found a number")),
        }
    }
}

/// Parse a length expression.
pub fn parse_length(src: &str) -> FuzzResult<LengthExpr> {
    let tokens = lex(src.trim())?;
    let mut p = Parser { tokens, pos: 0 };
    let root = p.parse_sum()?;
    p.expect(TokenKind::Eof)?;
    Ok(LengthExpr {
        src: src.trim().to_owned(),
        root,
    })
}

fn eval_error(src: &str, msg: impl std::fmt::Display) -> FuzzError {
    FuzzError::validation(format!("length expression \"{src}\": {msg}"))
}

fn eval(node: &Node, ctx: &LengthContext) -> FuzzResult<Quantity> {
    let err = |msg: &str| FuzzError::validation(format!("length expression: {msg}"));
    Ok(match node {
        Node::Number(v) => Quantity::Number(*v),
        Node::Length(v, unit) => Quantity::Px(unit.to_px(*v, ctx)),
        Node::Neg(inner) => match eval(inner, ctx)? {
            Quantity::Number(v) => Quantity::Number(-v),
            Quantity::Px(v) => Quantity::Px(-v),
        },
        Node::Binary(op, l, r) => {
            let (l, r) = (eval(l, ctx)?, eval(r, ctx)?);
            match (*op, l, r) {
                (BinOp::Add, Quantity::Px(a), Quantity::Px(b)) => Quantity::Px(a + b),
                (BinOp::Sub, Quantity::Px(a), Quantity::Px(b)) => Quantity::Px(a - b),
                (BinOp::Add, Quantity::Number(a), Quantity::Number(b)) => Quantity::Number(a + b),
                (BinOp::Sub, Quantity::Number(a), Quantity::Number(b)) => Quantity::Number(a - b),
                (BinOp::Add | BinOp::Sub, _, _) => {
                    return Err(err("cannot add or subtract a number and a length"));
                }
                (BinOp::Mul, Quantity::Number(a), Quantity::Number(b)) => Quantity::Number(a * b),
                (BinOp::Mul, Quantity::Px(a), Quantity::Number(b))
                | (BinOp::Mul, Quantity::Number(b), Quantity::Px(a)) => Quantity::Px(a * b),
                (BinOp::Mul, Quantity::Px(_), Quantity::Px(_)) => {
                    return Err(err("cannot multiply two lengths"));
                }
                (BinOp::Div, _, Quantity::Px(_)) => {
                    return Err(err("divisor must be a number"));
                }
                (BinOp::Div, _, Quantity::Number(b)) if b == 0.0 => {
                    return Err(err("division by zero"));
                }
                (BinOp::Div, Quantity::Px(a), Quantity::Number(b)) => Quantity::Px(a / b),
                (BinOp::Div, Quantity::Number(a), Quantity::Number(b)) => Quantity::Number(a / b),
            }
        }
        Node::Call(func, args) => {
            let vals = args
                .iter()
                .map(|a| eval(a, ctx))
                .collect::<FuzzResult<Vec<_>>>()?;
            let all_px = vals.iter().all(|v| matches!(v, Quantity::Px(_)));
            let all_num = vals.iter().all(|v| matches!(v, Quantity::Number(_)));
            if !all_px && !all_num {
                return Err(err("function arguments mix numbers and lengths"));
            }
            let raw: Vec<f64> = vals
                .iter()
                .map(|v| match v {
                    Quantity::Number(x) | Quantity::Px(x) => *x,
                })
                .collect();
            let out = match func {
                Func::Calc => raw[0],
                Func::Min => raw.iter().copied().fold(f64::INFINITY, f64::min),
                Func::Max => raw.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                // CSS: the minimum wins when it exceeds the maximum.
                Func::Clamp => raw[0].max(raw[1].min(raw[2])),
            };
            if all_px {
                Quantity::Px(out)
            } else {
                Quantity::Number(out)
            }
        }
    })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn error(&self, msg: impl std::fmt::Display) -> FuzzError {
        FuzzError::validation(format!("length expression at {}: {msg}", self.peek().pos))
    }

    fn expect(&mut self, kind: TokenKind) -> FuzzResult<()> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected {kind:?}, found {:?}", self.peek().kind)))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_sum(&mut self) -> FuzzResult<Node> {
        let mut e = self.parse_product()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(e),
            };
            self.bump();
            let r = self.parse_product()?;
            e = Node::Binary(op, Box::new(e), Box::new(r));
        }
    }

    fn parse_product(&mut self) -> FuzzResult<Node> {
        let mut e = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => return Ok(e),
            };
            self.bump();
            let r = self.parse_unary()?;
            e = Node::Binary(op, Box::new(e), Box::new(r));
        }
    }

    fn parse_unary(&mut self) -> FuzzResult<Node> {
        if self.consume(TokenKind::Minus) {
            return Ok(Node::Neg(Box::new(self.parse_unary()?)));
        }
        if self.consume(TokenKind::Plus) {
            return self.parse_unary();
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> FuzzResult<Node> {
        let tok = self.bump();
        match tok.kind {
            TokenKind::Number(v) => Ok(Node::Number(v)),
            TokenKind::Dimension(v, unit) => Unit::parse(&unit)
                .map(|u| Node::Length(v, u))
                .ok_or_else(|| {
                    FuzzError::validation(format!(
                        "length expression at {}: unknown unit \"{unit}\"",
                        tok.pos
                    ))
                }),
            TokenKind::LParen => {
                let e = self.parse_sum()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            TokenKind::Ident(name) => {
                let func = match name.as_str() {
                    "calc" => Func::Calc,
                    "min" => Func::Min,
                    "max" => Func::Max,
                    "clamp" => Func::Clamp,
                    _ => {
                        return Err(FuzzError::validation(format!(
                            "length expression at {}: unknown function \"{name}\"",
                            tok.pos
                        )));
                    }
                };
                self.expect(TokenKind::LParen)?;
                let mut args = vec![self.parse_sum()?];
                while self.consume(TokenKind::Comma) {
                    args.push(self.parse_sum()?);
                }
                self.expect(TokenKind::RParen)?;

                let arity_ok = match func {
                    Func::Calc => args.len() == 1,
                    Func::Clamp => args.len() == 3,
                    Func::Min | Func::Max => !args.is_empty(),
                };
                if !arity_ok {
                    return Err(FuzzError::validation(format!(
                        "length expression at {}: wrong number of arguments to {name}()",
                        tok.pos
                    )));
                }
                Ok(Node::Call(func, args))
            }
            other => Err(FuzzError::validation(format!(
                "length expression at {}: unexpected {other:?}",
                tok.pos
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/length.rs"]
mod tests;
