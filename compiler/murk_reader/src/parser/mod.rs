//! S-expression parser.
//!
//! Works on an explicit frame stack rather than the call stack, so deeply
//! nested input cannot overflow it. Each open `(`, `#any-of(` or quote prefix
//! pushes a frame; completed values are delivered to the innermost frame.

use logos::Logos;
use murk_value::{any_of, Value};

use crate::error::{ParseError, ParseErrorKind};
use crate::literal::{classify_atom, unescape};
use crate::raw_token::RawToken;
use crate::span::Span;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Where a list stands with respect to a dotted tail.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Dot {
    None,
    /// Saw `.`, waiting for the tail value.
    Pending(Span),
    /// Tail stored; only `)` may follow.
    Done,
}

enum Frame {
    List {
        items: Vec<Value>,
        tail: Value,
        dot: Dot,
        open: Span,
    },
    AnyOf {
        items: Vec<Value>,
        open: Span,
    },
    Prefix {
        symbol: &'static str,
        at: Span,
    },
}

struct Parser<'src> {
    source: &'src str,
    stack: Vec<Frame>,
    forms: Vec<Value>,
}

/// Parse every top-level form in `source`.
pub fn parse(source: &str) -> Result<Vec<Value>, ParseError> {
    let mut parser = Parser {
        source,
        stack: Vec::new(),
        forms: Vec::new(),
    };
    let mut lexer = RawToken::lexer(source);
    while let Some(token) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match token {
            Ok(token) => parser.token(token, lexer.slice(), span)?,
            Err(()) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidToken,
                    format!("invalid token `{}`", lexer.slice()),
                    span,
                ))
            }
        }
    }
    parser.finish()
}

impl Parser<'_> {
    fn token(&mut self, token: RawToken, text: &str, span: Span) -> Result<(), ParseError> {
        match token {
            RawToken::LParen => self.stack.push(Frame::List {
                items: Vec::new(),
                tail: Value::Nil,
                dot: Dot::None,
                open: span,
            }),
            RawToken::AnyOfOpen => self.stack.push(Frame::AnyOf {
                items: Vec::new(),
                open: span,
            }),
            RawToken::Quote => self.prefix("quote", span),
            RawToken::Quasiquote => self.prefix("quasiquote", span),
            RawToken::Unquote => self.prefix("unquote", span),
            RawToken::UnquoteSplicing => self.prefix("unquote-splicing", span),
            RawToken::RParen => self.close(span)?,
            RawToken::True => self.deliver(Value::boolean(true), span)?,
            RawToken::False => self.deliver(Value::boolean(false), span)?,
            RawToken::Unknown => self.deliver(Value::unknown(), span)?,
            RawToken::Str => {
                let body = &text[1..text.len() - 1];
                self.deliver(Value::string(unescape(body, span)?), span)?;
            }
            RawToken::Atom if text == "." => self.dot(span)?,
            RawToken::Atom => self.deliver(classify_atom(text, span)?, span)?,
            RawToken::LineComment => {}
        }
        Ok(())
    }

    fn prefix(&mut self, symbol: &'static str, at: Span) {
        self.stack.push(Frame::Prefix { symbol, at });
    }

    fn dot(&mut self, span: Span) -> Result<(), ParseError> {
        match self.stack.last_mut() {
            Some(Frame::List { items, dot, .. }) if !items.is_empty() && *dot == Dot::None => {
                *dot = Dot::Pending(span);
                Ok(())
            }
            _ => Err(ParseError::new(
                ParseErrorKind::MisplacedDot,
                "unexpected `.`",
                span,
            )),
        }
    }

    /// Hand a completed value to the innermost open frame, applying any
    /// pending quote prefixes first.
    fn deliver(&mut self, mut value: Value, span: Span) -> Result<(), ParseError> {
        loop {
            match self.stack.last_mut() {
                Some(Frame::Prefix { symbol, .. }) => {
                    let symbol = *symbol;
                    value = Value::list([Value::symbol(symbol), value]);
                    self.stack.pop();
                }
                None => {
                    self.forms.push(value);
                    return Ok(());
                }
                Some(Frame::AnyOf { items, .. }) => {
                    items.push(value);
                    return Ok(());
                }
                Some(Frame::List {
                    items, tail, dot, ..
                }) => {
                    match *dot {
                        Dot::None => items.push(value),
                        Dot::Pending(_) => {
                            *tail = value;
                            *dot = Dot::Done;
                        }
                        Dot::Done => {
                            return Err(ParseError::new(
                                ParseErrorKind::MisplacedDot,
                                "only one value may follow `.`",
                                span,
                            ))
                        }
                    }
                    return Ok(());
                }
            }
        }
    }

    fn close(&mut self, span: Span) -> Result<(), ParseError> {
        let value = match self.stack.pop() {
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCloseParen,
                    "unexpected `)`",
                    span,
                ))
            }
            Some(Frame::Prefix { symbol, at }) => return Err(missing_operand(symbol, at)),
            Some(Frame::List {
                dot: Dot::Pending(at),
                ..
            }) => {
                return Err(ParseError::new(
                    ParseErrorKind::MisplacedDot,
                    "expected a value after `.`",
                    at,
                ))
            }
            Some(Frame::List { items, tail, .. }) => Value::list_with_tail(items, tail),
            Some(Frame::AnyOf { items, open }) => any_of(items).map_err(|_| {
                ParseError::new(
                    ParseErrorKind::EmptyAnyOf,
                    "#any-of needs at least one candidate",
                    open.merge(span),
                )
            })?,
        };
        self.deliver(value, span)
    }

    fn finish(mut self) -> Result<Vec<Value>, ParseError> {
        match self.stack.pop() {
            None => Ok(self.forms),
            Some(Frame::Prefix { symbol, at }) => Err(missing_operand(symbol, at)),
            Some(Frame::List { open, .. } | Frame::AnyOf { open, .. }) => {
                let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
                Err(ParseError::new(
                    ParseErrorKind::UnterminatedList,
                    "unterminated list",
                    open.merge(Span::point(end)),
                ))
            }
        }
    }
}

fn missing_operand(symbol: &str, at: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::MissingOperand,
        format!("expected an expression after `{symbol}` shorthand"),
        at,
    )
}
