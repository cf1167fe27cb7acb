//! Reader errors.

use thiserror::Error;

use crate::span::Span;

/// What went wrong while reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input no token matches, including unterminated strings.
    InvalidToken,
    /// A `)` with no open list.
    UnexpectedCloseParen,
    /// End of input inside a list or `#any-of(`.
    UnterminatedList,
    /// A `.` outside a list, first in a list, or followed by zero or several values.
    MisplacedDot,
    /// `'`, `` ` ``, `,` or `,@` with nothing to apply to.
    MissingOperand,
    /// Text that starts like a number but is not one.
    InvalidNumber,
    /// Unknown backslash escape in a string.
    InvalidEscape,
    /// `#any-of()` with no candidates.
    EmptyAnyOf,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span,
        }
    }

    /// Message prefixed with the source label and a line/column position.
    pub fn render(&self, label: &str, source: &str) -> String {
        let (line, col) = self.span.line_col(source);
        format!("{label}:{line}:{col}: {}", self.message)
    }
}
