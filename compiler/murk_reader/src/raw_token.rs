//! Raw Token Definition
//!
//! Numbers, symbols and `.` all lex as [`RawToken::Atom`]; the parser
//! classifies the text. Keeping them in one pattern avoids overlapping
//! regexes.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r";[^\n]*", logos::skip)]
    LineComment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("'")]
    Quote,
    #[token("`")]
    Quasiquote,
    #[token(",")]
    Unquote,
    #[token(",@")]
    UnquoteSplicing,

    #[token("#t")]
    True,
    #[token("#f")]
    False,
    #[token("#unknown")]
    Unknown,
    #[token("#any-of(")]
    AnyOfOpen,

    #[regex(r#""([^"\\]|\\[\s\S])*""#)]
    Str,

    #[regex(r#"[^\s()'"`,;#][^\s()'"`,;]*"#)]
    Atom,
}
