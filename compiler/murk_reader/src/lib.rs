//! Murk Reader - turns source text into murk values.
//!
//! The reader is a thin front end: it lexes with `logos` and builds forms
//! directly as [`murk_value::Value`]s, with no separate syntax tree.
//!
//! ```text
//! 42  -7  123456789012345678901234567890   ; integers (bigint on overflow)
//! 1/3  2.5  .5  1e3                        ; ratios and floats
//! "text\n"  foo  print!  nil  #t  #f       ; strings, symbols, constants
//! (a b . c)  'x  `(a ,b ,@c)               ; lists and quote shorthand
//! #unknown  #any-of(1 2 3)                 ; uncertainty literals
//! ```

mod error;
mod literal;
mod parser;
mod raw_token;
mod span;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
pub use span::Span;
