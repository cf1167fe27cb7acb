//! Atom classification and string escapes.

use murk_value::Value;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::{ParseError, ParseErrorKind};
use crate::span::Span;

/// Read an atom's text as nil, a number or a symbol.
///
/// Text that starts like a number (a digit, or a sign or `.` followed by a
/// digit) must parse as one.
pub(crate) fn classify_atom(text: &str, span: Span) -> Result<Value, ParseError> {
    if text == "nil" {
        return Ok(Value::Nil);
    }
    if !looks_numeric(text) {
        return Ok(Value::symbol(text));
    }
    parse_number(text).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidNumber,
            format!("malformed number `{text}`"),
            span,
        )
    })?
    .map_err(|reason| ParseError::new(ParseErrorKind::InvalidNumber, reason, span))
}

fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let unsigned = unsigned.strip_prefix('.').unwrap_or(unsigned);
    unsigned.starts_with(|c: char| c.is_ascii_digit())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `None` when the text is no number at all; `Some(Err)` when it is a
/// number with an invalid value.
fn parse_number(text: &str) -> Option<Result<Value, String>> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

    if is_digits(unsigned) {
        return Some(Ok(match text.parse::<i64>() {
            Ok(n) => Value::int(n),
            Err(_) => Value::integer(text.parse::<BigInt>().ok()?),
        }));
    }

    if let Some((numer, denom)) = unsigned.split_once('/') {
        if !is_digits(numer) || !is_digits(denom) {
            return None;
        }
        let (sign, _) = text.split_at(text.len() - unsigned.len());
        let numer = format!("{sign}{numer}").parse::<BigInt>().ok()?;
        let denom = denom.parse::<BigInt>().ok()?;
        if denom.is_zero() {
            return Some(Err(format!("ratio `{text}` has a zero denominator")));
        }
        return Some(Ok(Value::rational(BigRational::new(numer, denom))));
    }

    let is_float_shape = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if is_float_shape {
        return text.parse::<f64>().ok().map(|x| Ok(Value::float(x)));
    }
    None
}

/// Decode the body of a string literal (without its quotes).
pub(crate) fn unescape(body: &str, span: Span) -> Result<String, ParseError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidEscape,
                    format!("unknown escape `\\{other}`"),
                    span,
                ))
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidEscape,
                    "string ends with a lone backslash",
                    span,
                ))
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(text: &str) -> Value {
        classify_atom(text, Span::default()).unwrap()
    }

    #[test]
    fn integers() {
        assert_eq!(atom("42"), Value::int(42));
        assert_eq!(atom("-7"), Value::int(-7));
        assert_eq!(atom("+3"), Value::int(3));
        let big = atom("123456789012345678901234567890");
        assert_eq!(big.type_name(), "bigint");
    }

    #[test]
    fn ratios_normalize() {
        assert_eq!(atom("1/2").to_string(), "1/2");
        assert_eq!(atom("-2/4").to_string(), "-1/2");
        assert_eq!(atom("4/2"), Value::int(2));
        let err = classify_atom("1/0", Span::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
    }

    #[test]
    fn floats() {
        assert_eq!(atom("2.5"), Value::float(2.5));
        assert_eq!(atom(".5"), Value::float(0.5));
        assert_eq!(atom("-1e3"), Value::float(-1000.0));
    }

    #[test]
    fn symbols() {
        assert_eq!(atom("foo"), Value::symbol("foo"));
        assert_eq!(atom("+"), Value::symbol("+"));
        assert_eq!(atom("-"), Value::symbol("-"));
        assert_eq!(atom("..."), Value::symbol("..."));
        assert_eq!(atom("print!"), Value::symbol("print!"));
        assert_eq!(atom("nil"), Value::Nil);
        assert_eq!(atom("inf"), Value::symbol("inf"));
    }

    #[test]
    fn malformed_numbers() {
        for bad in ["1abc", "1.2.3", "-5x", "1/x"] {
            assert!(classify_atom(bad, Span::default()).is_err(), "{bad}");
        }
    }

    #[test]
    fn escapes() {
        assert_eq!(unescape(r#"a\nb\t\"c\"\\"#, Span::default()).unwrap(), "a\nb\t\"c\"\\");
        assert!(unescape(r"\q", Span::default()).is_err());
    }
}
