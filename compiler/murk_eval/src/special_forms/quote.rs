//! `quote` and `quasiquote`.

use murk_value::errors::malformed_form;
use murk_value::{ensure_sufficient_stack, Arity, Environment, EvalError, EvalResult, Value};

use super::expect_operands;
use crate::interpreter::eval;

const UNQUOTE: &str = "unquote";
const UNQUOTE_SPLICING: &str = "unquote-splicing";
const QUASIQUOTE: &str = "quasiquote";

/// `(quote datum)`
pub fn quote(_env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("quote", Arity::exact(1), operands)?;
    Ok(operands[0].clone())
}

/// `(quasiquote template)`
///
/// Copies the template, evaluating `(unquote x)` and splicing the elements
/// of `(unquote-splicing x)`. Nested quasiquotes raise the level; only
/// unquotes at level zero are evaluated. A dotted `(a . ,b)` evaluates `b`
/// as the tail.
pub fn quasiquote(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands(QUASIQUOTE, Arity::exact(1), operands)?;
    expand(env, &operands[0], 0)
}

/// If `form` is `(marker x)` for one of the quasiquote markers, the marker
/// name and `x`.
fn marker_form(form: &Value) -> Result<Option<(&'static str, &Value)>, EvalError> {
    let Some(cell) = form.as_cons() else {
        return Ok(None);
    };
    let Some(head) = cell.head().as_symbol() else {
        return Ok(None);
    };
    let marker = [UNQUOTE, UNQUOTE_SPLICING, QUASIQUOTE]
        .into_iter()
        .find(|m| head.is(m));
    let Some(marker) = marker else {
        return Ok(None);
    };
    match cell.tail().as_cons() {
        Some(rest) if rest.tail().is_nil() => Ok(Some((marker, rest.head()))),
        _ => Err(malformed_form(marker, "expects exactly one operand")),
    }
}

fn expand(env: &Environment, template: &Value, depth: usize) -> EvalResult {
    if let Some((marker, inner)) = marker_form(template)? {
        return match (marker, depth) {
            (UNQUOTE, 0) => eval(env, inner),
            (UNQUOTE_SPLICING, 0) => Err(malformed_form(
                UNQUOTE_SPLICING,
                "only allowed inside a list",
            )),
            (QUASIQUOTE, _) => rewrap(marker, expand_nested(env, inner, depth + 1)?),
            (_, _) => rewrap(marker, expand_nested(env, inner, depth - 1)?),
        };
    }
    if template.as_cons().is_none() {
        return Ok(template.clone());
    }

    let mut items = Vec::new();
    let mut cursor = template;
    let tail = loop {
        let Some(cell) = cursor.as_cons() else {
            break cursor.clone();
        };
        // `(a . ,b)` reads as `(a unquote b)`: the rest of the spine is the unquote.
        if !std::ptr::eq(cursor, template) && depth == 0 {
            if let Some((UNQUOTE, inner)) = marker_form(cursor)? {
                break eval(env, inner)?;
            }
        }
        match marker_form(cell.head())? {
            Some((UNQUOTE_SPLICING, inner)) if depth == 0 => {
                let spliced = eval(env, inner)?;
                items.extend(spliced.to_vec()?);
            }
            _ => items.push(expand_nested(env, cell.head(), depth)?),
        }
        cursor = cell.tail();
    };
    Ok(Value::list_with_tail(items, tail))
}

fn expand_nested(env: &Environment, template: &Value, depth: usize) -> EvalResult {
    ensure_sufficient_stack(|| expand(env, template, depth))
}

fn rewrap(marker: &str, inner: Value) -> EvalResult {
    Ok(Value::list([Value::symbol(marker), inner]))
}
