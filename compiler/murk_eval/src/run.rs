//! Running source text.

use murk_value::errors::parse_error;
use murk_value::{Environment, EvalResult, Value};

use crate::expand::macroexpand_all;
use crate::interpreter::eval;

/// Parse `source` and evaluate each top-level form in `env`, returning the
/// last value (nil for empty input).
///
/// Each form is macro-expanded just before it runs, so macros defined by
/// earlier forms apply to later ones. Decoding and parse failures are
/// reported as `Parse` errors carrying `label`.
#[tracing::instrument(level = "debug", skip(env, source), fields(bytes = source.len()))]
pub fn run(env: &Environment, label: &str, source: &[u8]) -> EvalResult {
    let text = std::str::from_utf8(source)
        .map_err(|e| parse_error(label, format!("source is not valid UTF-8: {e}")))?;
    let forms = murk_reader::parse(text).map_err(|e| {
        let (line, col) = e.span.line_col(text);
        parse_error(label, format!("{line}:{col}: {}", e.message))
    })?;
    tracing::debug!(forms = forms.len(), "parsed");

    let mut result = Value::Nil;
    for form in &forms {
        let expanded = macroexpand_all(env, form)?;
        result = eval(env, &expanded).map_err(|err| {
            if err.is_defect() {
                tracing::error!(%err, %form, "uncertainty model defect");
            }
            err
        })?;
    }
    Ok(result)
}
