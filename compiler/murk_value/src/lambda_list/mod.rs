//! Parameter lists for functions and macros.
//!
//! ```text
//! (a b)                       ; required
//! (a &optional b (c 10))      ; optional, with or without a default
//! (a &rest more)              ; rest collector
//! (a . more)                  ; dotted tail: same as &rest
//! ```
//!
//! `&rest` must be second to last, followed by exactly one symbol.

use std::fmt;

use crate::errors::{invalid_lambda_list, EvalError};
use crate::name::Name;
use crate::callable::Arity;
use crate::value::Value;


pub const OPTIONAL_MARKER: &str = "&optional";
pub const REST_MARKER: &str = "&rest";

/// An optional parameter and its default expression (nil if absent).
#[derive(Clone, Debug)]
pub struct OptionalParam {
    pub name: Name,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, Default)]
pub struct LambdaList {
    required: Vec<Name>,
    optional: Vec<OptionalParam>,
    rest: Option<Name>,
}

impl LambdaList {
    pub fn required(&self) -> &[Name] {
        &self.required
    }

    pub fn optional(&self) -> &[OptionalParam] {
        &self.optional
    }

    pub fn rest(&self) -> Option<Name> {
        self.rest
    }

    pub fn arity(&self) -> Arity {
        let min = self.required.len();
        match self.rest {
            Some(_) => Arity::at_least(min),
            None => Arity::between(min, min + self.optional.len()),
        }
    }

    /// Every parameter name in binding order.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.required
            .iter()
            .copied()
            .chain(self.optional.iter().map(|p| p.name))
            .chain(self.rest)
    }

    /// Parse a parameter list form.
    pub fn parse(spec: &Value) -> Result<LambdaList, EvalError> {
        let mut items = spec.iter();
        let entries: Vec<&Value> = items.by_ref().collect();
        let dotted_rest = match items.rest() {
            Value::Nil => None,
            Value::Symbol(name) if !is_marker(*name) => Some(*name),
            other => {
                return Err(invalid_lambda_list(format!(
                    "dotted tail must be a symbol, got {other}"
                )))
            }
        };

        let mut list = LambdaList::default();
        let mut in_optional = false;
        let mut i = 0;
        while i < entries.len() {
            let entry = entries[i];
            match entry {
                Value::Symbol(name) if name.is(OPTIONAL_MARKER) => {
                    if in_optional {
                        return Err(invalid_lambda_list("&optional appears twice"));
                    }
                    in_optional = true;
                }
                Value::Symbol(name) if name.is(REST_MARKER) => {
                    if i + 2 != entries.len() {
                        return Err(invalid_lambda_list(
                            "&rest must be followed by exactly one parameter",
                        ));
                    }
                    list.rest = Some(plain_symbol(entries[i + 1])?);
                    i += 1;
                }
                Value::Symbol(name) if in_optional => list.optional.push(OptionalParam {
                    name: *name,
                    default: None,
                }),
                Value::Symbol(name) => list.required.push(*name),
                Value::Cons(_) if in_optional => list.optional.push(optional_with_default(entry)?),
                other => {
                    return Err(invalid_lambda_list(format!(
                        "unexpected `{other}` in parameter list"
                    )))
                }
            }
            i += 1;
        }

        if let Some(name) = dotted_rest {
            if list.rest.is_some() {
                return Err(invalid_lambda_list("both &rest and a dotted tail"));
            }
            list.rest = Some(name);
        }
        list.check_unique()?;
        Ok(list)
    }

    fn check_unique(&self) -> Result<(), EvalError> {
        let names: Vec<Name> = self.names().collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(invalid_lambda_list(format!("duplicate parameter `{name}`")));
            }
        }
        Ok(())
    }
}

fn is_marker(name: Name) -> bool {
    name.is(OPTIONAL_MARKER) || name.is(REST_MARKER)
}

fn plain_symbol(value: &Value) -> Result<Name, EvalError> {
    match value {
        Value::Symbol(name) if !is_marker(*name) => Ok(*name),
        other => Err(invalid_lambda_list(format!(
            "expected a parameter name, got `{other}`"
        ))),
    }
}

/// `(name default)` or `(name)`.
fn optional_with_default(entry: &Value) -> Result<OptionalParam, EvalError> {
    let parts = entry
        .to_vec()
        .map_err(|_| invalid_lambda_list(format!("malformed optional parameter `{entry}`")))?;
    match parts.as_slice() {
        [name] => Ok(OptionalParam {
            name: plain_symbol(name)?,
            default: None,
        }),
        [name, default] => Ok(OptionalParam {
            name: plain_symbol(name)?,
            default: Some(default.clone()),
        }),
        _ => Err(invalid_lambda_list(format!(
            "optional parameter `{entry}` must be (name default)"
        ))),
    }
}

impl fmt::Display for LambdaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.required.iter().map(ToString::to_string).collect();
        if !self.optional.is_empty() {
            parts.push(OPTIONAL_MARKER.to_string());
            for p in &self.optional {
                parts.push(match &p.default {
                    Some(d) => format!("({} {d})", p.name),
                    None => p.name.to_string(),
                });
            }
        }
        if let Some(rest) = self.rest {
            parts.push(REST_MARKER.to_string());
            parts.push(rest.to_string());
        }
        write!(f, "({})", parts.join(" "))
    }
}
