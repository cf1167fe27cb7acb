//! Error types shared by the value algebra and the evaluator.
//!
//! `EvalErrorKind` carries the structured category; factory functions such as
//! [`division_by_zero`] fill in both `kind` and the rendered `message`.

use crate::value::Value;
use std::fmt;


/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    NotCallable {
        type_name: String,
    },

    // Access
    UnboundVariable {
        name: String,
    },
    ImmutableBinding {
        name: String,
    },

    // Function
    ArityMismatch {
        name: String,
        min: usize,
        max: Option<usize>,
        got: usize,
    },
    InvalidLambdaList {
        reason: String,
    },
    MalformedForm {
        form: String,
        reason: String,
    },

    // Purity
    ImpureCallInPureContext {
        name: String,
    },

    // Uncertainty
    UncertainBranchCondition {
        condition: String,
    },
    InvalidAnyOf,
    InvalidRange {
        reason: String,
    },
    InvalidTypedUnknown {
        reason: String,
    },
    /// An intersection query fell through every rule. Indicates a gap in the
    /// value model rather than a user mistake.
    IntersectionUnresolvable {
        left: String,
        right: String,
    },

    // Reader
    Parse {
        label: String,
        message: String,
    },

    /// Catch-all for errors without a structured category.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// Internal invariant violations, as opposed to errors in the program
    /// being evaluated.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::IntersectionUnresolvable { .. })
    }

    #[inline]
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::UnboundVariable { .. })
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),

            Self::UnboundVariable { name } => write!(f, "unbound variable: {name}"),
            Self::ImmutableBinding { name } => {
                write!(f, "cannot assign to constant: {name}")
            }

            Self::ArityMismatch {
                name,
                min,
                max,
                got,
            } => {
                let expected = match max {
                    Some(max) if max == min => format!("{min}"),
                    Some(max) => format!("between {min} and {max}"),
                    None => format!("at least {min}"),
                };
                let arg_word = if *min == 1 && *max == Some(1) {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::InvalidLambdaList { reason } => write!(f, "invalid lambda list: {reason}"),
            Self::MalformedForm { form, reason } => write!(f, "malformed {form}: {reason}"),

            Self::ImpureCallInPureContext { name } => {
                write!(f, "cannot call impure `{name}` in a pure context")
            }

            Self::UncertainBranchCondition { condition } => {
                write!(f, "branch condition `{condition}` may be either true or false")
            }
            Self::InvalidAnyOf => write!(f, "any-of requires at least one candidate"),
            Self::InvalidRange { reason } => write!(f, "invalid range: {reason}"),
            Self::InvalidTypedUnknown { reason } => write!(f, "invalid typed unknown: {reason}"),
            Self::IntersectionUnresolvable { left, right } => {
                write!(f, "cannot decide whether `{left}` and `{right}` intersect")
            }

            Self::Parse { label, message } => write!(f, "{label}: {message}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message. Equals `kind.to_string()` for factory errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    #[inline]
    pub fn is_defect(&self) -> bool {
        self.kind.is_defect()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// A value did not have the capability an operation needed.
#[cold]
pub fn type_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    })
}

#[cold]
pub fn expected_number(got: &Value) -> EvalError {
    type_mismatch("number", got)
}

#[cold]
pub fn expected_symbol(got: &Value) -> EvalError {
    type_mismatch("symbol", got)
}

#[cold]
pub fn expected_proper_list(got: &Value) -> EvalError {
    type_mismatch("proper list", got)
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name().to_string(),
    })
}

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn immutable_binding(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableBinding {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, min: usize, max: Option<usize>, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        min,
        max,
        got,
    })
}

#[cold]
pub fn invalid_lambda_list(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLambdaList {
        reason: reason.into(),
    })
}

#[cold]
pub fn malformed_form(form: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedForm {
        form: form.to_string(),
        reason: reason.into(),
    })
}

#[cold]
pub fn impure_call_in_pure_context(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImpureCallInPureContext {
        name: name.to_string(),
    })
}

#[cold]
pub fn uncertain_branch_condition(condition: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UncertainBranchCondition {
        condition: condition.to_string(),
    })
}

#[cold]
pub fn invalid_any_of() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAnyOf)
}

#[cold]
pub fn invalid_range(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRange {
        reason: reason.into(),
    })
}

#[cold]
pub fn invalid_typed_unknown(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidTypedUnknown {
        reason: reason.into(),
    })
}

#[cold]
pub fn intersection_unresolvable(left: &Value, right: &Value) -> EvalError {
    tracing::warn!(%left, %right, "intersection query fell through every rule");
    EvalError::from_kind(EvalErrorKind::IntersectionUnresolvable {
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn parse_error(label: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Parse {
        label: label.to_string(),
        message: message.into(),
    })
}
