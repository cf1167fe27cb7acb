//! Murk Value - runtime values and the uncertainty model for the murk interpreter.
//!
//! # Architecture
//!
//! - `Value`: immutable runtime values; heap variants share through [`Heap`]
//! - `Unknown`: uncertain values (fully unknown, `any-of`, numeric ranges,
//!   typed unknowns, optional conses)
//! - `Ternary`: three-valued logic returned by comparisons
//! - `logic`: [`equals`], [`intersects`] and [`truthiness`] over uncertain values
//! - `lift`: arithmetic and ordering lifted over uncertain operands
//! - `Environment`: lexical scopes with purity marking
//! - `Lambda`, `BuiltinFunction`, `SpecialForm`: callable values
//!
//! Evaluation lives in `murk_eval`; this crate has no notion of a program.

mod callable;
mod config;
mod env;
pub mod errors;
mod heap;
mod identity;
mod lambda_list;
pub mod lift;
mod logic;
mod name;
pub mod numeric;
mod range;
mod stack;
mod ternary;
mod type_set;
mod unknown;
mod value;
mod value_map;

pub use callable::{
    is_pure_name, Arity, BuiltinFn, BuiltinFunction, Lambda, SpecialForm, SpecialFormFn,
    IMPURE_MARKER,
};
pub use config::{UncertaintyConfig, DEFAULT_MAX_ANY_OF, MAX_ANY_OF_ENV};
pub use env::{AssignError, Environment, Mutability};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use heap::Heap;
pub use identity::{content_hash, dedup, same_value, DedupSet};
pub use lambda_list::{LambdaList, OptionalParam, OPTIONAL_MARKER, REST_MARKER};
pub use lift::{map_alternatives, CompareOp};
pub use logic::{equals, intersects, truthiness};
pub use name::{InternError, Name};
pub use numeric::{ArithOp, Numeric};
pub use range::{Bound, NumInRange, NumRange};
pub use stack::ensure_sufficient_stack;
pub use ternary::Ternary;
pub use type_set::TypeSet;
pub use unknown::{any_of, any_of_with_limit, possible_types, AnyOf, OptCons, Unknown};
pub use value::{type_names, Cons, ListIter, Value};
pub use value_map::ValueMap;
