//! Murk Eval - evaluator for the murk language.
//!
//! # Architecture
//!
//! - `interpreter`: `eval`, `apply` and parameter binding, with purity checks
//! - `expand`: definition-time macro expansion
//! - `special_forms`: `if`, `let`, `lambda`, `defun`, `quasiquote`, ...
//! - `builtins`: registration helpers and the standard builtins
//! - `run`: parse and evaluate source text
//! - `session`: an environment behind a lock, built with `SessionBuilder`
//!
//! Values, environments and the uncertainty model come from `murk_value`;
//! source text is read by `murk_reader`.

pub mod builtins;
mod expand;
pub mod interpreter;
mod run;
mod session;
mod special_forms;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use std::sync::Once;

pub use builtins::{
    register_builtin0, register_builtin1, register_builtin2, register_special_form,
    register_variadic, standard_environment,
};
pub use expand::macroexpand_all;
pub use interpreter::{apply, eval, eval_body};
pub use run::run;
pub use session::{Session, SessionBuilder, PRELUDE};

pub use murk_value::{Environment, EvalError, EvalErrorKind, EvalResult, Ternary, Value};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
/// Enable with `RUST_LOG=murk_eval=debug` or `RUST_LOG=murk_value=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the embedder.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
