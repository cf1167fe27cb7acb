//! Serialized evaluation sessions.

use parking_lot::Mutex;

use murk_value::{Environment, EvalError, EvalResult, UncertaintyConfig};

use crate::builtins::standard_environment;
use crate::run::run;

/// Source of the standard macros (`when`, `unless`).
pub const PRELUDE: &str = include_str!("prelude.murk");

/// An environment plus a lock, so concurrent callers take turns running
/// top-level forms.
pub struct Session {
    env: Mutex<Environment>,
}

impl Session {
    /// A session over the standard environment with the prelude loaded.
    pub fn new() -> Result<Self, EvalError> {
        SessionBuilder::new().build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Run source text under the session lock.
    pub fn run(&self, label: &str, source: &[u8]) -> EvalResult {
        let env = self.env.lock();
        run(&env, label, source)
    }

    /// Run a string labelled `<eval>`.
    pub fn eval_str(&self, source: &str) -> EvalResult {
        self.run("<eval>", source.as_bytes())
    }

    /// Handle to the session's root environment.
    pub fn environment(&self) -> Environment {
        self.env.lock().clone()
    }
}

/// Builder for [`Session`].
#[derive(Default)]
pub struct SessionBuilder {
    env: Option<Environment>,
    uncertainty: Option<UncertaintyConfig>,
    no_prelude: bool,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the uncertainty limits from the process environment
    /// (`MURK_MAX_ANY_OF`).
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            uncertainty: Some(UncertaintyConfig::from_env()),
            ..Self::default()
        }
    }

    /// Start from this environment instead of a fresh standard one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Cap on `any-of` candidates. The setting is process-wide and takes
    /// effect when the session is built.
    #[must_use]
    pub fn max_any_of(mut self, max: usize) -> Self {
        self.uncertainty = Some(UncertaintyConfig { max_any_of: max });
        self
    }

    /// Whether to load the prelude macros (default: yes).
    #[must_use]
    pub fn prelude(mut self, enabled: bool) -> Self {
        self.no_prelude = !enabled;
        self
    }

    pub fn build(self) -> Result<Session, EvalError> {
        if let Some(config) = self.uncertainty {
            config.install();
        }
        let env = self.env.unwrap_or_else(standard_environment);
        if !self.no_prelude {
            run(&env, "prelude", PRELUDE.as_bytes())?;
        }
        Ok(Session {
            env: Mutex::new(env),
        })
    }
}
