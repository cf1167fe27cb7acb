//! Process-wide knobs for the uncertainty model.
//!
//! Values are built without a handle to any interpreter, so the limits live
//! in a global. Read it with [`UncertaintyConfig::current`]; change it with
//! [`UncertaintyConfig::install`] (usually via `SessionBuilder`).

use std::sync::atomic::{AtomicUsize, Ordering};

/// Environment variable overriding [`DEFAULT_MAX_ANY_OF`].
pub const MAX_ANY_OF_ENV: &str = "MURK_MAX_ANY_OF";

/// Candidate sets larger than this widen to the fully unknown value.
pub const DEFAULT_MAX_ANY_OF: usize = 64;

static MAX_ANY_OF: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_ANY_OF);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UncertaintyConfig {
    /// Upper bound on the number of `any-of` candidates.
    pub max_any_of: usize,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        UncertaintyConfig {
            max_any_of: DEFAULT_MAX_ANY_OF,
        }
    }
}

impl UncertaintyConfig {
    /// Defaults, overridden by `MURK_MAX_ANY_OF` when it parses as a
    /// positive integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(MAX_ANY_OF_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_any_of = n,
                _ => tracing::warn!(value = %raw, "ignoring invalid {MAX_ANY_OF_ENV}"),
            }
        }
        config
    }

    /// The active configuration.
    pub fn current() -> Self {
        UncertaintyConfig {
            max_any_of: MAX_ANY_OF.load(Ordering::Relaxed),
        }
    }

    /// Make this configuration active for the whole process.
    pub fn install(self) {
        tracing::debug!(max_any_of = self.max_any_of, "installing uncertainty config");
        MAX_ANY_OF.store(self.max_any_of.max(1), Ordering::Relaxed);
    }
}
