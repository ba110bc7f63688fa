#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the `debug`, `debug_span` and `trace` macros of
//! `tracing` are re-exported so engine code can write
//! `treesnap_core::debug!(..)` regardless of how the crate was built. Without the feature the same names resolve to no-op
//! macros and compile away.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], a one-call setup
//! for hosts that want newline-delimited JSON diagnostics of drag sessions.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

/// Environment variable holding the `EnvFilter` directives used by
/// [`init_json_subscriber`].
pub const LOG_FILTER_ENV: &str = "TREESNAP_LOG";

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// A no-op span for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Consume and enter the no-op span (does nothing).
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Install a global JSON subscriber filtered by [`LOG_FILTER_ENV`].
///
/// Falls back to `info` when the variable is unset or unparsable. Returns
/// `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
