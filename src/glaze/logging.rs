//! Diagnostic logging setup for binaries built on this crate.
//!
//! Library code only emits `tracing` events. A binary calls [`init`] once to
//! route them to stderr, filtered by `GLAZE_LOG` (standard `EnvFilter`
//! directives such as `glaze=debug`).

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GLAZE_LOG";

/// Directive used when `GLAZE_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the stderr subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_default_level() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
