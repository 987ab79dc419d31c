//! Diagnostic logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr so log lines never
//! mix with command output on stdout.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter (e.g. `tally=debug`)
pub const LOG_ENV_VAR: &str = "TALLY_LOG";

const DEFAULT_DIRECTIVE: &str = "tally=warn";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber may already be installed by an embedding application.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::debug!("tracing initialized twice without panicking");
    }
}
