//! Diagnostics for the launcher and the bundler.
//!
//! Output goes to stderr so the interpreter's stdout stays untouched. The level is
//! taken from `PYALONE_LOG` (e.g. `PYALONE_LOG=debug`) and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "PYALONE_LOG";

/// Install the global tracing subscriber. Call once, at the start of `main`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
