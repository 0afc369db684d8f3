//! Logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging, honoring `RUST_LOG` and defaulting to info
pub fn initialize_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(false).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}
