//! Logging setup.
//!
//! Native builds install a `tracing` subscriber writing to stdout. On the
//! web nothing is installed and events are dropped.

/// Default filter: our crate at info, everything else warn.
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FILTER: &str = "warn,cube_dodge=info";

/// Install the global subscriber. Accepts `RUST_LOG` directives on top of
/// the default filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

    let format = fmt::format()
        .compact()
        .with_timer(fmt::time::uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer().event_format(format);

    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = std::env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("log subscriber already installed");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {}
