//! Tracing subscriber setup.
//!
//! - `PORTAL_LOG` holds the filter directives.
//! - `PORTAL_LOG_FORMAT=json` switches to structured JSON lines.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,portal_core=debug,services=debug,storage=debug,ui=debug";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PORTAL_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("PORTAL_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
