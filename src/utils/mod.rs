pub mod build_info;
pub mod persistence;

use std::{env, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "leave_ledger=info";

/// Initializes the global tracing subscriber. `RUST_LOG` wins when set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(log_filter(directives.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Filter from user directives, or the crate default when they are absent or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
