// 📜 Logging setup shared by both binaries
// RUST_LOG controls filtering; defaults to `info`

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Safe to call more than once.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
