use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

/// Install the stderr log subscriber. The filter comes from
/// `BRAINDUMP_LOG` and defaults to warnings only. Calling this twice is
/// harmless.
pub fn init(use_color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::WARN.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .try_init();
}
