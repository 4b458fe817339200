//! Tracing subscriber for the `wordfreq` binary
//!
//! Stdout carries the report (chart or JSON), so every log line goes to
//! stderr. The library only emits events; nothing below `app` installs a
//! subscriber.

use crate::app::config::AppConfig;
use tracing::{debug, trace};

/// Install the global fmt subscriber for `config.verbose`
///
/// `-v` turns on per-source debug events, `-vv` adds targets, `-vvv` adds
/// thread ids and line numbers, which helps when following chunks across the
/// blocking pool.
pub fn init_logging(config: &AppConfig) {
    let detailed = config.verbose >= 3;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_level())
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2)
        .with_thread_ids(detailed)
        .with_line_number(detailed)
        .init();

    debug!(verbosity = config.verbose, format = ?config.format, "wordfreq logging ready");
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
