use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_DIR;

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    let _ = fs::create_dir_all(LOG_DIR);

    // Daily rotation, JSON lines
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "scraper.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Console output shares stdout with the progress bar, so keep it compact
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard flushes on drop; the subscriber lives for the whole process
    std::mem::forget(guard);
}

/// RUST_LOG for everything else; our crate always logs at info.
fn env_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match "exo_scraper=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_enables_crate_at_info() {
        assert!(env_filter().to_string().contains("exo_scraper=info"));
    }
}
