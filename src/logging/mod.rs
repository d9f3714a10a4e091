use env_logger::Builder;
use log::LevelFilter;

use crate::config;

/// Initialize the process-wide logger from the configuration's log section.
/// A `RUST_LOG` directive in the environment overrides the configured level.
pub fn init(config: &config::Log) {
    let level = config
        .level
        .as_deref()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    Builder::new()
        .filter(None, level)
        .parse_env(env_logger::Env::default())
        .init();
}
