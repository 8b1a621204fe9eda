pub mod config;
pub mod errors;
pub mod logging;

pub use config::{AppConfig, LoggingConfig};
pub use errors::{BotError, Result};
pub use logging::init_logging;

pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
