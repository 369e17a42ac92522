use tracing_subscriber::EnvFilter;

use crate::{logging::config::LoggingConfig, LoggingError};

/// Собирает фильтр: `RUST_LOG`, если задан, иначе директива из конфига.
///
/// Некорректная директива в конфиге - ошибка, а не тихий откат на `info`.
pub fn build_filter_from_config(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        return Ok(env_filter);
    }

    let directive = config.build_filter_directive();
    EnvFilter::try_new(&directive).map_err(|err| LoggingError::InvalidDirective {
        directive,
        reason: err.to_string(),
    })
}
