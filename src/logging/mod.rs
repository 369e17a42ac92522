//! Настройка `tracing` для приложений, использующих издателя.
//!
//! Библиотека сама подписчика не ставит: она только пишет события через
//! макросы `tracing`. [`init_logging`] - готовая обвязка для бинарников и
//! тестов.

mod config;
mod filters;
mod formatter;

pub use config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::LoggingError;

/// Устанавливает глобальный подписчик `tracing` по конфигурации.
///
/// Порядок: переопределения из окружения, фильтр (`RUST_LOG` важнее
/// конфига), fmt-слой выбранного формата в stdout. Повторный вызов
/// возвращает [`LoggingError::AlreadyInitialized`].
pub fn init_logging(mut config: LoggingConfig) -> Result<(), LoggingError> {
    config.apply_env_overrides();

    let env_filter = filters::build_filter_from_config(&config)?;
    let layer = formatter::build_formatter(&config, std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = %config.format,
        "Logging system initialized"
    );

    Ok(())
}
