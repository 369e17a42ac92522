//! Глобальный подписчик tracing ставится один раз на процесс, поэтому
//! проверки `init_logging` живут в отдельном тестовом бинарнике.

use serial_test::serial;
use topical::{init_logging, LogFormat, LoggingConfig, LoggingError};

fn quiet_config() -> LoggingConfig {
    LoggingConfig {
        level: "warn".to_string(),
        format: LogFormat::Compact,
        with_target: true,
        with_ansi: false,
    }
}

/// Тест проверяет, что повторная инициализация возвращает
/// `AlreadyInitialized`, а не паникует.
#[test]
#[serial]
fn test_init_logging_twice_is_error() {
    std::env::remove_var("TOPICAL_LOG_LEVEL");
    std::env::remove_var("TOPICAL_LOG_FORMAT");
    std::env::remove_var("RUST_LOG");

    init_logging(quiet_config()).unwrap();

    let err = init_logging(quiet_config()).unwrap_err();
    assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
}

/// Тест проверяет, что некорректная директива отклоняется до установки
/// подписчика.
#[test]
#[serial]
fn test_init_logging_invalid_directive() {
    std::env::remove_var("TOPICAL_LOG_LEVEL");
    std::env::remove_var("RUST_LOG");

    let config = LoggingConfig {
        level: "topical=[[".to_string(),
        ..quiet_config()
    };

    let err = init_logging(config).unwrap_err();
    assert!(matches!(err, LoggingError::InvalidDirective { .. }));
}
