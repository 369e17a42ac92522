use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

const DEFAULT_NAME: &str = "publisher";
const DEFAULT_CAPACITY: usize = 16;

/// Настройки издателя.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherSettings {
    /// Имя издателя в логах
    pub name: String,
    /// Начальная ёмкость реестра слушателей
    pub initial_capacity: usize,
}

impl PublisherSettings {
    /// Загружает настройки из переменных окружения `TOPICAL_*`
    /// (`TOPICAL_NAME`, `TOPICAL_INITIAL_CAPACITY`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_prefix("TOPICAL")
    }

    pub fn load_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Значения по умолчанию
            .set_default("name", DEFAULT_NAME)?
            .set_default("initial_capacity", DEFAULT_CAPACITY as i64)?
            // Переменные окружения с префиксом
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    fn clear_env() {
        env::remove_var("TOPICAL_TEST_NAME");
        env::remove_var("TOPICAL_TEST_INITIAL_CAPACITY");
    }

    /// Без переменных окружения загружаются значения по умолчанию.
    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();

        let settings = PublisherSettings::load_with_prefix("TOPICAL_TEST").unwrap();

        assert_eq!(settings, PublisherSettings::default());
    }

    /// Переменные окружения перекрывают значения по умолчанию.
    #[test]
    #[serial]
    fn test_load_env_overrides() {
        clear_env();
        env::set_var("TOPICAL_TEST_NAME", "orders");
        env::set_var("TOPICAL_TEST_INITIAL_CAPACITY", "128");

        let settings = PublisherSettings::load_with_prefix("TOPICAL_TEST").unwrap();
        clear_env();

        assert_eq!(settings.name, "orders");
        assert_eq!(settings.initial_capacity, 128);
    }

    /// Некорректная ёмкость даёт ошибку, а не панику.
    #[test]
    #[serial]
    fn test_load_invalid_capacity() {
        clear_env();
        env::set_var("TOPICAL_TEST_INITIAL_CAPACITY", "lots");

        let result = PublisherSettings::load_with_prefix("TOPICAL_TEST");
        clear_env();

        assert!(result.is_err());
    }
}
