use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Формат вывода логов.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Одна JSON-запись на строку
    Json,
    /// Многострочный человекочитаемый вывод
    Pretty,
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        };
        f.write_str(name)
    }
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Уровень или директива фильтра (`info`, `topical=debug,warn`)
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Печатать target события
    #[serde(default = "default_true")]
    pub with_target: bool,
    /// Цветной вывод
    #[serde(default = "default_true")]
    pub with_ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_target: true,
            with_ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Переопределяет поля из `TOPICAL_LOG_LEVEL` и `TOPICAL_LOG_FORMAT`.
    ///
    /// Нераспознанный формат игнорируется с предупреждением в stderr:
    /// подписчик tracing в этот момент ещё не установлен.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("TOPICAL_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.level = level.trim().to_string();
            }
        }

        if let Ok(format) = env::var("TOPICAL_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(err) => eprintln!("TOPICAL_LOG_FORMAT ignored: {err}"),
            }
        }
    }

    /// Директива для `EnvFilter`.
    pub fn build_filter_directive(&self) -> String {
        self.level.clone()
    }
}
