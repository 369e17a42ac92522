//! Загрузка настроек издателя.

mod settings;

pub use settings::PublisherSettings;
