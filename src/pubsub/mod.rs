//! Подсистема Publish–Subscribe (pub/sub) поверх [`crate::observable`].
//!
//! Внутрипроцессная рассылка типизированных сообщений с фильтрацией по
//! топикам:
//!
//! - `topic`: трейты [`Topic`] / [`TopicMap`] и макрос `topic_map!`.
//! - `message`: [`RawMessage`] - динамическая форма (имя топика + JSON).
//! - `subscriber`: трейт [`Subscriber`], подписчик на замыкании и запись
//!   реестра [`Listener`].
//! - `publisher`: [`Publisher`] - регистрация, публикация и статистика.

mod message;
mod publisher;
mod subscriber;
mod topic;

pub use message::RawMessage;
pub use publisher::Publisher;
pub use subscriber::{Listener, Subscriber, SubscriberFn};
pub use topic::{Topic, TopicMap};
