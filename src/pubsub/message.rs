use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TopicMap;
use crate::PubSubError;

/// Сообщение в динамической форме: имя топика и JSON payload.
///
/// Используется там, где тип карты топиков неизвестен заранее (конфиги,
/// скрипты, межпроцессный обмен). Пара проверяется при
/// [`RawMessage::decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub topic: String,
    pub payload: Value,
}

impl RawMessage {
    pub fn new(
        topic: impl Into<String>,
        payload: impl Into<Value>,
    ) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    /// Превращает пару в типизированное сообщение карты `M`.
    ///
    /// # Ошибки
    /// - [`PubSubError::UnknownTopic`], если топика нет в карте;
    /// - [`PubSubError::PayloadMismatch`], если payload не подходит топику.
    pub fn decode<M: TopicMap>(self) -> Result<M, PubSubError> {
        M::from_parts(&self.topic, self.payload)
    }
}
