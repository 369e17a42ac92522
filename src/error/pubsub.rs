use thiserror::Error;

/// Ошибки модели топиков.
///
/// Возникают только на динамической границе (строковое имя топика,
/// `serde_json::Value` вместо типизированного payload). Типизированные
/// сообщения проверяются компилятором и этих ошибок не порождают.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubSubError {
    #[error("unknown topic `{topic}`")]
    UnknownTopic { topic: String },

    #[error("payload does not match topic `{topic}`: {reason}")]
    PayloadMismatch { topic: &'static str, reason: String },
}

impl PubSubError {
    pub fn unknown_topic(topic: impl Into<String>) -> Self {
        PubSubError::UnknownTopic {
            topic: topic.into(),
        }
    }

    pub fn payload_mismatch(
        topic: &'static str,
        reason: impl ToString,
    ) -> Self {
        PubSubError::PayloadMismatch {
            topic,
            reason: reason.to_string(),
        }
    }

    /// Имя топика, к которому относится ошибка.
    pub fn topic(&self) -> &str {
        match self {
            PubSubError::UnknownTopic { topic } => topic,
            PubSubError::PayloadMismatch { topic, .. } => topic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_topic_display() {
        let err = PubSubError::unknown_topic("TopicZ");
        assert_eq!(err.to_string(), "unknown topic `TopicZ`");
        assert_eq!(err.topic(), "TopicZ");
    }

    #[test]
    fn test_payload_mismatch_display() {
        let err = PubSubError::payload_mismatch("TopicB", "invalid type: string, expected i64");
        assert_eq!(
            err.to_string(),
            "payload does not match topic `TopicB`: invalid type: string, expected i64"
        );
        assert_eq!(err.topic(), "TopicB");
    }

    #[test]
    fn test_payload_mismatch_from_serde_error() {
        let serde_err = serde_json::from_str::<i64>("\"nope\"").unwrap_err();
        let err = PubSubError::payload_mismatch("TopicB", &serde_err);
        match err {
            PubSubError::PayloadMismatch { topic, reason } => {
                assert_eq!(topic, "TopicB");
                assert_eq!(reason, serde_err.to_string());
            }
            _ => panic!("Expected PayloadMismatch"),
        }
    }
}
