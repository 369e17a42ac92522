use std::{
    fmt::{Debug, Display},
    hash::Hash,
    str::FromStr,
};

use serde_json::Value;

use super::RawMessage;
use crate::PubSubError;

/// Идентификатор топика.
///
/// Генерируется макросом [`topic_map!`](crate::topic_map) как enum без
/// полей. `Display`/[`Topic::name`] дают имя топика, `FromStr` разбирает его
/// обратно.
pub trait Topic:
    Copy + Eq + Hash + Debug + Display + FromStr<Err = PubSubError> + Send + Sync + 'static
{
    /// Имя топика, как оно объявлено в карте.
    fn name(&self) -> &'static str;
}

/// Карта "топик → тип payload" в виде суммы типов.
///
/// Каждый вариант реализующего enum - это пара `(топик, payload)`, поэтому
/// сообщение с payload чужого типа собрать нельзя. Динамическая граница
/// ([`TopicMap::from_parts`], [`RawMessage`]) проверяет пару при
/// конструировании.
pub trait TopicMap: Sized + Send + Sync + 'static {
    type Topic: Topic;

    /// Все топики карты в порядке объявления.
    const TOPICS: &'static [Self::Topic];

    /// Топик, к которому относится сообщение.
    fn topic(&self) -> Self::Topic;

    /// Собирает сообщение из топика и JSON payload.
    fn from_json(
        topic: Self::Topic,
        payload: Value,
    ) -> Result<Self, PubSubError>;

    /// Сериализует payload сообщения в JSON.
    fn to_json(&self) -> Result<Value, PubSubError>;

    /// Собирает сообщение по строковому имени топика.
    fn from_parts(
        topic: &str,
        payload: Value,
    ) -> Result<Self, PubSubError> {
        let topic = topic.parse::<Self::Topic>()?;
        Self::from_json(topic, payload)
    }

    /// Переводит сообщение в динамическую форму.
    fn to_raw(&self) -> Result<RawMessage, PubSubError> {
        Ok(RawMessage::new(self.topic().name(), self.to_json()?))
    }
}

/// Объявляет карту топиков: enum топиков и enum сообщений.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use topical::{topic_map, Topic, TopicMap};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// pub struct Progress {
///     pub value: i64,
/// }
///
/// topic_map! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum JobMessage: JobTopic {
///         Started => String,
///         Progress => Progress,
///     }
/// }
///
/// let message = JobMessage::Progress(Progress { value: 42 });
/// assert_eq!(message.topic(), JobTopic::Progress);
/// assert_eq!(JobTopic::Started.name(), "Started");
/// assert_eq!(JobMessage::TOPICS, &[JobTopic::Started, JobTopic::Progress]);
/// assert!("Finished".parse::<JobTopic>().is_err());
/// ```
///
/// Payload каждого топика должен реализовывать `Serialize` и
/// `DeserializeOwned` (нужно для [`RawMessage`]).
#[macro_export]
macro_rules! topic_map {
    (
        $(#[$meta:meta])*
        $vis:vis enum $message:ident : $topic:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $payload:ty
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $topic {
            $($variant),+
        }

        impl $crate::Topic for $topic {
            fn name(&self) -> &'static str {
                match self {
                    $($topic::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::core::fmt::Display for $topic {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::Topic::name(self))
            }
        }

        impl ::core::str::FromStr for $topic {
            type Err = $crate::PubSubError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $(
                    if s == stringify!($variant) {
                        return ::core::result::Result::Ok($topic::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::PubSubError::unknown_topic(s))
            }
        }

        $(#[$meta])*
        $vis enum $message {
            $(
                $(#[$variant_meta])*
                $variant($payload)
            ),+
        }

        impl $crate::TopicMap for $message {
            type Topic = $topic;

            const TOPICS: &'static [$topic] = &[$($topic::$variant),+];

            fn topic(&self) -> $topic {
                match self {
                    $($message::$variant(_) => $topic::$variant),+
                }
            }

            fn from_json(
                topic: $topic,
                payload: $crate::__private::serde_json::Value,
            ) -> ::core::result::Result<Self, $crate::PubSubError> {
                match topic {
                    $(
                        $topic::$variant => $crate::__private::serde_json::from_value::<$payload>(payload)
                            .map($message::$variant)
                            .map_err(|err| $crate::PubSubError::payload_mismatch(stringify!($variant), err)),
                    )+
                }
            }

            fn to_json(
                &self,
            ) -> ::core::result::Result<$crate::__private::serde_json::Value, $crate::PubSubError> {
                match self {
                    $(
                        $message::$variant(payload) => $crate::__private::serde_json::to_value(payload)
                            .map_err(|err| $crate::PubSubError::payload_mismatch(stringify!($variant), err)),
                    )+
                }
            }
        }
    };
}
