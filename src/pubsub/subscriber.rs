use std::{fmt, sync::Arc};

use super::TopicMap;
use crate::observable::{ErrorHandler, Observer, ObserverError};

/// Подписчик: наблюдатель с фиксированным списком топиков.
///
/// Список задаётся при конструировании и больше не меняется; чтобы сменить
/// интерес, нужно отписаться и подписать новый экземпляр. По умолчанию
/// подписчик слушает все топики карты. Пустой список означает "ничего".
///
/// [`Publisher`](crate::Publisher) вызывает `next` только для топиков из
/// [`Subscriber::topics`]. Ошибки (`error`) по топикам не фильтруются.
pub trait Subscriber<M: TopicMap>: Observer<M> {
    /// Топики, на которые подписан подписчик.
    fn topics(&self) -> &[M::Topic] {
        M::TOPICS
    }

    /// Проверка принадлежности топика (дубликаты в списке не важны).
    fn is_subscribed(
        &self,
        topic: M::Topic,
    ) -> bool {
        self.topics().contains(&topic)
    }
}

/// Подписчик на замыкании.
///
/// ```rust
/// use topical::{topic_map, Publisher, SubscriberFn};
///
/// topic_map! {
///     #[derive(Debug, Clone)]
///     pub enum Chat: ChatTopic {
///         Message => String,
///         Typing => bool,
///     }
/// }
///
/// let publisher: Publisher<Chat> = Publisher::new();
/// let _handle = publisher.subscribe(SubscriberFn::arc([ChatTopic::Message], |message: &Chat| {
///     assert!(matches!(message, Chat::Message(_)));
/// }));
///
/// publisher.publish(Chat::Typing(true));
/// publisher.publish(Chat::Message("hello".into()));
/// ```
pub struct SubscriberFn<M: TopicMap, F> {
    topics: Box<[M::Topic]>,
    on_next: F,
    on_error: Option<ErrorHandler>,
}

impl<M, F> SubscriberFn<M, F>
where
    M: TopicMap,
    F: Fn(&M) + Send + Sync,
{
    /// Подписчик на указанные топики.
    pub fn new(
        topics: impl IntoIterator<Item = M::Topic>,
        on_next: F,
    ) -> Self {
        Self {
            topics: topics.into_iter().collect(),
            on_next,
            on_error: None,
        }
    }

    /// Подписчик на все топики карты.
    pub fn all(on_next: F) -> Self {
        Self::new(M::TOPICS.iter().copied(), on_next)
    }

    /// Создаёт подписчика сразу в `Arc`.
    pub fn arc(
        topics: impl IntoIterator<Item = M::Topic>,
        on_next: F,
    ) -> Arc<Self> {
        Arc::new(Self::new(topics, on_next))
    }

    /// Устанавливает обработчик ошибок. Без него ошибки пишутся в лог.
    pub fn with_error<E>(
        mut self,
        on_error: E,
    ) -> Self
    where
        E: Fn(&ObserverError) + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(on_error));
        self
    }
}

impl<M, F> Observer<M> for SubscriberFn<M, F>
where
    M: TopicMap,
    F: Fn(&M) + Send + Sync,
{
    fn next(
        &self,
        message: &M,
    ) {
        (self.on_next)(message)
    }

    fn error(
        &self,
        err: &ObserverError,
    ) {
        match &self.on_error {
            Some(on_error) => on_error(err),
            None => tracing::warn!(
                error = %err,
                topics = ?self.topics,
                "unhandled subscriber error"
            ),
        }
    }
}

impl<M, F> Subscriber<M> for SubscriberFn<M, F>
where
    M: TopicMap,
    F: Fn(&M) + Send + Sync,
{
    fn topics(&self) -> &[M::Topic] {
        &self.topics
    }
}

impl<M: TopicMap, F> fmt::Debug for SubscriberFn<M, F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SubscriberFn")
            .field("topics", &self.topics)
            .field("has_error_handler", &self.on_error.is_some())
            .finish()
    }
}

/// Запись реестра издателя.
///
/// Форма слушателя фиксируется при регистрации, и рассылка сопоставляет
/// вариант, а не проверяет наличие списка топиков во время выполнения:
/// - `Filtered` - подписчик, получает только свои топики;
/// - `Plain` - обычный наблюдатель, получает всё.
pub enum Listener<M: TopicMap> {
    Filtered(Arc<dyn Subscriber<M>>),
    Plain(Arc<dyn Observer<M>>),
}

impl<M: TopicMap> Listener<M> {
    pub fn filtered<S>(subscriber: Arc<S>) -> Self
    where
        S: Subscriber<M> + 'static,
    {
        Listener::Filtered(subscriber)
    }

    pub fn plain<O>(observer: Arc<O>) -> Self
    where
        O: Observer<M> + 'static,
    {
        Listener::Plain(observer)
    }

    /// Заинтересован ли слушатель в топике прямо сейчас.
    pub fn is_interested(
        &self,
        topic: M::Topic,
    ) -> bool {
        match self {
            Listener::Filtered(subscriber) => subscriber.is_subscribed(topic),
            Listener::Plain(_) => true,
        }
    }

    /// Список топиков; `None` для обычного наблюдателя.
    pub fn topics(&self) -> Option<&[M::Topic]> {
        match self {
            Listener::Filtered(subscriber) => Some(subscriber.topics()),
            Listener::Plain(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Listener::Filtered(_) => "filtered",
            Listener::Plain(_) => "plain",
        }
    }
}

impl<M: TopicMap> Observer<M> for Listener<M> {
    fn next(
        &self,
        message: &M,
    ) {
        match self {
            Listener::Filtered(subscriber) => subscriber.next(message),
            Listener::Plain(observer) => observer.next(message),
        }
    }

    fn error(
        &self,
        err: &ObserverError,
    ) {
        match self {
            Listener::Filtered(subscriber) => subscriber.error(err),
            Listener::Plain(observer) => observer.error(err),
        }
    }
}

impl<M: TopicMap> Clone for Listener<M> {
    fn clone(&self) -> Self {
        match self {
            Listener::Filtered(subscriber) => Listener::Filtered(Arc::clone(subscriber)),
            Listener::Plain(observer) => Listener::Plain(Arc::clone(observer)),
        }
    }
}

impl<M: TopicMap> From<Arc<dyn Subscriber<M>>> for Listener<M> {
    fn from(subscriber: Arc<dyn Subscriber<M>>) -> Self {
        Listener::Filtered(subscriber)
    }
}

impl<M: TopicMap> From<Arc<dyn Observer<M>>> for Listener<M> {
    fn from(observer: Arc<dyn Observer<M>>) -> Self {
        Listener::Plain(observer)
    }
}

impl<M: TopicMap> fmt::Debug for Listener<M> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.topics() {
            Some(topics) => f.debug_tuple("Filtered").field(&topics).finish(),
            None => f.write_str("Plain"),
        }
    }
}
