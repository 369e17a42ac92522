use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use super::{Listener, RawMessage, Subscriber, TopicMap};
use crate::{
    config::PublisherSettings,
    observable::{Disposable, Observable, Observer, ObserverError},
    PubSubError,
};

/// Издатель сообщений карты топиков `M`.
///
/// Поддерживает:
/// - Подписчиков с фиксированным списком топиков ([`Subscriber`])
/// - Обычных наблюдателей, которые получают все сообщения
/// - Отписку через [`Disposable`] в любой момент, в том числе из обработчика
/// - Статистику публикаций и доставок
///
/// Фильтрация выполняется в момент публикации: реестр не делится на
/// корзины по топикам, интерес каждого слушателя проверяется заново при
/// каждой рассылке.
pub struct Publisher<M: TopicMap> {
    /// Реестр слушателей (базовый наблюдаемый источник)
    base: Observable<M, Listener<M>>,
    /// Имя издателя для логов
    name: Arc<str>,
    /// Общее количество вызовов `publish`
    pub publish_count: AtomicUsize,
    /// Количество вызовов `next` у слушателей
    pub delivery_count: AtomicUsize,
    /// Количество публикаций, которые никому не были интересны
    pub unrouted_count: AtomicUsize,
}

impl<M: TopicMap> Publisher<M> {
    /// Создаёт издателя с настройками по умолчанию.
    pub fn new() -> Self {
        Self::with_settings(&PublisherSettings::default())
    }

    pub fn with_settings(settings: &PublisherSettings) -> Self {
        Self {
            base: Observable::with_capacity(settings.initial_capacity),
            name: Arc::from(settings.name.as_str()),
            publish_count: AtomicUsize::new(0),
            delivery_count: AtomicUsize::new(0),
            unrouted_count: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Регистрирует слушателя любого вида.
    ///
    /// Слушатель получает сообщения, пока жив возвращённый дескриптор.
    pub fn register(
        &self,
        listener: impl Into<Listener<M>>,
    ) -> Disposable {
        let listener = listener.into();
        let kind = listener.kind();
        let handle = self.base.register(listener);
        tracing::debug!(
            publisher = %self.name,
            id = handle.id(),
            kind,
            "listener registered"
        );
        handle
    }

    /// Регистрирует подписчика с фильтрацией по топикам.
    pub fn subscribe<S>(
        &self,
        subscriber: Arc<S>,
    ) -> Disposable
    where
        S: Subscriber<M> + 'static,
    {
        self.register(Listener::filtered(subscriber))
    }

    /// Регистрирует наблюдателя без фильтрации: он получает все топики.
    pub fn observe<O>(
        &self,
        observer: Arc<O>,
    ) -> Disposable
    where
        O: Observer<M> + 'static,
    {
        self.register(Listener::plain(observer))
    }

    /// Публикует сообщение.
    ///
    /// Синхронно обходит слушателей в порядке регистрации:
    /// 1. Подписчик получает сообщение, только если топик есть в его списке
    /// 2. Обычный наблюдатель получает всегда
    ///
    /// Слушатель, отписанный до своей очереди, пропускается. Паника в
    /// обработчике прерывает рассылку и уходит к вызывающему. Если
    /// сообщение никому не интересно - увеличивает `unrouted_count`.
    pub fn publish(
        &self,
        message: M,
    ) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);

        let topic = message.topic();
        let mut delivered = 0usize;

        self.base.for_each(|listener| {
            if !listener.is_interested(topic) {
                return;
            }
            tracing::trace!(publisher = %self.name, %topic, "delivering message");
            self.delivery_count.fetch_add(1, Ordering::Relaxed);
            delivered += 1;
            listener.next(&message);
        });

        if delivered == 0 {
            self.unrouted_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                publisher = %self.name,
                %topic,
                "no listener interested, message dropped"
            );
        }
    }

    /// Публикует сообщение в динамической форме.
    ///
    /// Если пара (топик, payload) не подходит карте `M`, ничего не
    /// публикуется и возвращается ошибка.
    pub fn publish_raw(
        &self,
        raw: RawMessage,
    ) -> Result<(), PubSubError> {
        let message = raw.decode::<M>().inspect_err(|err| {
            tracing::debug!(publisher = %self.name, error = %err, "rejected raw message");
        })?;
        self.publish(message);
        Ok(())
    }

    /// Передаёт ошибку всем слушателям. Топики здесь не учитываются.
    pub fn error(
        &self,
        err: &ObserverError,
    ) {
        tracing::debug!(publisher = %self.name, error = %err, "forwarding error to listeners");
        self.base.error(err);
    }

    /// Количество активных регистраций.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl<M: TopicMap> Default for Publisher<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TopicMap> fmt::Debug for Publisher<M> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("name", &self.name)
            .field("listeners", &self.len())
            .field("publish_count", &self.publish_count.load(Ordering::Relaxed))
            .field("delivery_count", &self.delivery_count.load(Ordering::Relaxed))
            .field("unrouted_count", &self.unrouted_count.load(Ordering::Relaxed))
            .finish()
    }
}
