use std::{fmt, marker::PhantomData, sync::Arc};

/// Ошибка, которую источник передаёт слушателю через [`Observer::error`].
pub type ObserverError = anyhow::Error;

pub(crate) type ErrorHandler = Box<dyn Fn(&ObserverError) + Send + Sync>;

/// Получатель значений одного типа.
///
/// Обработчики вызываются синхронно в потоке источника, по одному, поэтому
/// должны быть быстрыми. Паника в обработчике не перехватывается и уходит
/// к вызывающему `notify`/`publish`.
pub trait Observer<T>: Send + Sync {
    /// Очередное значение.
    fn next(
        &self,
        value: &T,
    );

    /// Ошибка источника.
    fn error(
        &self,
        err: &ObserverError,
    );
}

impl<T, O> Observer<T> for Arc<O>
where
    O: Observer<T> + ?Sized,
{
    fn next(
        &self,
        value: &T,
    ) {
        (**self).next(value)
    }

    fn error(
        &self,
        err: &ObserverError,
    ) {
        (**self).error(err)
    }
}

/// Наблюдатель на замыкании.
///
/// Без явного обработчика ошибок ошибки пишутся в лог (`warn`).
///
/// ```rust
/// use std::sync::Arc;
/// use topical::{Observable, Observer, ObserverFn};
///
/// let observable: Observable<u32> = Observable::new();
/// let observer: Arc<dyn Observer<u32>> = ObserverFn::arc(|value: &u32| assert_eq!(*value, 7));
/// let _handle = observable.register(observer);
/// observable.notify(&7);
/// ```
pub struct ObserverFn<T, F> {
    on_next: F,
    on_error: Option<ErrorHandler>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> ObserverFn<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    pub fn new(on_next: F) -> Self {
        Self {
            on_next,
            on_error: None,
            _marker: PhantomData,
        }
    }

    /// Создаёт наблюдателя сразу в `Arc`.
    pub fn arc(on_next: F) -> Arc<Self> {
        Arc::new(Self::new(on_next))
    }

    /// Устанавливает обработчик ошибок.
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

impl<T, F> Observer<T> for ObserverFn<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    fn next(
        &self,
        value: &T,
    ) {
        (self.on_next)(value)
    }

    fn error(
        &self,
        err: &ObserverError,
    ) {
        match &self.on_error {
            Some(on_error) => on_error(err),
            None => tracing::warn!(error = %err, "unhandled observer error"),
        }
    }
}

impl<T, F> fmt::Debug for ObserverFn<T, F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ObserverFn")
            .field("has_error_handler", &self.on_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Проверяет, что `next` вызывает замыкание.
    #[test]
    fn test_observer_fn_next() {
        let sum = Arc::new(AtomicUsize::new(0));
        let acc = sum.clone();
        let observer = ObserverFn::new(move |value: &usize| {
            acc.fetch_add(*value, Ordering::SeqCst);
        });

        observer.next(&2);
        observer.next(&3);

        assert_eq!(sum.load(Ordering::SeqCst), 5);
    }

    /// Проверяет, что ошибка уходит в обработчик ошибок, а не в `next`.
    #[test]
    fn test_observer_fn_error_handler() {
        let errors = Arc::new(AtomicUsize::new(0));
        let counter = errors.clone();
        let observer = ObserverFn::new(|_: &u8| panic!("next must not be called"))
            .with_error(move |err| {
                assert_eq!(err.to_string(), "upstream failed");
                counter.fetch_add(1, Ordering::SeqCst);
            });

        observer.error(&anyhow::anyhow!("upstream failed"));

        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    /// Проверяет, что ошибка без обработчика не паникует.
    #[test]
    fn test_observer_fn_error_without_handler() {
        let observer = ObserverFn::new(|_: &u8| {});
        observer.error(&anyhow::anyhow!("ignored"));
    }

    /// Проверяет, что `Arc<dyn Observer>` сам является наблюдателем.
    #[test]
    fn test_arc_forwards_to_inner() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let observer: Arc<dyn Observer<u8>> = ObserverFn::arc(move |_: &u8| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Observer::next(&observer, &1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
