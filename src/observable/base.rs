use std::{marker::PhantomData, sync::Arc};

use super::{Disposable, Observer, ObserverError, Registry};

/// Базовый наблюдаемый источник: реестр наблюдателей и рассылка всем.
///
/// `L` - тип записи реестра. По умолчанию это `Arc<dyn Observer<T>>`;
/// издатель топиков подставляет свой размеченный тип слушателя.
pub struct Observable<T, L = Arc<dyn Observer<T>>> {
    registry: Registry<L>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, L> Observable<T, L>
where
    T: 'static,
    L: Observer<T> + Clone + 'static,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Registry::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Регистрирует слушателя. Он получает значения, пока жив дескриптор.
    pub fn register(
        &self,
        listener: L,
    ) -> Disposable {
        self.registry.insert(listener)
    }

    /// Обходит текущих слушателей в порядке регистрации.
    ///
    /// Отписанный до своей очереди слушатель пропускается.
    pub fn for_each<F>(
        &self,
        mut f: F,
    ) where
        F: FnMut(&L),
    {
        self.registry.for_each(|_, listener| f(listener));
    }

    /// Рассылает значение всем слушателям. Возвращает число доставок.
    pub fn notify(
        &self,
        value: &T,
    ) -> usize {
        let mut delivered = 0;
        self.for_each(|listener| {
            listener.next(value);
            delivered += 1;
        });
        delivered
    }

    /// Передаёт ошибку всем слушателям.
    pub fn error(
        &self,
        err: &ObserverError,
    ) {
        self.for_each(|listener| listener.error(err));
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<T, L> Default for Observable<T, L>
where
    T: 'static,
    L: Observer<T> + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
