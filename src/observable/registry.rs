use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{
    disposable::{Detach, Disposable},
    ListenerId,
};

struct Slot<L> {
    id: ListenerId,
    listener: L,
}

struct Inner<L> {
    /// Всегда отсортированы по `id`.
    slots: Vec<Slot<L>>,
    next_id: ListenerId,
}

impl<L> Inner<L> {
    fn position(
        &self,
        id: ListenerId,
    ) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }

    /// Первый слушатель с id строго больше `after` и меньше `bound`.
    fn next_after(
        &self,
        after: Option<ListenerId>,
        bound: ListenerId,
    ) -> Option<&Slot<L>> {
        let start = match after {
            Some(after) => self.slots.partition_point(|slot| slot.id <= after),
            None => 0,
        };
        self.slots.get(start).filter(|slot| slot.id < bound)
    }
}

pub(crate) struct Shared<L> {
    inner: Mutex<Inner<L>>,
}

impl<L: Send + 'static> Detach for Shared<L> {
    fn detach(
        &self,
        id: ListenerId,
    ) -> bool {
        let removed = {
            let mut inner = self.inner.lock();
            inner
                .position(id)
                .map(|index| inner.slots.remove(index))
        };

        // Слушатель уничтожается уже без блокировки.
        let detached = removed.is_some();
        drop(removed);

        if detached {
            tracing::debug!(id, "listener detached");
        }
        detached
    }
}

/// Упорядоченный реестр слушателей с монотонными id.
///
/// Порядок обхода совпадает с порядком регистрации. Блокировка никогда не
/// удерживается во время вызова обработчика, поэтому из обработчика можно
/// регистрировать, отписывать (в том числе самого себя) и публиковать.
/// Отписанный слушатель удаляется сразу, даже если в других потоках идут
/// обходы: обход помнит id последнего слушателя, а не индекс.
///
/// Правила обхода [`Registry::for_each`]:
/// - предикат "зарегистрирован" проверяется для каждого слушателя в момент
///   его очереди, а не заранее;
/// - слушатели, зарегистрированные во время обхода, в него не попадают.
pub struct Registry<L> {
    shared: Arc<Shared<L>>,
}

impl<L> Registry<L>
where
    L: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    slots: Vec::with_capacity(capacity),
                    next_id: 0,
                }),
            }),
        }
    }

    /// Добавляет слушателя в конец реестра.
    pub fn insert(
        &self,
        listener: L,
    ) -> Disposable {
        let id = {
            let mut inner = self.shared.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.slots.push(Slot { id, listener });
            id
        };

        let registry: Weak<Shared<L>> = Arc::downgrade(&self.shared);
        Disposable::new(id, registry)
    }

    /// Обходит живых слушателей в порядке регистрации.
    pub fn for_each<F>(
        &self,
        mut f: F,
    ) where
        F: FnMut(ListenerId, &L),
    {
        // Всё, что зарегистрировано позже, получит уже следующий обход.
        let bound = self.shared.inner.lock().next_id;
        let mut last = None;

        loop {
            let entry = {
                let inner = self.shared.inner.lock();
                inner
                    .next_after(last, bound)
                    .map(|slot| (slot.id, slot.listener.clone()))
            };

            let Some((id, listener)) = entry else {
                break;
            };
            last = Some(id);
            f(id, &listener);
        }
    }

    /// Количество живых регистраций.
    pub fn len(&self) -> usize {
        self.shared.inner.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(
        &self,
        id: ListenerId,
    ) -> bool {
        self.shared.inner.lock().position(id).is_some()
    }
}

impl<L> Default for Registry<L>
where
    L: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
