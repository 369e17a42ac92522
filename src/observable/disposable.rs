use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Weak,
    },
};

use super::ListenerId;

/// Сторона реестра, которую видит [`Disposable`].
///
/// Стирает тип слушателя, чтобы дескриптор не был generic.
pub(crate) trait Detach: Send + Sync {
    /// Убирает слушателя из реестра. Возвращает `true`, если слушатель
    /// был зарегистрирован.
    fn detach(
        &self,
        id: ListenerId,
    ) -> bool;
}

/// Дескриптор регистрации слушателя.
///
/// Выдаётся при регистрации и владеет связью "слушатель ↔ реестр".
/// - `dispose()` идемпотентен: повторный вызов ничего не делает.
/// - После `dispose()` слушатель больше не участвует в рассылке.
/// - Уже идущую рассылку, прошедшую этого слушателя, не затрагивает.
///
/// Отписка происходит автоматически при `Drop`.
#[must_use = "dropping a Disposable unregisters the listener immediately"]
pub struct Disposable {
    id: ListenerId,
    registry: Weak<dyn Detach>,
    disposed: AtomicBool,
}

impl Disposable {
    pub(crate) fn new(
        id: ListenerId,
        registry: Weak<dyn Detach>,
    ) -> Self {
        Self {
            id,
            registry,
            disposed: AtomicBool::new(false),
        }
    }

    /// Идентификатор регистрации (монотонно растёт в пределах реестра).
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Отписывает слушателя. Повторные вызовы безопасны.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Реестр мог быть уже уничтожен вместе с издателем.
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
        }
    }

    /// `true`, если дескриптор отписан или реестр больше не существует.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire) || self.registry.strong_count() == 0
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("id", &self.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
