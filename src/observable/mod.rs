//! Базовый примитив наблюдатель/наблюдаемое.
//!
//! - `observer`: контракт [`Observer`] (`next`, `error`) и наблюдатель на
//!   замыкании.
//! - `registry`: упорядоченный реестр слушателей, устойчивый к отписке во
//!   время обхода.
//! - `disposable`: дескриптор регистрации.
//! - `base`: [`Observable`] - регистрация и рассылка всем слушателям.

mod base;
mod disposable;
mod observer;
mod registry;

/// Идентификатор регистрации в реестре.
pub type ListenerId = u64;

pub use base::Observable;
pub use disposable::Disposable;
pub(crate) use observer::ErrorHandler;
pub use observer::{Observer, ObserverError, ObserverFn};
pub use registry::Registry;
