//! Topical: in-process topic-based publish/subscribe.
//!
//! A [`Publisher`] fans typed messages out to registered listeners,
//! synchronously and in registration order. A [`Subscriber`] declares the
//! topics it wants at construction time; a plain [`Observer`] receives
//! everything. Every registration returns a [`Disposable`] that detaches
//! the listener, safely even from inside a handler.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use serde::{Deserialize, Serialize};
//! use topical::{topic_map, Publisher, SubscriberFn};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct Reading {
//!     pub value: i64,
//! }
//!
//! topic_map! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum Event: EventTopic {
//!         Status => String,
//!         Reading => Reading,
//!     }
//! }
//!
//! let publisher: Publisher<Event> = Publisher::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let handle = publisher.subscribe(SubscriberFn::arc([EventTopic::Reading], move |event: &Event| {
//!     sink.lock().unwrap().push(event.clone());
//! }));
//!
//! publisher.publish(Event::Status("up".into()));
//! publisher.publish(Event::Reading(Reading { value: 1 }));
//! handle.dispose();
//! publisher.publish(Event::Reading(Reading { value: 2 }));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Event::Reading(Reading { value: 1 })]);
//! ```

/// Publisher settings loaded from the environment.
pub mod config;
/// Common error types: topic lookup, payload decoding, logging setup.
pub mod error;
/// `tracing` subscriber setup (filters, formats).
pub mod logging;
/// Observer/observable base: registry, disposables, closure observers.
pub mod observable;
/// Pub/Sub: Publisher, Subscriber, topic maps, raw messages.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

pub use config::PublisherSettings;
pub use error::{LoggingError, PubSubError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use observable::{
    Disposable, ListenerId, Observable, Observer, ObserverError, ObserverFn, Registry,
};
pub use pubsub::{Listener, Publisher, RawMessage, Subscriber, SubscriberFn, Topic, TopicMap};

/// Used by `topic_map!` expansions.
#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
