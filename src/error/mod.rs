pub mod logging;
pub mod pubsub;

pub use logging::LoggingError;
pub use pubsub::PubSubError;
