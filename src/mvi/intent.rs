//! Base trait for intents (dispatched transitions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - An operation being requested
/// - A network call resolving (success or failure)
/// - Resource-specific events layered on by extensions
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + Sync + 'static {}
