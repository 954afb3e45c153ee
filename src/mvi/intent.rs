//! Base trait for intents (store events) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - The start of a remote operation
/// - Its resolution (success payload or failure)
/// - Explicit housekeeping requests (cache invalidation)
///
/// Intents carry every timestamp they need so that reducing them stays pure.
pub trait Intent: Send + 'static {}
