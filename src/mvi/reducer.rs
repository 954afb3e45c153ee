//! State transition trait.

use super::intent::Intent;
use super::state::StoreState;

/// Folds intents into a store snapshot.
///
/// `reduce` receives the whole current snapshot by value and returns its
/// successor. It reads no clock and performs no I/O: every timestamp it needs
/// arrives inside the intent, so replaying the same intents over the same
/// snapshot always yields the same state. The store handle is the only caller
/// and applies one intent at a time.
pub trait Reducer {
    type State: StoreState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
