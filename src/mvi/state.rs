//! Store snapshot trait.

/// A complete, self-contained snapshot of a store.
///
/// `Default` is the empty store before any fetch. `PartialEq` lets
/// subscribers and tests compare snapshots across transitions; `Clone`
/// hands readers their own copy while the store moves on.
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}
