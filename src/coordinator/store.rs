//! Shared handle to the entity store.
//!
//! Holds the current [`ProductsState`] behind a watch channel: transitions
//! are applied atomically through the reducer, readers get cheap snapshots,
//! and subscribers are woken on every committed transition.

use std::sync::Arc;

use tokio::sync::watch;

use crate::catalog::{CatalogIntent, CatalogReducer, ProductsState};
use crate::mvi::Reducer;

#[derive(Clone)]
pub struct StoreHandle {
    sender: Arc<watch::Sender<ProductsState>>,
}

impl StoreHandle {
    pub fn new(initial: ProductsState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Applies one transition. No other transition can interleave with it.
    pub fn dispatch(&self, intent: CatalogIntent) {
        tracing::trace!(intent = intent.name(), "dispatch");
        self.sender.send_modify(|state| {
            let current = std::mem::take(state);
            *state = CatalogReducer::reduce(current, intent);
        });
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ProductsState {
        self.sender.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&ProductsState) -> R) -> R {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductsState> {
        self.sender.subscribe()
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(ProductsState::default())
    }
}
