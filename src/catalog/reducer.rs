//! Reducer for the entity store.

use crate::mvi::Reducer;

use super::intent::CatalogIntent;
use super::state::ProductsState;
use super::types::{ErrorState, LoadingState, Product};

/// Pure state transitions for [`ProductsState`].
pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = ProductsState;
    type Intent = CatalogIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CatalogIntent::FetchStart { at } => {
                state.status.fetch = LoadingState::started(at);
                state.error = None;
                state
            }

            CatalogIntent::FetchSuccess { products, at } => {
                normalize_into(&mut state, products);
                state.status.fetch = LoadingState::default();
                state.error = None;
                state.last_updated = at;
                state.cache.is_valid = true;
                state.cache.expires_at = at.saturating_add(state.cache.ttl_ms);
                state
            }

            CatalogIntent::FetchFailure { error } => {
                let fetch = std::mem::take(&mut state.status.fetch);
                state.status.fetch = fetch.failed(&error.message);
                state.error = Some(error);
                state
            }

            CatalogIntent::AddStart { at, .. } => {
                state.status.add = LoadingState::started(at);
                state.error = None;
                state
            }

            CatalogIntent::AddSuccess { product, at } => {
                state.status.add = LoadingState::default();
                state.error = None;
                if state.by_id.contains_key(&product.id) {
                    // The server's copy replaces ours; the id stays listed once.
                    state.error = Some(ErrorState::integrity(
                        format!("Created product id '{}' is already in the store", product.id),
                        at,
                    ));
                } else {
                    state.all_ids.push(product.id.clone());
                }
                state.by_id.insert(product.id.clone(), product);
                state.last_updated = at;
                state.cache.is_valid = false;
                state
            }

            CatalogIntent::AddFailure { error } => {
                let add = std::mem::take(&mut state.status.add);
                state.status.add = add.failed(&error.message);
                state.error = Some(error);
                state
            }

            CatalogIntent::UpdateStart { id, at, .. } => {
                state.status.update.insert(id, LoadingState::started(at));
                state.error = None;
                state
            }

            CatalogIntent::UpdateSuccess { product, at } => {
                state.status.update.remove(&product.id);
                state.error = None;
                if let Some(slot) = state.by_id.get_mut(&product.id) {
                    *slot = product;
                } else {
                    // Never resurrect an id we no longer hold.
                    state.error = Some(ErrorState::integrity(
                        format!("Updated product id '{}' is not in the store", product.id),
                        at,
                    ));
                }
                state.last_updated = at;
                state.cache.is_valid = false;
                state
            }

            CatalogIntent::UpdateFailure { id, error } => {
                let current = state.status.update.remove(&id).unwrap_or_default();
                state.status.update.insert(id, current.failed(&error.message));
                state.error = Some(error);
                state
            }

            CatalogIntent::DeleteStart { id, at } => {
                state.status.delete.insert(id, LoadingState::started(at));
                state.error = None;
                state
            }

            CatalogIntent::DeleteSuccess { id, at } => {
                state.status.delete.remove(&id);
                if state.by_id.remove(&id).is_some() {
                    state.all_ids.retain(|existing| existing != &id);
                    state.error = None;
                    state.last_updated = at;
                    state.cache.is_valid = false;
                }
                state
            }

            CatalogIntent::DeleteFailure { id, error } => {
                let current = state.status.delete.remove(&id).unwrap_or_default();
                state.status.delete.insert(id, current.failed(&error.message));
                state.error = Some(error);
                state
            }

            CatalogIntent::InvalidateCache => {
                state.cache.is_valid = false;
                state.cache.expires_at = 0;
                state
            }
        }
    }
}

/// Replaces the collection. A repeated id keeps its first position and its
/// last value.
fn normalize_into(state: &mut ProductsState, products: Vec<Product>) {
    state.by_id.clear();
    state.all_ids.clear();
    for product in products {
        if !state.by_id.contains_key(&product.id) {
            state.all_ids.push(product.id.clone());
        }
        state.by_id.insert(product.id.clone(), product);
    }
}
