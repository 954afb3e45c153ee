//! Normalized product collection plus per-operation status.

use std::collections::HashMap;

use crate::mvi::StoreState;

use super::types::{ErrorState, LoadingState, Product};

/// Default lifetime of a successful full fetch.
pub const DEFAULT_CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// Status of every operation kind the store tracks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationStatus {
    pub fetch: LoadingState,
    pub add: LoadingState,
    /// Present only while an update on that id is pending or has failed.
    pub update: HashMap<String, LoadingState>,
    /// Present only while a delete on that id is pending or has failed.
    pub delete: HashMap<String, LoadingState>,
}

/// Freshness of the last full fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState {
    pub is_valid: bool,
    pub expires_at: u64,
    pub ttl_ms: u64,
}

impl Default for CacheState {
    fn default() -> Self {
        Self {
            is_valid: false,
            expires_at: 0,
            ttl_ms: DEFAULT_CACHE_TTL_MS,
        }
    }
}

/// Entity store state.
///
/// `all_ids` and the keys of `by_id` always hold the same set of ids, and
/// `all_ids` never contains a duplicate. Only the reducer mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductsState {
    pub(super) by_id: HashMap<String, Product>,
    pub(super) all_ids: Vec<String>,
    pub(super) status: OperationStatus,
    pub(super) error: Option<ErrorState>,
    pub(super) last_updated: u64,
    pub(super) cache: CacheState,
}

impl StoreState for ProductsState {}

impl ProductsState {
    /// Empty store whose fetches stay fresh for `ttl_ms`.
    pub fn with_cache_ttl(ttl_ms: u64) -> Self {
        Self {
            cache: CacheState {
                ttl_ms,
                ..CacheState::default()
            },
            ..Self::default()
        }
    }

    /// Products in fetch/creation order.
    pub fn products(&self) -> Vec<&Product> {
        self.all_ids
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn ids(&self) -> &[String] {
        &self.all_ids
    }

    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    pub fn fetch_status(&self) -> &LoadingState {
        &self.status.fetch
    }

    pub fn add_status(&self) -> &LoadingState {
        &self.status.add
    }

    pub fn update_status(&self, id: &str) -> Option<&LoadingState> {
        self.status.update.get(id)
    }

    pub fn delete_status(&self, id: &str) -> Option<&LoadingState> {
        self.status.delete.get(id)
    }

    pub fn is_loading(&self) -> bool {
        self.status.fetch.is_loading
    }

    pub fn is_updating(&self, id: &str) -> bool {
        self.update_status(id).is_some_and(|s| s.is_loading)
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.delete_status(id).is_some_and(|s| s.is_loading)
    }

    /// Most recent global error, if the last operation failed.
    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn last_updated(&self) -> u64 {
        self.last_updated
    }

    pub fn cache(&self) -> &CacheState {
        &self.cache
    }

    /// Whether a full fetch at `now` can be skipped.
    pub fn is_cache_fresh(&self, now: u64) -> bool {
        self.cache.is_valid && self.cache.expires_at > now
    }
}
