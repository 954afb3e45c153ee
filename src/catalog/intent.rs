use crate::mvi::Intent;

use super::types::{ErrorState, NewProductData, Product, UpdateProductData};

/// Store events. Every variant carries the time it happened at (`at`, in ms)
/// or an [`ErrorState`] stamped with it.
#[derive(Debug, Clone)]
pub enum CatalogIntent {
    FetchStart {
        at: u64,
    },
    FetchSuccess {
        products: Vec<Product>,
        at: u64,
    },
    FetchFailure {
        error: ErrorState,
    },

    AddStart {
        data: NewProductData,
        at: u64,
    },
    AddSuccess {
        product: Product,
        at: u64,
    },
    AddFailure {
        error: ErrorState,
    },

    /// Does not touch the product itself; there is no optimistic update.
    UpdateStart {
        id: String,
        data: UpdateProductData,
        at: u64,
    },
    UpdateSuccess {
        product: Product,
        at: u64,
    },
    UpdateFailure {
        id: String,
        error: ErrorState,
    },

    DeleteStart {
        id: String,
        at: u64,
    },
    DeleteSuccess {
        id: String,
        at: u64,
    },
    DeleteFailure {
        id: String,
        error: ErrorState,
    },

    InvalidateCache,
}

impl Intent for CatalogIntent {}

impl CatalogIntent {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            CatalogIntent::FetchStart { .. } => "fetch_start",
            CatalogIntent::FetchSuccess { .. } => "fetch_success",
            CatalogIntent::FetchFailure { .. } => "fetch_failure",
            CatalogIntent::AddStart { .. } => "add_start",
            CatalogIntent::AddSuccess { .. } => "add_success",
            CatalogIntent::AddFailure { .. } => "add_failure",
            CatalogIntent::UpdateStart { .. } => "update_start",
            CatalogIntent::UpdateSuccess { .. } => "update_success",
            CatalogIntent::UpdateFailure { .. } => "update_failure",
            CatalogIntent::DeleteStart { .. } => "delete_start",
            CatalogIntent::DeleteSuccess { .. } => "delete_success",
            CatalogIntent::DeleteFailure { .. } => "delete_failure",
            CatalogIntent::InvalidateCache => "invalidate_cache",
        }
    }
}
