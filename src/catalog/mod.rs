//! Entity store: normalized products and operation status.
//!
//! No I/O happens here. Every change goes through [`CatalogReducer`].

mod intent;
mod reducer;
mod state;
mod types;
pub mod validation;

pub use intent::CatalogIntent;
pub use reducer::CatalogReducer;
pub use state::{CacheState, OperationStatus, ProductsState, DEFAULT_CACHE_TTL_MS};
pub use types::{
    ErrorState, LoadingState, NewProductData, Product, UpdateProductData, DATA_INTEGRITY_CODE,
};
pub use validation::{validate_new_product, validate_update, ValidationError};
