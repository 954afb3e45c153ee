//! Client-side product catalog store kept in sync with a remote collection.
//!
//! - [`catalog`]: normalized entity store and its reducer (no I/O)
//! - [`client`]: request client with caching, single-flight and retry
//! - [`coordinator`]: binds the two into load/create/edit/remove operations

pub mod catalog;
pub mod client;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod mvi;

pub use catalog::{
    ErrorState, LoadingState, NewProductData, Product, ProductsState, UpdateProductData,
};
pub use client::{ApiError, ApiResponse, RequestClient};
pub use config::Config;
pub use coordinator::{Coordinator, StoreHandle};
