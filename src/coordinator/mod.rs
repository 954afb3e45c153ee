//! Coordinator: sequences store transitions around remote calls.
//!
//! Every operation follows the same shape: dispatch a start intent, await the
//! request client, then dispatch a success or failure intent. Failures are
//! written into the store and returned to the caller. The coordinator never
//! retries on its own and validates nothing.

mod store;

use std::sync::Arc;

use tokio::sync::watch;

use crate::catalog::{
    CatalogIntent, ErrorState, NewProductData, Product, ProductsState, UpdateProductData,
};
use crate::client::{ApiError, ClientBuildError, HttpTransport, RequestClient, Transport};
use crate::clock::{ClockSource, SystemClock};
use crate::config::Config;

pub use store::StoreHandle;

const PRODUCTS_PATH: &str = "/products";

fn product_path(id: &str) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

pub struct Coordinator<T: Transport = HttpTransport> {
    client: Arc<RequestClient<T>>,
    store: StoreHandle,
    clock: Arc<dyn ClockSource>,
}

impl<T: Transport> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl Coordinator<HttpTransport> {
    /// Wires a reqwest-backed client and a fresh store from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientBuildError> {
        let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);
        let client = RequestClient::from_config(config, clock.clone())?;
        let store = StoreHandle::new(ProductsState::with_cache_ttl(config.cache.ttl_ms()));
        Ok(Self::new(Arc::new(client), store, clock))
    }
}

impl<T: Transport> Coordinator<T> {
    /// `clock` should be the same clock the client was built with, so the
    /// store cache and the read cache agree on time.
    pub fn new(client: Arc<RequestClient<T>>, store: StoreHandle, clock: Arc<dyn ClockSource>) -> Self {
        Self {
            client,
            store,
            clock,
        }
    }

    pub fn client(&self) -> &RequestClient<T> {
        &self.client
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn state(&self) -> ProductsState {
        self.store.snapshot()
    }

    /// Products in display order.
    pub fn products(&self) -> Vec<Product> {
        self.store
            .read(|state| state.products().into_iter().cloned().collect())
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductsState> {
        self.store.subscribe()
    }

    /// Fetches the full collection unless the last fetch is still fresh.
    pub async fn load_products(&self) -> Result<(), ApiError> {
        let now = self.clock.now();
        if self.store.read(|state| state.is_cache_fresh(now)) {
            tracing::debug!("product list still fresh, skipping fetch");
            return Ok(());
        }

        self.store.dispatch(CatalogIntent::FetchStart { at: now });

        match self
            .client
            .get::<Vec<Product>>(PRODUCTS_PATH, "fetch products")
            .await
        {
            Ok(response) => {
                tracing::info!(count = response.data.len(), cached = response.is_cached(), "products loaded");
                self.store.dispatch(CatalogIntent::FetchSuccess {
                    products: response.data,
                    at: self.clock.now(),
                });
                Ok(())
            }
            Err(err) => {
                self.store.dispatch(CatalogIntent::FetchFailure {
                    error: self.error_state(&err),
                });
                Err(err)
            }
        }
    }

    /// Creates a product. On failure the caller keeps its own form data.
    pub async fn create_product(&self, data: NewProductData) -> Result<Product, ApiError> {
        self.store.dispatch(CatalogIntent::AddStart {
            data: data.clone(),
            at: self.clock.now(),
        });

        match self
            .client
            .post::<_, Product>(PRODUCTS_PATH, &data, "add product")
            .await
        {
            Ok(response) => {
                let product = response.data;
                if self.store.read(|state| state.contains(&product.id)) {
                    tracing::warn!(id = %product.id, "server returned an id that is already in the store");
                }
                self.client.invalidate_cache(PRODUCTS_PATH);
                self.store.dispatch(CatalogIntent::AddSuccess {
                    product: product.clone(),
                    at: self.clock.now(),
                });
                tracing::info!(id = %product.id, "product created");
                Ok(product)
            }
            Err(err) => {
                self.store.dispatch(CatalogIntent::AddFailure {
                    error: self.error_state(&err),
                });
                Err(err)
            }
        }
    }

    /// Sends only the fields present in `data`.
    pub async fn edit_product(
        &self,
        id: &str,
        data: UpdateProductData,
    ) -> Result<Product, ApiError> {
        self.store.dispatch(CatalogIntent::UpdateStart {
            id: id.to_string(),
            data: data.clone(),
            at: self.clock.now(),
        });

        match self
            .client
            .patch::<_, Product>(&product_path(id), &data, "update product")
            .await
        {
            Ok(response) => {
                let product = response.data;
                if !self.store.read(|state| state.contains(&product.id)) {
                    tracing::warn!(id = %product.id, "updated product is not in the store");
                }
                self.client.invalidate_cache(PRODUCTS_PATH);
                self.store.dispatch(CatalogIntent::UpdateSuccess {
                    product: product.clone(),
                    at: self.clock.now(),
                });
                tracing::info!(id = %product.id, "product updated");
                Ok(product)
            }
            Err(err) => {
                self.store.dispatch(CatalogIntent::UpdateFailure {
                    id: id.to_string(),
                    error: self.error_state(&err),
                });
                Err(err)
            }
        }
    }

    pub async fn remove_product(&self, id: &str) -> Result<(), ApiError> {
        self.store.dispatch(CatalogIntent::DeleteStart {
            id: id.to_string(),
            at: self.clock.now(),
        });

        match self.client.delete(&product_path(id), "delete product").await {
            Ok(_) => {
                self.client.invalidate_cache(PRODUCTS_PATH);
                self.store.dispatch(CatalogIntent::DeleteSuccess {
                    id: id.to_string(),
                    at: self.clock.now(),
                });
                tracing::info!(id, "product deleted");
                Ok(())
            }
            Err(err) => {
                self.store.dispatch(CatalogIntent::DeleteFailure {
                    id: id.to_string(),
                    error: self.error_state(&err),
                });
                Err(err)
            }
        }
    }

    /// Forgets the fetched collection and loads it again.
    pub async fn refresh_products(&self) -> Result<(), ApiError> {
        self.store.dispatch(CatalogIntent::InvalidateCache);
        self.client.invalidate_cache(PRODUCTS_PATH);
        self.load_products().await
    }

    fn error_state(&self, err: &ApiError) -> ErrorState {
        ErrorState::from_api_error(err, self.clock.now())
    }
}
