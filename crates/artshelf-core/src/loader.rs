// Catalog loader - pass-through reads from the catalog service
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    models::{Favorite, Product},
    remote::CatalogRemote,
    Result,
};

/// Fetches the product and favorites collections.
///
/// No caching and no transformation: results come back exactly as the
/// remote returned them, failures are propagated. Both reads are
/// idempotent and safe to retry.
#[derive(Clone)]
pub struct CatalogLoader {
    remote: Arc<dyn CatalogRemote>,
}

impl CatalogLoader {
    pub fn new(remote: Arc<dyn CatalogRemote>) -> Self {
        Self { remote }
    }

    pub async fn load_products(&self) -> Result<Vec<Product>> {
        match self.remote.list_products().await {
            Ok(products) => {
                debug!("Loaded {} products", products.len());
                Ok(products)
            }
            Err(e) => {
                warn!("Loading products failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn load_favorites(&self) -> Result<Vec<Favorite>> {
        match self.remote.list_favorites().await {
            Ok(favorites) => {
                debug!("Loaded {} favorites", favorites.len());
                Ok(favorites)
            }
            Err(e) => {
                warn!("Loading favorites failed: {}", e);
                Err(e)
            }
        }
    }
}
