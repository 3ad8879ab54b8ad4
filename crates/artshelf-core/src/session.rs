// Catalog session - the state one browsing screen works against
use std::sync::Arc;

use tracing::info;

use crate::{
    favorites::FavoritesReconciler,
    loader::CatalogLoader,
    models::Product,
    projector::{self, BrandFilter, FeedbackAggregate},
    remote::CatalogRemote,
    Result,
};

/// Product snapshot plus favorites for one session.
///
/// Created by the caller when a screen becomes active and dropped when it
/// goes away; nothing here is persisted. Call [`CatalogSession::refresh`]
/// on every activation.
pub struct CatalogSession {
    loader: CatalogLoader,
    favorites: FavoritesReconciler,
    products: Vec<Product>,
}

impl CatalogSession {
    pub fn new(remote: Arc<dyn CatalogRemote>) -> Self {
        Self {
            loader: CatalogLoader::new(remote.clone()),
            favorites: FavoritesReconciler::new(remote),
            products: Vec::new(),
        }
    }

    /// Reload products and favorites from the service.
    ///
    /// State is replaced only when both loads succeed; on failure the
    /// previous snapshot stays as it was.
    pub async fn refresh(&mut self) -> Result<()> {
        let (products, favorites) = futures::try_join!(
            self.loader.load_products(),
            self.loader.load_favorites()
        )?;

        self.products = projector::filter_positive_price(products);
        self.favorites.initialize(favorites);

        info!(
            "Session refreshed: {} products, {} favorites",
            self.products.len(),
            self.favorites.favorites().len()
        );
        Ok(())
    }

    /// Products with a positive price, in service order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn brands(&self) -> Vec<String> {
        projector::distinct_brands(&self.products)
    }

    pub fn visible_products(&self, filter: &BrandFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        projector::find_product(&self.products, id)
    }

    pub fn feedback_aggregate(&self, id: &str) -> Result<FeedbackAggregate> {
        let product = self.product(id)?;
        Ok(projector::feedback_aggregate(&product.feedbacks))
    }

    /// Mark a product from the current snapshot as favorite
    pub async fn favorite_product(&mut self, id: &str) -> Result<()> {
        let candidate = self.product(id)?.to_favorite();
        self.favorites.add(candidate).await
    }

    pub fn favorites(&self) -> &FavoritesReconciler {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesReconciler {
        &mut self.favorites
    }
}
