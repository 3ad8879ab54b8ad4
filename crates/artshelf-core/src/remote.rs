use async_trait::async_trait;

use crate::{
    models::{Favorite, Product},
    Result,
};

/// The catalog service as the core sees it.
///
/// Every method is exactly one round trip. Implementations report any
/// transport failure as [`crate::Error::RemoteUnavailable`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRemote: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn list_favorites(&self) -> Result<Vec<Favorite>>;

    /// Returns the favorite as the service stored it
    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite>;

    /// Returns the removed favorite, or `None` when nothing was stored
    async fn remove_favorite(&self, id: &str) -> Result<Option<Favorite>>;

    /// Returns everything that was removed
    async fn remove_all_favorites(&self) -> Result<Vec<Favorite>>;
}
