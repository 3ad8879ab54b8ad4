// HTTP remote - bridges the API client with the CatalogRemote trait
use std::time::Duration;

use artshelf_api::{CatalogClient, FavoriteRecord, FeedbackRecord, ProductRecord};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::ApiConfig,
    models::{Favorite, Feedback, Product},
    remote::CatalogRemote,
    Error, Result,
};

/// Wrapper around CatalogClient that implements CatalogRemote
pub struct HttpRemote {
    client: CatalogClient,
}

impl HttpRemote {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client =
            CatalogClient::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
                .map_err(|e| Error::ConfigError(e.to_string()))?
                .with_retry_config(config.retry.to_retry_config());

        debug!("Catalog service at {}", client.base_url());
        Ok(Self::new(client))
    }
}

#[async_trait]
impl CatalogRemote for HttpRemote {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let records = self.client.fetch_products().await?;
        Ok(records.into_iter().map(record_to_product).collect())
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>> {
        let records = self.client.fetch_favorites().await?;
        Ok(records.into_iter().map(record_to_favorite).collect())
    }

    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite> {
        let stored = self.client.add_favorite(&favorite_to_record(favorite)).await?;
        Ok(record_to_favorite(stored))
    }

    async fn remove_favorite(&self, id: &str) -> Result<Option<Favorite>> {
        let removed = self.client.delete_favorite(id).await?;
        Ok(removed.map(record_to_favorite))
    }

    async fn remove_all_favorites(&self) -> Result<Vec<Favorite>> {
        let removed = self.client.delete_all_favorites().await?;
        Ok(removed.into_iter().map(record_to_favorite).collect())
    }
}

fn record_to_product(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        name: record.art_name,
        price: record.price,
        description: record.description,
        has_glass_surface: record.glass_surface,
        image_ref: record.image,
        brand: record.brand,
        limited_time_deal: record.limited_time_deal,
        feedbacks: record.feedbacks.into_iter().map(record_to_feedback).collect(),
    }
}

fn record_to_feedback(record: FeedbackRecord) -> Feedback {
    Feedback {
        rating: record.rating,
        comment: record.comment,
        author: record.author,
        date: record.date,
    }
}

fn record_to_favorite(record: FavoriteRecord) -> Favorite {
    Favorite {
        id: record.id,
        name: record.art_name,
        price: record.price,
        description: record.description,
        image_ref: record.image,
        brand: record.brand,
        limited_time_deal: record.limited_time_deal,
    }
}

fn favorite_to_record(favorite: &Favorite) -> FavoriteRecord {
    FavoriteRecord {
        id: favorite.id.clone(),
        art_name: favorite.name.clone(),
        price: favorite.price,
        description: favorite.description.clone(),
        image: favorite.image_ref.clone(),
        brand: favorite.brand.clone(),
        limited_time_deal: favorite.limited_time_deal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrySettings;

    #[test]
    fn test_record_to_product_maps_service_fields() {
        let record: ProductRecord = serde_json::from_str(
            r#"{
                "id": "12",
                "artName": "Cotman Field Box",
                "price": 31.0,
                "glassSurface": false,
                "image": "https://img.example/cotman.png",
                "brand": "Winsor & Newton",
                "limitedTimeDeal": 0.2,
                "feedbacks": [{"rating": 3, "comment": "ok", "author": "An", "date": "2023-12-24"}]
            }"#,
        )
        .unwrap();

        let product = record_to_product(record);
        assert_eq!(product.name, "Cotman Field Box");
        assert_eq!(product.image_ref, "https://img.example/cotman.png");
        assert_eq!(product.description, "");
        assert_eq!(product.feedbacks[0].rating, 3);
        assert_eq!(product.deal_percent(), Some(20));
    }

    #[test]
    fn test_favorite_record_conversion_is_lossless() {
        let favorite = Favorite {
            id: "5".to_string(),
            name: "Round Brush #8".to_string(),
            price: 7.25,
            description: "Sable blend".to_string(),
            image_ref: "https://img.example/brush.png".to_string(),
            brand: "Princeton".to_string(),
            limited_time_deal: 0.05,
        };

        assert_eq!(record_to_favorite(favorite_to_record(&favorite)), favorite);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_remote_unavailable() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            retry: RetrySettings {
                max_retries: 0,
                ..RetrySettings::default()
            },
        };
        let remote = HttpRemote::from_config(&config).unwrap();

        let err = remote.list_favorites().await.unwrap_err();
        assert!(err.is_remote(), "unexpected error: {}", err);

        let err = remote.remove_all_favorites().await.unwrap_err();
        assert!(err.is_remote(), "unexpected error: {}", err);
    }
}
