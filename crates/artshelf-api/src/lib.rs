// HTTP transport for the catalog service
pub mod client;
pub mod records;
pub mod retry;

// Re-export common types
pub use client::{ApiError, CatalogClient, DEFAULT_TIMEOUT};
pub use records::{FavoriteRecord, FeedbackRecord, ProductRecord};
pub use retry::RetryConfig;
