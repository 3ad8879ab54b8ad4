// Catalog state and derived views - everything between the transport and the screen
pub mod config;
pub mod error;
pub mod favorites;
pub mod loader;
pub mod models;
pub mod projector;
pub mod providers;
pub mod remote;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::Error;
pub use favorites::{FavoritesReconciler, FavoritesSet};
pub use loader::CatalogLoader;
pub use models::{Favorite, Feedback, Product};
pub use projector::{BrandFilter, FeedbackAggregate, RatingHistogram};
pub use providers::HttpRemote;
pub use remote::CatalogRemote;
pub use session::CatalogSession;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
