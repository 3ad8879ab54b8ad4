use thiserror::Error;

/// All the ways a catalog operation can fail
#[derive(Error, Debug)]
pub enum Error {
    /// Any transport failure: timeout, connection error, non-success status
    #[error("Catalog service unavailable: {0}")]
    RemoteUnavailable(String),

    /// `add` found the id already in the local favorites set
    #[error("Product {0} is already in favorites")]
    AlreadyFavorited(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// True for failures a retry prompt makes sense for
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::RemoteUnavailable(_))
    }
}

impl From<artshelf_api::ApiError> for Error {
    fn from(err: artshelf_api::ApiError) -> Self {
        Error::RemoteUnavailable(err.to_string())
    }
}
