// Favorites reconciler - local set follows confirmed remote state
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{models::Favorite, remote::CatalogRemote, Error, Result};

/// Session-scoped favorites: at most one entry per id, in list order
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    entries: Vec<Favorite>,
    ids: HashSet<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a remote listing. Duplicate ids keep the last occurrence,
    /// at the position of that occurrence.
    fn from_listing(favorites: Vec<Favorite>) -> Self {
        let mut set = Self::new();
        for favorite in favorites.into_iter().rev() {
            if set.ids.insert(favorite.id.clone()) {
                set.entries.push(favorite);
            }
        }
        set.entries.reverse();
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&Favorite> {
        if !self.contains(id) {
            return None;
        }
        self.entries.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.entries.iter()
    }

    fn insert(&mut self, favorite: Favorite) {
        if self.ids.insert(favorite.id.clone()) {
            self.entries.push(favorite);
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.entries.retain(|f| f.id != id);
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.ids.clear();
    }
}

/// Owns the favorites set and applies changes only after the remote
/// service confirms them.
///
/// Mutations take `&mut self`, so calls on one reconciler are serialized.
/// A mutation future dropped before the remote answers leaves the set
/// untouched.
pub struct FavoritesReconciler {
    remote: Arc<dyn CatalogRemote>,
    set: FavoritesSet,
    initialized: bool,
}

impl FavoritesReconciler {
    pub fn new(remote: Arc<dyn CatalogRemote>) -> Self {
        Self {
            remote,
            set: FavoritesSet::new(),
            initialized: false,
        }
    }

    /// Replace the whole local set with a remote listing
    pub fn initialize(&mut self, remote_favorites: Vec<Favorite>) {
        let listed = remote_favorites.len();
        self.set = FavoritesSet::from_listing(remote_favorites);
        self.initialized = true;

        if self.set.len() < listed {
            debug!(
                "Dropped {} duplicate favorites from listing",
                listed - self.set.len()
            );
        }
        info!("Favorites initialized with {} entries", self.set.len());
    }

    /// Mark a product as favorite.
    ///
    /// Fails with [`Error::AlreadyFavorited`] without contacting the
    /// service when the id is already present.
    pub async fn add(&mut self, candidate: Favorite) -> Result<()> {
        self.warn_if_uninitialized("add");

        if self.set.contains(&candidate.id) {
            debug!("{} is already a favorite", candidate.id);
            return Err(Error::AlreadyFavorited(candidate.id));
        }

        self.remote.add_favorite(&candidate).await?;

        info!("Added {} to favorites", candidate.id);
        self.set.insert(candidate);
        Ok(())
    }

    /// Remove one favorite. Removing an id that is not present succeeds.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.warn_if_uninitialized("remove");

        self.remote.remove_favorite(id).await?;

        if self.set.remove(id) {
            info!("Removed {} from favorites", id);
        } else {
            debug!("{} was not in the local favorites", id);
        }
        Ok(())
    }

    pub async fn remove_all(&mut self) -> Result<()> {
        self.warn_if_uninitialized("remove_all");

        let removed = self.remote.remove_all_favorites().await?;

        info!(
            "Cleared {} favorites ({} removed remotely)",
            self.set.len(),
            removed.len()
        );
        self.set.clear();
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.set
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn warn_if_uninitialized(&self, operation: &str) {
        if !self.initialized {
            warn!("Favorites {} called before initialize", operation);
        }
    }
}
