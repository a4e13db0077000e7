use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Per-user saved-car lists
///
/// Keeps insertion order per user so the saved page reads in the order cars
/// were bookmarked. State is process-local, like the rest of this service.
#[derive(Default)]
pub struct FavoritesStore {
    inner: RwLock<HashMap<String, Vec<String>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a car for a user; returns false when it was already saved
    pub fn save(&self, user_id: &str, car_id: &str) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let saved = inner.entry(user_id.to_string()).or_default();

        if saved.iter().any(|id| id == car_id) {
            return false;
        }

        saved.push(car_id.to_string());
        true
    }

    /// Remove a saved car; returns false when it was not saved
    pub fn remove(&self, user_id: &str, car_id: &str) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        match inner.get_mut(user_id) {
            Some(saved) => {
                let before = saved.len();
                saved.retain(|id| id != car_id);
                saved.len() != before
            }
            None => false,
        }
    }

    pub fn list(&self, user_id: &str) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, user_id: &str) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
