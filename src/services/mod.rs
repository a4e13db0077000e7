// Service exports
pub mod cache;
pub mod catalog;
pub mod favorites;
pub mod updates;

pub use cache::{CacheError, CacheKey, ResponseCache};
pub use catalog::{CatalogError, CatalogStore};
pub use favorites::FavoritesStore;
pub use updates::{sse_frames, UpdateFeed};
