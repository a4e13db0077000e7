// Route exports
pub mod cars;
pub mod recommendations;

use std::sync::Arc;

use actix_web::web;

use crate::core::{Recommender, SearchEngine};
use crate::services::{CatalogStore, FavoritesStore, ResponseCache, UpdateFeed};

/// Page-size bounds for a list endpoint
#[derive(Debug, Clone, Copy)]
pub struct LimitBounds {
    pub default: u32,
    pub max: u32,
}

impl LimitBounds {
    pub fn resolve(&self, requested: Option<u32>) -> usize {
        requested.unwrap_or(self.default).clamp(1, self.max) as usize
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub cache: Arc<ResponseCache>,
    pub updates: Arc<UpdateFeed>,
    pub favorites: Arc<FavoritesStore>,
    pub recommender: Recommender,
    pub search: SearchEngine,
    pub recommend_limits: LimitBounds,
    pub similar_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(cars::configure)
            .configure(recommendations::configure),
    );
}
