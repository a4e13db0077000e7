mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Settings;
use core::{Recommender, SearchEngine};
use models::ScoringWeights;
use routes::{AppState, LimitBounds};
use services::{CatalogStore, FavoritesStore, ResponseCache, UpdateFeed};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting CarMatch Algo catalog service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Load the seed catalog; an empty catalog still serves admin-added cars
    let catalog = match CatalogStore::from_json_file(&settings.catalog.data_path) {
        Ok(catalog) => {
            info!("Catalog loaded from {} ({} cars)", settings.catalog.data_path, catalog.len());
            Arc::new(catalog)
        }
        Err(e) => {
            warn!(
                "Failed to load catalog from {} ({}), starting empty",
                settings.catalog.data_path, e
            );
            Arc::new(CatalogStore::new())
        }
    };

    // Response cache
    let cache = Arc::new(ResponseCache::new(settings.cache.max_entries, settings.cache.ttl_secs));
    info!(
        "Response cache initialized ({} entries, TTL: {}s)",
        settings.cache.max_entries,
        cache.ttl_secs()
    );

    // Update feed for the SSE stream
    let updates = Arc::new(UpdateFeed::new(settings.updates.channel_capacity));

    // Saved-car state
    let favorites = Arc::new(FavoritesStore::new());

    // Recommender with configured weights
    let weights: ScoringWeights = settings.scoring.weights.clone().into();
    let recommender = Recommender::new(weights);
    info!("Recommender initialized with weights: {:?}", weights);

    let search = SearchEngine::new(settings.search.default_limit, settings.search.max_limit);

    // Build application state
    let app_state = AppState {
        catalog,
        cache,
        updates,
        favorites,
        recommender,
        search,
        recommend_limits: LimitBounds {
            default: settings.recommendations.default_limit,
            max: settings.recommendations.max_limit,
        },
        similar_limit: settings.catalog.similar_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
