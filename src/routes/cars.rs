use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{build_comparison, ComparisonSet};
use crate::models::{
    AvailabilityUpdateRequest, BatchRequest, CarOffer, CarRecord, CarUpdate, CompareRequest,
    ErrorResponse, LimitQuery, LocationQuery, PriceUpdateRequest, SearchParams, SearchResponse,
    UpsertCarRequest,
};
use crate::routes::AppState;
use crate::services::{sse_frames, CacheKey, CatalogError};

/// Offers default to the ten most recent when no limit is given
const DEFAULT_OFFERS_LIMIT: usize = 10;
const MAX_OFFERS_LIMIT: usize = 50;

/// Configure all catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/cars/search", web::get().to(search_cars))
        .route("/cars/offers", web::get().to(latest_offers))
        .route("/cars/batch", web::post().to(batch_cars))
        .route("/cars/compare", web::post().to(compare_cars))
        .route("/cars/updates", web::get().to(stream_updates))
        .route("/cars", web::post().to(upsert_car))
        .route("/cars/{id}/similar", web::get().to(similar_cars))
        .route("/cars/{id}/availability", web::get().to(car_availability))
        .route("/cars/{id}/availability", web::put().to(set_availability))
        .route("/cars/{id}/price", web::put().to(update_price))
        .route("/cars/{id}", web::get().to(get_car));
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not found".to_string(),
        message,
        status_code: 404,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse {
        error: "Forbidden".to_string(),
        message: "Admin role required".to_string(),
        status_code: 403,
    })
}

/// Search the catalog
///
/// GET /api/cars/search?q=swift&fuelType=petrol,hybrid&minPrice=5&sortBy=price
async fn search_cars(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    let cache_key = CacheKey::search(&params);

    if let Ok(cached) = state.cache.get::<SearchResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let response = state.search.search(state.catalog.all(), &params);

    tracing::debug!(
        "Search returned {} of {} cars (page {})",
        response.cars.len(),
        response.total_count,
        response.current_page
    );

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache search page: {}", e);
    }

    HttpResponse::Ok().json(response)
}

/// Fetch one car by id
///
/// GET /api/cars/{id}
async fn get_car(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let cache_key = CacheKey::car(&id);

    if let Ok(cached) = state.cache.get::<CarRecord>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match state.catalog.get(&id) {
        Ok(car) => {
            if let Err(e) = state.cache.set(&cache_key, &car).await {
                tracing::warn!("Failed to cache car {}: {}", id, e);
            }
            HttpResponse::Ok().json(car)
        }
        Err(CatalogError::NotFound(what)) => not_found(what),
        Err(e) => {
            tracing::error!("Failed to fetch car {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch car".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Latest offers across the catalog
///
/// GET /api/cars/offers?limit=10
async fn latest_offers(state: web::Data<AppState>, query: web::Query<LimitQuery>) -> impl Responder {
    let limit = query
        .limit
        .map(|l| l as usize)
        .unwrap_or(DEFAULT_OFFERS_LIMIT)
        .clamp(1, MAX_OFFERS_LIMIT);

    let cache_key = CacheKey::offers(limit);
    if let Ok(cached) = state.cache.get::<Vec<CarOffer>>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let offers = state.catalog.latest_offers(limit);
    if let Err(e) = state.cache.set(&cache_key, &offers).await {
        tracing::warn!("Failed to cache offers: {}", e);
    }

    HttpResponse::Ok().json(offers)
}

/// Fetch several cars by id
///
/// POST /api/cars/batch  { "ids": ["1", "2"] }
async fn batch_cars(state: web::Data<AppState>, req: web::Json<BatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let cache_key = CacheKey::batch(&req.ids);
    if let Ok(cached) = state.cache.get::<Vec<CarRecord>>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let cars = state.catalog.batch(&req.ids);
    if let Err(e) = state.cache.set(&cache_key, &cars).await {
        tracing::warn!("Failed to cache batch: {}", e);
    }

    HttpResponse::Ok().json(cars)
}

/// Compare up to three cars side by side
///
/// POST /api/cars/compare  { "carIds": ["1", "2", "3"] }
async fn compare_cars(state: web::Data<AppState>, req: web::Json<CompareRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let selection = ComparisonSet::new(req.into_inner().car_ids);
    let cars = state.catalog.batch(selection.as_slice());

    if cars.is_empty() {
        return not_found("no cars in selection".to_string());
    }

    HttpResponse::Ok().json(build_comparison(&cars))
}

/// Similarity-ranked neighbors of a car
///
/// GET /api/cars/{id}/similar?limit=5
async fn similar_cars(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    let id = path.into_inner();
    let limit = query.limit.map(|l| l as usize).unwrap_or(state.similar_limit).clamp(1, 50);

    match state.catalog.similar(&id, limit) {
        Ok(cars) => HttpResponse::Ok().json(cars),
        Err(CatalogError::NotFound(what)) => not_found(what),
        Err(e) => {
            tracing::error!("Failed to rank similar cars for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to rank similar cars".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Dealer availability for a car
///
/// GET /api/cars/{id}/availability?location=mumbai
async fn car_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.availability(&id, query.location.as_deref()) {
        Ok(dealers) => HttpResponse::Ok().json(dealers),
        Err(CatalogError::NotFound(what)) => not_found(what),
        Err(e) => {
            tracing::error!("Failed to fetch availability for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch availability".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Live catalog updates as Server-Sent Events
///
/// GET /api/cars/updates
async fn stream_updates(state: web::Data<AppState>) -> impl Responder {
    let receiver = state.updates.subscribe();

    tracing::debug!("Update subscriber connected ({} active)", state.updates.subscriber_count());

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(sse_frames(receiver))
}

/// Publish an event and apply its cache rule
async fn broadcast(state: &AppState, update: CarUpdate) {
    if let Err(e) = state.cache.handle_update(&update).await {
        tracing::warn!("Failed to invalidate cache for {}: {}", update.car_id(), e);
    }
    state.updates.publish(update);
}

/// Admin: insert or replace a catalog record
///
/// POST /api/cars  { "user": {..}, "car": {..} }
async fn upsert_car(state: web::Data<AppState>, req: web::Json<UpsertCarRequest>) -> impl Responder {
    if !req.user.is_admin() {
        return forbidden();
    }

    let mut car = req.into_inner().car;
    if car.id.is_empty() {
        car.id = uuid::Uuid::new_v4().to_string();
    }

    let update = state.catalog.upsert_car(car);
    tracing::info!("Catalog upsert for car {}", update.car_id());

    broadcast(&state, update.clone()).await;

    HttpResponse::Ok().json(update)
}

/// Admin: reprice a car
///
/// PUT /api/cars/{id}/price  { "user": {..}, "priceRange": {..} }
async fn update_price(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PriceUpdateRequest>,
) -> impl Responder {
    if !req.user.is_admin() {
        return forbidden();
    }

    let id = path.into_inner();
    match state.catalog.update_price(&id, req.price_range) {
        Ok(update) => {
            broadcast(&state, update.clone()).await;
            HttpResponse::Ok().json(update)
        }
        Err(CatalogError::NotFound(what)) => not_found(what),
        Err(e) => {
            tracing::error!("Failed to reprice car {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to reprice car".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Admin: flip a dealer's availability flag
///
/// PUT /api/cars/{id}/availability  { "user": {..}, "dealerId": "d1", "available": false }
async fn set_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AvailabilityUpdateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    if !req.user.is_admin() {
        return forbidden();
    }

    let id = path.into_inner();
    match state.catalog.set_availability(&id, &req.dealer_id, req.available) {
        Ok(update) => {
            broadcast(&state, update.clone()).await;
            HttpResponse::Ok().json(update)
        }
        Err(CatalogError::NotFound(what)) => not_found(what),
        Err(e) => {
            tracing::error!("Failed to update availability for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update availability".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
