use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, HealthResponse, RecommendRequest, RecommendResponse, SaveCarRequest,
    SavedCarsResponse,
};
use crate::routes::AppState;
use crate::services::CatalogError;

/// Configure recommendation, favorites and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/users/{user_id}/saved", web::get().to(get_saved_cars))
        .route("/users/{user_id}/saved", web::post().to(save_car))
        .route("/users/{user_id}/saved/{car_id}", web::delete().to(remove_saved_car));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_size = state.catalog.len();
    let status = if catalog_size > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size,
    })
}

/// Score the catalog against one quiz result
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "answers": {
///     "budget": "5-10",
///     "vehicleType": "hatchback",
///     "fuelType": "petrol",
///     "seating": "4",
///     "priority": ["economy", "safety"]
///   },
///   "limit": 8
/// }
/// ```
async fn recommend(state: web::Data<AppState>, req: web::Json<RecommendRequest>) -> impl Responder {
    let limit = state.recommend_limits.resolve(req.limit);

    let result = state.recommender.recommend(&req.answers, state.catalog.all(), limit);

    tracing::info!(
        "Returning {} recommendations (from {} scored cars)",
        result.recommendations.len(),
        result.total_scored
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        total_scored: result.total_scored,
    })
}

fn saved_response(state: &AppState, user_id: &str) -> SavedCarsResponse {
    let saved_cars = state.favorites.list(user_id);
    let count = saved_cars.len();
    SavedCarsResponse { user_id: user_id.to_string(), saved_cars, count }
}

/// List a user's saved cars
///
/// GET /api/users/{user_id}/saved
async fn get_saved_cars(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    HttpResponse::Ok().json(saved_response(&state, &user_id))
}

/// Save a car for a user
///
/// POST /api/users/{user_id}/saved  { "carId": "1" }
async fn save_car(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SaveCarRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = path.into_inner();

    // Only catalog cars can be saved
    if let Err(CatalogError::NotFound(what)) = state.catalog.get(&req.car_id) {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: what,
            status_code: 404,
        });
    }

    if !state.favorites.save(&user_id, &req.car_id) {
        tracing::debug!("Car {} already saved for user {}", req.car_id, user_id);
    }

    HttpResponse::Ok().json(saved_response(&state, &user_id))
}

/// Remove a saved car
///
/// DELETE /api/users/{user_id}/saved/{car_id}
async fn remove_saved_car(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (user_id, car_id) = path.into_inner();

    if !state.favorites.remove(&user_id, &car_id) {
        tracing::debug!("Car {} was not saved for user {}", car_id, user_id);
    }

    HttpResponse::Ok().json(saved_response(&state, &user_id))
}
