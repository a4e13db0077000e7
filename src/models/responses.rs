use serde::{Deserialize, Serialize};

use crate::models::domain::{BodyType, CarRecord, FuelType, PriceRange, ScoredCar};

/// Filter facets computed over the filtered result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSummary {
    #[serde(rename = "availableBrands")]
    pub available_brands: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "availableFuelTypes")]
    pub available_fuel_types: Vec<FuelType>,
    #[serde(rename = "availableBodyTypes")]
    pub available_body_types: Vec<BodyType>,
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub cars: Vec<CarRecord>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
    pub filters: FacetSummary,
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredCar>,
    #[serde(rename = "totalScored")]
    pub total_scored: usize,
}

/// A user's saved-car list, returned after reads and mutations alike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCarsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "savedCars")]
    pub saved_cars: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
