use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::{BodyType, CarRecord, FuelType, PriceRange, QuizAnswers, User};

/// Deserialize a comma-separated query value into a list.
///
/// The search surface carries its multi-value filters as
/// `fuelType=petrol,diesel` rather than repeated keys.
fn comma_separated<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(Vec::new()),
        Some(value) => value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                serde_json::from_value(serde_json::Value::String(part.to_string()))
                    .map_err(serde::de::Error::custom)
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Mileage,
    Safety,
    Popularity,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for catalog search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(rename = "minPrice", default)]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[serde(rename = "fuelType", default, deserialize_with = "comma_separated")]
    pub fuel_type: Vec<FuelType>,
    #[serde(default, deserialize_with = "comma_separated")]
    pub brand: Vec<String>,
    #[serde(rename = "bodyType", default, deserialize_with = "comma_separated")]
    pub body_type: Vec<BodyType>,
    #[serde(rename = "minSeating", default)]
    pub min_seating: Option<u8>,
    #[serde(rename = "maxSeating", default)]
    pub max_seating: Option<u8>,
    #[serde(rename = "minMileage", default)]
    pub min_mileage: Option<f64>,
    #[serde(rename = "minSafety", default)]
    pub min_safety: Option<u8>,
    #[serde(default, deserialize_with = "comma_separated")]
    pub transmission: Vec<String>,
    #[serde(rename = "minYear", default)]
    pub min_year: Option<u16>,
    #[serde(rename = "maxYear", default)]
    pub max_year: Option<u16>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to score the catalog against one quiz result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub answers: QuizAnswers,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Request to fetch several cars by id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchRequest {
    #[validate(length(min = 1))]
    pub ids: Vec<String>,
}

/// Request to compare a selection of cars side by side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "carIds")]
    pub car_ids: Vec<String>,
}

/// Request to add a car to a user's saved list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveCarRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "carId")]
    pub car_id: String,
}

/// Admin upsert of a catalog record.
///
/// The acting user is carried in the body; the handler checks the declared
/// role, the same gate the admin surface always applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertCarRequest {
    pub user: User,
    pub car: CarRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdateRequest {
    pub user: User,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityUpdateRequest {
    pub user: User,
    #[validate(length(min = 1))]
    #[serde(rename = "dealerId")]
    pub dealer_id: String,
    pub available: bool,
}

/// Query string accepted by the offers and similar-cars endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Query string accepted by the availability endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub location: Option<String>,
}
