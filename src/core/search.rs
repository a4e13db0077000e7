use std::collections::BTreeSet;

use crate::core::filters::matches_filters;
use crate::models::{
    CarRecord, FacetSummary, PriceRange, SearchParams, SearchResponse, SortBy, SortOrder,
};

/// Catalog search pipeline: filter, sort, paginate, summarize facets
///
/// Stateless apart from the configured page-size bounds.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine {
    default_limit: u32,
    max_limit: u32,
}

impl SearchEngine {
    pub fn new(default_limit: u32, max_limit: u32) -> Self {
        Self { default_limit, max_limit }
    }

    /// Run one search over a snapshot of the catalog
    pub fn search(&self, cars: Vec<CarRecord>, params: &SearchParams) -> SearchResponse {
        let mut filtered: Vec<CarRecord> =
            cars.into_iter().filter(|car| matches_filters(car, params)).collect();

        let facets = summarize_facets(&filtered);

        // Explicit sort key when given; otherwise most popular first
        match params.sort_by {
            Some(sort_by) => {
                let order = params.sort_order.unwrap_or(SortOrder::Asc);
                sort_cars(&mut filtered, sort_by, order);
            }
            None => sort_cars(&mut filtered, SortBy::Popularity, SortOrder::Desc),
        }

        let limit = params.limit.unwrap_or(self.default_limit).clamp(1, self.max_limit);
        let page = params.page.unwrap_or(1).max(1);

        let total_count = filtered.len();
        let total_pages = (total_count as u32).div_ceil(limit);

        let cars: Vec<CarRecord> = filtered
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();

        SearchResponse {
            cars,
            total_count,
            current_page: page,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1 && total_pages > 0,
            filters: facets,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(20, 100)
    }
}

fn sort_cars(cars: &mut [CarRecord], sort_by: SortBy, order: SortOrder) {
    cars.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Price => a
                .price_range
                .min
                .partial_cmp(&b.price_range.min)
                .unwrap_or(std::cmp::Ordering::Equal),
            SortBy::Mileage => {
                a.mileage.partial_cmp(&b.mileage).unwrap_or(std::cmp::Ordering::Equal)
            }
            SortBy::Safety => a.safety_rating.cmp(&b.safety_rating),
            SortBy::Popularity => a.popularity.cmp(&b.popularity),
            SortBy::Year => a.year.cmp(&b.year),
        };

        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Facets over the filtered set, computed before pagination
fn summarize_facets(cars: &[CarRecord]) -> FacetSummary {
    let mut brands = BTreeSet::new();
    let mut fuel_types = BTreeSet::new();
    let mut body_types = BTreeSet::new();
    let mut price_range = PriceRange { min: 0.0, max: 0.0 };

    for (i, car) in cars.iter().enumerate() {
        brands.insert(car.make.clone());
        fuel_types.insert(car.fuel_type);
        body_types.insert(car.body_type);

        if i == 0 {
            price_range = car.price_range;
        } else {
            price_range.min = price_range.min.min(car.price_range.min);
            price_range.max = price_range.max.max(car.price_range.max);
        }
    }

    FacetSummary {
        available_brands: brands.into_iter().collect(),
        price_range,
        available_fuel_types: fuel_types.into_iter().collect(),
        available_body_types: body_types.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyType, CarSpecs, FeatureGroups, FuelType};

    fn create_car(id: &str, make: &str, price_min: f64, year: u16, popularity: u32) -> CarRecord {
        CarRecord {
            id: id.to_string(),
            make: make.to_string(),
            model: format!("Model {}", id),
            year,
            body_type: BodyType::Suv,
            price_range: PriceRange { min: price_min, max: price_min + 4.0 },
            fuel_type: FuelType::Petrol,
            mileage: 15.0 + popularity as f64 / 10.0,
            safety_rating: 4,
            popularity,
            images: vec![],
            colors: vec![],
            pros: vec![],
            cons: vec![],
            specs: CarSpecs {
                engine: "1.5L Petrol".to_string(),
                transmission: "Manual/AT".to_string(),
                seating: 5,
                boot_space: 400,
                ground_clearance: 190,
                fuel_tank_capacity: None,
                dimensions: None,
            },
            features: FeatureGroups::default(),
            variants: vec![],
            dealers: vec![],
            last_updated: None,
        }
    }

    #[test]
    fn test_default_sort_is_popularity_desc() {
        let engine = SearchEngine::default();
        let cars = vec![
            create_car("a", "Tata", 10.0, 2023, 5),
            create_car("b", "Kia", 12.0, 2024, 50),
            create_car("c", "Honda", 14.0, 2022, 20),
        ];

        let response = engine.search(cars, &SearchParams::default());

        let ids: Vec<&str> = response.cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_price_desc() {
        let engine = SearchEngine::default();
        let cars = vec![
            create_car("a", "Tata", 10.0, 2023, 5),
            create_car("b", "Kia", 12.0, 2024, 50),
        ];

        let params = SearchParams {
            sort_by: Some(SortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let response = engine.search(cars, &params);

        assert_eq!(response.cars[0].id, "b");
    }

    #[test]
    fn test_pagination() {
        let engine = SearchEngine::default();
        let cars: Vec<CarRecord> =
            (0..25).map(|i| create_car(&i.to_string(), "Tata", 10.0, 2024, i)).collect();

        let params = SearchParams { page: Some(2), limit: Some(10), ..Default::default() };
        let response = engine.search(cars, &params);

        assert_eq!(response.total_count, 25);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.cars.len(), 10);
        assert_eq!(response.current_page, 2);
        assert!(response.has_next_page);
        assert!(response.has_previous_page);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let engine = SearchEngine::new(20, 100);
        let cars: Vec<CarRecord> =
            (0..150).map(|i| create_car(&i.to_string(), "Tata", 10.0, 2024, i)).collect();

        let params = SearchParams { limit: Some(500), ..Default::default() };
        let response = engine.search(cars, &params);

        assert_eq!(response.cars.len(), 100);
    }

    #[test]
    fn test_facets_cover_filtered_set() {
        let engine = SearchEngine::default();
        let mut diesel = create_car("d", "Mahindra", 14.0, 2024, 30);
        diesel.fuel_type = FuelType::Diesel;
        let cars = vec![create_car("a", "Tata", 10.0, 2024, 5), diesel];

        let response = engine.search(cars, &SearchParams::default());

        assert_eq!(response.filters.available_brands, vec!["Mahindra", "Tata"]);
        assert_eq!(
            response.filters.available_fuel_types,
            vec![FuelType::Petrol, FuelType::Diesel]
        );
        assert_eq!(response.filters.price_range, PriceRange { min: 10.0, max: 18.0 });
    }

    #[test]
    fn test_empty_result_page_flags() {
        let engine = SearchEngine::default();
        let params = SearchParams { q: Some("nonexistent".to_string()), ..Default::default() };

        let response = engine.search(vec![create_car("a", "Tata", 10.0, 2024, 5)], &params);

        assert_eq!(response.total_count, 0);
        assert_eq!(response.total_pages, 0);
        assert!(!response.has_next_page);
        assert!(!response.has_previous_page);
    }
}
