// Integration tests for CarMatch Algo

use carmatch_algo::core::{build_comparison, Recommender, SearchEngine};
use carmatch_algo::models::{
    BodyType, BudgetBracket, CarRecord, CarSpecs, CarUpdate, DealerListing, FeatureGroups,
    FuelChoice, FuelType, PriceRange, Priority, PriorityList, QuizAnswers, SearchParams,
    SeatingNeed, SortBy, SortOrder,
};
use carmatch_algo::services::{CacheKey, CatalogStore, FavoritesStore, ResponseCache};

fn create_car(
    id: &str,
    make: &str,
    body_type: BodyType,
    fuel: FuelType,
    min_price: f64,
    mileage: f64,
    safety: u8,
    popularity: u32,
) -> CarRecord {
    CarRecord {
        id: id.to_string(),
        make: make.to_string(),
        model: format!("{} {}", make, id),
        year: 2024,
        body_type,
        price_range: PriceRange { min: min_price, max: min_price + 5.0 },
        fuel_type: fuel,
        mileage,
        safety_rating: safety,
        popularity,
        images: vec![],
        colors: vec![],
        pros: vec!["Good value".to_string()],
        cons: vec!["Waiting period".to_string()],
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
        dealers: vec![DealerListing {
            id: format!("{}-d1", id),
            name: "Metro Cars".to_string(),
            location: "Mumbai".to_string(),
            contact: "sales@metrocars.example".to_string(),
            rating: 4.2,
            distance_km: 5.0,
            available: true,
            price: min_price + 0.5,
            offers: vec![],
        }],
        last_updated: None,
    }
}

fn showroom() -> Vec<CarRecord> {
    vec![
        create_car("hatch", "Maruti Suzuki", BodyType::Hatchback, FuelType::Petrol, 6.0, 22.5, 4, 95),
        create_car("sedan", "Honda", BodyType::Sedan, FuelType::Petrol, 11.0, 17.8, 5, 60),
        create_car("suv", "Hyundai", BodyType::Suv, FuelType::Petrol, 11.0, 17.4, 4, 92),
        create_car("diesel-suv", "Mahindra", BodyType::Suv, FuelType::Diesel, 14.0, 16.5, 5, 88),
        create_car("lux", "Toyota", BodyType::Sedan, FuelType::Hybrid, 28.0, 19.1, 5, 61),
    ]
}

fn budget_suv_answers() -> QuizAnswers {
    QuizAnswers {
        budget: Some(BudgetBracket::From10To20),
        vehicle_type: Some(BodyType::Suv),
        seating: Some(SeatingNeed::Four),
        fuel_type: Some(FuelChoice::Any),
        commute: None,
        usage: None,
        priorities: PriorityList::new(vec![Priority::Safety, Priority::Price]),
        experience: None,
    }
}

#[test]
fn test_end_to_end_recommendation_flow() {
    let recommender = Recommender::with_default_weights();
    let answers = budget_suv_answers();

    let result = recommender.recommend(&answers, showroom(), 3);

    assert_eq!(result.total_scored, 5);
    assert_eq!(result.recommendations.len(), 3);

    // SUVs in budget must rank above everything else
    let top_ids: Vec<&str> =
        result.recommendations.iter().take(2).map(|s| s.car.id.as_str()).collect();
    assert!(top_ids.contains(&"suv"));
    assert!(top_ids.contains(&"diesel-suv"));

    // Ranked descending, every score in range, reasons attached
    for pair in result.recommendations.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    for scored in &result.recommendations {
        assert!(scored.match_score <= 100);
        assert!(!scored.compatibility_reasons.is_empty());
    }
}

#[test]
fn test_search_filter_sort_paginate() {
    let engine = SearchEngine::new(2, 100);

    let params = SearchParams {
        fuel_type: vec![FuelType::Petrol],
        max_price: Some(20.0),
        sort_by: Some(SortBy::Price),
        sort_order: Some(SortOrder::Asc),
        ..Default::default()
    };

    let page1 = engine.search(showroom(), &params);
    assert_eq!(page1.total_count, 3);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.cars[0].id, "hatch");
    assert!(page1.has_next_page);

    let page2 = engine.search(
        showroom(),
        &SearchParams { page: Some(2), ..params },
    );
    assert_eq!(page2.cars.len(), 1);
    assert!(page2.has_previous_page);

    // Facets describe the filtered set, not the page
    assert_eq!(page1.filters.available_fuel_types, vec![FuelType::Petrol]);
    assert_eq!(page1.filters.available_brands.len(), 3);
}

#[test]
fn test_catalog_similarity_and_batch() {
    let store = CatalogStore::new();
    for car in showroom() {
        store.upsert_car(car);
    }

    let similar = store.similar("suv", 3).unwrap();
    assert!(!similar.is_empty());
    // The other SUV shares body type and overlapping price band
    assert_eq!(similar[0].id, "diesel-suv");
    assert!(similar.iter().all(|car| car.id != "suv"));

    let batch = store.batch(&["lux".to_string(), "missing".to_string(), "hatch".to_string()]);
    let ids: Vec<&str> = batch.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["lux", "hatch"]);
}

#[test]
fn test_comparison_of_catalog_records() {
    let cars = showroom();
    let table = build_comparison(&cars[..3]);

    assert_eq!(table.cars.len(), 3);

    let overview = &table.categories[0];
    let price_row = overview.rows.iter().find(|r| r.label == "Price Range").unwrap();
    assert_eq!(price_row.best, Some(0)); // the hatchback is cheapest
    assert_eq!(price_row.values[0], "₹6L - ₹11L");
}

#[tokio::test]
async fn test_cache_invalidation_through_update_events() {
    let cache = ResponseCache::new(100, 300);
    let store = CatalogStore::new();
    for car in showroom() {
        store.upsert_car(car);
    }

    let params = SearchParams::default();
    cache.set(&CacheKey::search(&params), &"search-page").await.unwrap();
    cache.set(&CacheKey::car("suv"), &"car-page").await.unwrap();

    // A price change leaves cached entries alone
    let price_update =
        store.update_price("suv", PriceRange { min: 10.5, max: 15.5 }).unwrap();
    cache.handle_update(&price_update).await.unwrap();
    assert!(cache.get::<String>(&CacheKey::car("suv")).await.is_ok());

    // Re-upserting the record is a car_updated event and drops both entries
    let car = store.get("suv").unwrap();
    let update = store.upsert_car(car);
    assert!(matches!(update, CarUpdate::CarUpdated { .. }));
    cache.handle_update(&update).await.unwrap();

    assert!(cache.get::<String>(&CacheKey::car("suv")).await.is_err());
    assert!(cache.get::<String>(&CacheKey::search(&params)).await.is_err());
}

#[test]
fn test_favorites_flow() {
    let favorites = FavoritesStore::new();

    assert!(favorites.save("shopper", "suv"));
    assert!(favorites.save("shopper", "hatch"));
    assert!(!favorites.save("shopper", "suv"));

    assert_eq!(favorites.list("shopper"), vec!["suv", "hatch"]);
    assert!(favorites.remove("shopper", "suv"));
    assert_eq!(favorites.count("shopper"), 1);
}
