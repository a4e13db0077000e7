// Unit tests for CarMatch Algo

use carmatch_algo::core::{calculate_match_score, compatibility_reasons, ComparisonSet};
use carmatch_algo::models::{
    BodyType, BudgetBracket, CarRecord, CarSpecs, FeatureGroups, FuelChoice, FuelType, PriceRange,
    Priority, PriorityList, QuizAnswers, ScoringWeights, SeatingNeed,
};

fn create_car(min_price: f64, max_price: f64, mileage: f64, safety: u8) -> CarRecord {
    CarRecord {
        id: "car".to_string(),
        make: "Maruti Suzuki".to_string(),
        model: "Swift".to_string(),
        year: 2024,
        body_type: BodyType::Hatchback,
        price_range: PriceRange { min: min_price, max: max_price },
        fuel_type: FuelType::Petrol,
        mileage,
        safety_rating: safety,
        popularity: 50,
        images: vec![],
        colors: vec![],
        pros: vec![],
        cons: vec![],
        specs: CarSpecs {
            engine: "1.2L Petrol".to_string(),
            transmission: "Manual/AMT".to_string(),
            seating: 5,
            boot_space: 268,
            ground_clearance: 163,
            fuel_tank_capacity: Some(37.0),
            dimensions: None,
        },
        features: FeatureGroups::default(),
        variants: vec![],
        dealers: vec![],
        last_updated: None,
    }
}

fn create_answers() -> QuizAnswers {
    QuizAnswers {
        budget: Some(BudgetBracket::From5To10),
        vehicle_type: Some(BodyType::Hatchback),
        seating: Some(SeatingNeed::Four),
        fuel_type: Some(FuelChoice::Petrol),
        commute: None,
        usage: None,
        priorities: PriorityList::new(vec![
            Priority::Economy,
            Priority::Safety,
            Priority::Reliability,
        ]),
        experience: None,
    }
}

#[test]
fn test_score_always_within_bounds() {
    let weights = ScoringWeights::default();
    let answers = create_answers();

    let extremes = [
        create_car(0.0, 0.0, 0.0, 0),
        create_car(6.0, 9.0, 22.5, 5),
        create_car(90.0, 100.0, 5.0, 1),
    ];

    for car in &extremes {
        let (score, _) = calculate_match_score(car, &answers, &weights);
        assert!(score <= 100, "Score {} out of range", score);
    }
}

#[test]
fn test_every_full_tier_hits_100() {
    let car = create_car(6.0, 9.0, 22.5, 5);
    let (score, _) = calculate_match_score(&car, &create_answers(), &ScoringWeights::default());

    assert_eq!(score, 100);
}

#[test]
fn test_empty_answers_fixed_denominator() {
    // The criterion maximum counts even when no answer can score it
    let car = create_car(6.0, 9.0, 22.5, 5);
    let (score, _) =
        calculate_match_score(&car, &QuizAnswers::default(), &ScoringWeights::default());

    assert_eq!(score, 0);
}

#[test]
fn test_sparse_answers_cap_the_percentage() {
    // Budget alone can award at most 25 of 100 points
    let car = create_car(6.0, 9.0, 22.5, 5);
    let answers = QuizAnswers { budget: Some(BudgetBracket::From5To10), ..Default::default() };

    let (score, _) = calculate_match_score(&car, &answers, &ScoringWeights::default());

    assert_eq!(score, 25);
}

#[test]
fn test_priority_truncation_keeps_first_three() {
    let car = create_car(6.0, 9.0, 22.5, 5);
    let weights = ScoringWeights::default();

    // Fourth tag (reliability, which would score) must be dropped
    let mut answers = create_answers();
    answers.priorities = PriorityList::new(vec![
        Priority::Comfort,
        Priority::Style,
        Priority::Technology,
        Priority::Reliability,
    ]);

    let mut unscored_only = create_answers();
    unscored_only.priorities =
        PriorityList::new(vec![Priority::Comfort, Priority::Style, Priority::Technology]);

    let (truncated, _) = calculate_match_score(&car, &answers, &weights);
    let (baseline, _) = calculate_match_score(&car, &unscored_only, &weights);

    assert_eq!(truncated, baseline);
}

#[test]
fn test_priority_order_does_not_change_score() {
    let car = create_car(6.0, 9.0, 16.0, 4);
    let weights = ScoringWeights::default();

    let orders = [
        vec![Priority::Economy, Priority::Safety, Priority::Price],
        vec![Priority::Price, Priority::Economy, Priority::Safety],
        vec![Priority::Safety, Priority::Price, Priority::Economy],
    ];

    let scores: Vec<u8> = orders
        .into_iter()
        .map(|priorities| {
            let mut answers = create_answers();
            answers.priorities = PriorityList::new(priorities);
            calculate_match_score(&car, &answers, &weights).0
        })
        .collect();

    assert!(scores.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_budget_partial_overlap_scores_lower() {
    let weights = ScoringWeights::default();
    let answers = QuizAnswers { budget: Some(BudgetBracket::From5To10), ..Default::default() };

    let (contained, _) = calculate_match_score(&create_car(6.0, 9.0, 20.0, 4), &answers, &weights);
    let (partial, _) = calculate_match_score(&create_car(8.0, 14.0, 20.0, 4), &answers, &weights);
    let (outside, _) = calculate_match_score(&create_car(20.0, 28.0, 20.0, 4), &answers, &weights);

    assert!(contained > partial);
    assert!(partial > outside);
    assert_eq!(outside, 0);
}

#[test]
fn test_any_fuel_wildcard() {
    let weights = ScoringWeights::default();
    let answers = QuizAnswers { fuel_type: Some(FuelChoice::Any), ..Default::default() };

    let mut diesel = create_car(6.0, 9.0, 20.0, 4);
    diesel.fuel_type = FuelType::Diesel;

    let (score, _) = calculate_match_score(&diesel, &answers, &weights);
    assert_eq!(score, 15);
}

#[test]
fn test_reasons_mention_stated_factors_only() {
    let car = create_car(6.0, 9.0, 22.5, 5);

    let reasons = compatibility_reasons(&car, &QuizAnswers::default());
    // Only the unconditional safety callout applies without answers
    assert_eq!(reasons, vec!["High safety rating (5/5 stars)"]);

    let reasons = compatibility_reasons(&car, &create_answers());
    assert!(reasons.len() <= 4);
    assert!(reasons.iter().any(|r| r.contains("budget")));
}

#[test]
fn test_comparison_set_never_rejects() {
    let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    let set = ComparisonSet::new(ids);

    assert_eq!(set.len(), 3);
    assert_eq!(set.as_slice(), ["0", "1", "2"]);
}
