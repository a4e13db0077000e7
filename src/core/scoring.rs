use crate::models::{BodyType, CarRecord, Priority, QuizAnswers, ScoringWeights};

/// Makes with a strong enough service record to satisfy the reliability tag
pub const RELIABLE_MAKES: [&str; 3] = ["Toyota", "Honda", "Maruti Suzuki"];

/// At most this many compatibility reasons are surfaced per car
const MAX_REASONS: usize = 4;

/// Calculate a match score (0-100) for a car against one quiz result
///
/// Scoring table (points / criterion maximum):
///   budget fit        25  (full containment) or 15 (partial overlap)
///   body type         20
///   fuel type         15  (exact match, or the stated "any" wildcard)
///   priorities      3x10  (first three tags, each under its own sub-rule)
///   seating           10
///
/// The denominator is the full table regardless of which answers are present,
/// so a sparse answer set caps the achievable percentage. The result is the
/// awarded/maximum ratio scaled to 100 and rounded to the nearest integer.
pub fn calculate_match_score(
    car: &CarRecord,
    answers: &QuizAnswers,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    let mut awarded: u32 = 0;

    if let Some(bracket) = answers.budget {
        let target = bracket.price_range();
        if car.price_range.within(&target) {
            awarded += weights.budget;
        } else if car.price_range.overlaps(&target) {
            awarded += weights.budget_partial;
        }
    }

    if answers.vehicle_type == Some(car.body_type) {
        awarded += weights.body_type;
    }

    if let Some(choice) = answers.fuel_type {
        if choice.accepts(car.fuel_type) {
            awarded += weights.fuel_type;
        }
    }

    for priority in answers.priorities.iter() {
        awarded += priority_award(car, *priority, weights.priority);
    }

    if let Some(need) = answers.seating {
        if car.specs.seating >= need.min_seats() {
            awarded += weights.seating;
        }
    }

    let max = weights.max_total();
    let score = if max > 0 {
        ((awarded as f64 / max as f64) * 100.0).round() as u8
    } else {
        0
    };

    (score.min(100), compatibility_reasons(car, answers))
}

/// Points for a single priority tag.
///
/// `comfort`, `technology` and `style` can be stated but carry no award rule;
/// they still occupy one of the three slots.
fn priority_award(car: &CarRecord, priority: Priority, full: u32) -> u32 {
    match priority {
        Priority::Economy => {
            if car.mileage >= 18.0 {
                full
            } else if car.mileage >= 15.0 {
                full / 2
            } else {
                0
            }
        }
        Priority::Safety => {
            if car.safety_rating >= 5 {
                full
            } else if car.safety_rating >= 4 {
                full * 7 / 10
            } else {
                0
            }
        }
        Priority::Price => {
            if car.price_range.min <= 10.0 {
                full
            } else if car.price_range.min <= 15.0 {
                full * 7 / 10
            } else {
                0
            }
        }
        Priority::Performance => {
            if car.body_type == BodyType::Suv || car.specs.engine.contains("Turbo") {
                full
            } else {
                0
            }
        }
        Priority::Reliability => {
            if RELIABLE_MAKES.contains(&car.make.as_str()) {
                full
            } else {
                0
            }
        }
        Priority::Comfort | Priority::Technology | Priority::Style => 0,
    }
}

/// Human-readable factors behind a score, capped at four
pub fn compatibility_reasons(car: &CarRecord, answers: &QuizAnswers) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(bracket) = answers.budget {
        if car.price_range.within(&bracket.price_range()) {
            reasons.push("Perfect budget match".to_string());
        }
    }

    if let Some(choice) = answers.fuel_type {
        if choice.named_fuel() == Some(car.fuel_type) {
            reasons.push(format!("{} fuel as preferred", car.fuel_type.label()));
        }
    }

    if answers.vehicle_type == Some(car.body_type) {
        reasons.push(format!("{} body type matches your needs", car.body_type.label()));
    }

    if answers.priorities.contains(Priority::Economy) && car.mileage >= 18.0 {
        reasons.push(format!("Excellent fuel economy ({} kmpl)", car.mileage));
    }

    if car.safety_rating >= 4 {
        reasons.push(format!("High safety rating ({}/5 stars)", car.safety_rating));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
