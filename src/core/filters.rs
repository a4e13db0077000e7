use crate::models::{CarRecord, SearchParams};

/// Check if a car passes every hard filter in the search parameters
///
/// Unset filters pass everything; list-valued filters pass when the car
/// matches any entry.
#[inline]
pub fn matches_filters(car: &CarRecord, params: &SearchParams) -> bool {
    if let Some(q) = params.q.as_deref() {
        if !matches_query_text(car, q) {
            return false;
        }
    }

    if let Some(min_price) = params.min_price {
        if car.price_range.min < min_price {
            return false;
        }
    }

    if let Some(max_price) = params.max_price {
        if car.price_range.max > max_price {
            return false;
        }
    }

    if !params.fuel_type.is_empty() && !params.fuel_type.contains(&car.fuel_type) {
        return false;
    }

    if !params.brand.is_empty()
        && !params.brand.iter().any(|brand| brand.eq_ignore_ascii_case(&car.make))
    {
        return false;
    }

    if !params.body_type.is_empty() && !params.body_type.contains(&car.body_type) {
        return false;
    }

    if let Some(min_seating) = params.min_seating {
        if car.specs.seating < min_seating {
            return false;
        }
    }

    if let Some(max_seating) = params.max_seating {
        if car.specs.seating > max_seating {
            return false;
        }
    }

    if let Some(min_mileage) = params.min_mileage {
        if car.mileage < min_mileage {
            return false;
        }
    }

    if let Some(min_safety) = params.min_safety {
        if car.safety_rating < min_safety {
            return false;
        }
    }

    // Transmission strings in listings are compound ("Manual/AMT"), so the
    // filter matches on containment.
    if !params.transmission.is_empty()
        && !params.transmission.iter().any(|wanted| {
            car.specs.transmission.to_lowercase().contains(&wanted.to_lowercase())
        })
    {
        return false;
    }

    if let Some(min_year) = params.min_year {
        if car.year < min_year {
            return false;
        }
    }

    if let Some(max_year) = params.max_year {
        if car.year > max_year {
            return false;
        }
    }

    if let Some(location) = params.location.as_deref() {
        if !car
            .dealers
            .iter()
            .any(|dealer| dealer.location.to_lowercase().contains(&location.to_lowercase()))
        {
            return false;
        }
    }

    true
}

/// Free-text match against make, model and the combined display name
#[inline]
pub fn matches_query_text(car: &CarRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    car.make.to_lowercase().contains(&needle)
        || car.model.to_lowercase().contains(&needle)
        || car.display_name().to_lowercase().contains(&needle)
}
