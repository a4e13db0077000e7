use serde::{Deserialize, Serialize};

use crate::models::CarRecord;

/// Most cars a single comparison can hold
pub const MAX_COMPARED: usize = 3;

/// Selection of car ids for comparison, deduplicated and capped at three.
///
/// Oversized selections are truncated rather than rejected, matching how
/// selections arriving through shared links were always handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ComparisonSet(Vec<String>);

impl ComparisonSet {
    pub fn new(ids: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::new();
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
            if deduped.len() == MAX_COMPARED {
                break;
            }
        }
        Self(deduped)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ComparisonSet {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

impl From<ComparisonSet> for Vec<String> {
    fn from(set: ComparisonSet) -> Self {
        set.0
    }
}

/// Header column for one compared car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub image: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// One labelled row of formatted values, one per compared car.
///
/// `best` indexes the winning column for numeric rows; `None` when the row is
/// descriptive or the field ties across every car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub values: Vec<String>,
    pub best: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonCategory {
    pub name: String,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub cars: Vec<ComparisonEntry>,
    pub categories: Vec<ComparisonCategory>,
}

/// Build the side-by-side table for up to three cars
pub fn build_comparison(cars: &[CarRecord]) -> ComparisonTable {
    let entries = cars
        .iter()
        .map(|car| ComparisonEntry {
            id: car.id.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            image: car.images.first().cloned(),
            pros: car.pros.iter().take(3).cloned().collect(),
            cons: car.cons.iter().take(3).cloned().collect(),
        })
        .collect();

    let overview = ComparisonCategory {
        name: "Overview".to_string(),
        rows: vec![
            text_row("Brand", cars, |car| car.make.clone()),
            text_row("Model", cars, |car| car.model.clone()),
            numeric_row("Year", cars, |car| car.year as f64, |car| car.year.to_string(), true),
            text_row("Body Type", cars, |car| car.body_type.label().to_string()),
            numeric_row(
                "Price Range",
                cars,
                |car| car.price_range.min,
                |car| {
                    format!("₹{}L - ₹{}L", fmt_lakh(car.price_range.min), fmt_lakh(car.price_range.max))
                },
                false,
            ),
        ],
    };

    let engine = ComparisonCategory {
        name: "Engine & Performance".to_string(),
        rows: vec![
            text_row("Engine", cars, |car| car.specs.engine.clone()),
            text_row("Fuel Type", cars, |car| car.fuel_type.label().to_string()),
            text_row("Transmission", cars, |car| car.specs.transmission.clone()),
            numeric_row(
                "Mileage",
                cars,
                |car| car.mileage,
                |car| format!("{} kmpl", car.mileage),
                true,
            ),
        ],
    };

    let space = ComparisonCategory {
        name: "Space & Practicality".to_string(),
        rows: vec![
            numeric_row(
                "Seating",
                cars,
                |car| car.specs.seating as f64,
                |car| format!("{} Seater", car.specs.seating),
                true,
            ),
            numeric_row(
                "Boot Space",
                cars,
                |car| car.specs.boot_space as f64,
                |car| format!("{}L", car.specs.boot_space),
                true,
            ),
            numeric_row(
                "Ground Clearance",
                cars,
                |car| car.specs.ground_clearance as f64,
                |car| format!("{}mm", car.specs.ground_clearance),
                true,
            ),
        ],
    };

    let safety = ComparisonCategory {
        name: "Safety".to_string(),
        rows: vec![numeric_row(
            "Safety Rating",
            cars,
            |car| car.safety_rating as f64,
            |car| format!("{}/5 Stars", car.safety_rating),
            true,
        )],
    };

    ComparisonTable { cars: entries, categories: vec![overview, engine, space, safety] }
}

fn text_row(label: &str, cars: &[CarRecord], value: impl Fn(&CarRecord) -> String) -> ComparisonRow {
    ComparisonRow {
        label: label.to_string(),
        values: cars.iter().map(value).collect(),
        best: None,
    }
}

fn numeric_row(
    label: &str,
    cars: &[CarRecord],
    key: impl Fn(&CarRecord) -> f64,
    format: impl Fn(&CarRecord) -> String,
    higher_is_better: bool,
) -> ComparisonRow {
    let keys: Vec<f64> = cars.iter().map(&key).collect();
    ComparisonRow {
        label: label.to_string(),
        values: cars.iter().map(format).collect(),
        best: best_index(&keys, higher_is_better),
    }
}

/// Index of the winning value, or `None` on a single column or a full tie
fn best_index(values: &[f64], higher_is_better: bool) -> Option<usize> {
    if values.len() < 2 {
        return None;
    }

    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        let wins = if higher_is_better { *value > values[best] } else { *value < values[best] };
        if wins {
            best = i;
        }
    }

    if values.iter().all(|v| *v == values[best]) {
        None
    } else {
        Some(best)
    }
}

/// Lakh figures print without a trailing `.0`
fn fmt_lakh(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
