use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{CarOffer, CarRecord, CarUpdate, DealerListing, PriceRange};

/// Errors that can occur with catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Seed file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seed file layout
#[derive(Debug, Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    cars: Vec<CarRecord>,
    #[serde(default)]
    offers: Vec<CarOffer>,
}

#[derive(Default)]
struct CatalogInner {
    cars: HashMap<String, CarRecord>,
    offers: Vec<CarOffer>,
}

/// In-memory car catalog
///
/// The whole inventory lives in process; mutations come only through the
/// admin surface and hand back the [`CarUpdate`] event to broadcast.
pub struct CatalogStore {
    inner: RwLock<CatalogInner>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(CatalogInner::default()) }
    }

    /// Load the catalog from a JSON seed file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;

        let cars = seed.cars.into_iter().map(|car| (car.id.clone(), car)).collect();

        Ok(Self { inner: RwLock::new(CatalogInner { cars, offers: seed.offers }) })
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().cars.is_empty()
    }

    /// Snapshot of every record, for search and scoring passes
    pub fn all(&self) -> Vec<CarRecord> {
        self.read().cars.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Result<CarRecord, CatalogError> {
        self.read()
            .cars
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("car {}", id)))
    }

    /// Fetch several cars preserving request order; unknown ids are skipped
    pub fn batch(&self, ids: &[String]) -> Vec<CarRecord> {
        let inner = self.read();
        ids.iter().filter_map(|id| inner.cars.get(id).cloned()).collect()
    }

    /// Cars ranked by likeness to the given one.
    ///
    /// Likeness is a small point scale: shared body type 3, price-band
    /// overlap 2, shared fuel type 2, shared make 1. Zero-point cars and the
    /// car itself never appear.
    pub fn similar(&self, id: &str, limit: usize) -> Result<Vec<CarRecord>, CatalogError> {
        let reference = self.get(id)?;
        let inner = self.read();

        let mut scored: Vec<(u32, &CarRecord)> = inner
            .cars
            .values()
            .filter(|car| car.id != reference.id)
            .filter_map(|car| {
                let mut points = 0;
                if car.body_type == reference.body_type {
                    points += 3;
                }
                if car.price_range.overlaps(&reference.price_range) {
                    points += 2;
                }
                if car.fuel_type == reference.fuel_type {
                    points += 2;
                }
                if car.make == reference.make {
                    points += 1;
                }
                (points > 0).then_some((points, car))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0).then_with(|| b.1.popularity.cmp(&a.1.popularity))
        });

        Ok(scored.into_iter().take(limit).map(|(_, car)| car.clone()).collect())
    }

    /// Most recently published offers first
    pub fn latest_offers(&self, limit: usize) -> Vec<CarOffer> {
        let inner = self.read();
        let mut offers = inner.offers.clone();
        offers.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        offers.truncate(limit);
        offers
    }

    /// Dealer listings for a car, optionally narrowed by location substring
    pub fn availability(
        &self,
        id: &str,
        location: Option<&str>,
    ) -> Result<Vec<DealerListing>, CatalogError> {
        let car = self.get(id)?;

        let dealers = match location {
            Some(location) => {
                let needle = location.to_lowercase();
                car.dealers
                    .into_iter()
                    .filter(|dealer| dealer.location.to_lowercase().contains(&needle))
                    .collect()
            }
            None => car.dealers,
        };

        Ok(dealers)
    }

    /// Insert or replace a record; stamps `last_updated` and reports which
    /// event the change amounts to.
    pub fn upsert_car(&self, mut car: CarRecord) -> CarUpdate {
        let now = chrono::Utc::now();
        car.last_updated = Some(now);

        let mut inner = self.write();
        let existed = inner.cars.contains_key(&car.id);
        let update = if existed {
            CarUpdate::CarUpdated { car_id: car.id.clone(), timestamp: now }
        } else {
            CarUpdate::CarAdded {
                car_id: car.id.clone(),
                make: car.make.clone(),
                model: car.model.clone(),
                timestamp: now,
            }
        };
        inner.cars.insert(car.id.clone(), car);

        update
    }

    pub fn update_price(&self, id: &str, new_range: PriceRange) -> Result<CarUpdate, CatalogError> {
        let now = chrono::Utc::now();
        let mut inner = self.write();

        let car = inner
            .cars
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(format!("car {}", id)))?;

        let old_range = car.price_range;
        car.price_range = new_range;
        car.last_updated = Some(now);

        Ok(CarUpdate::PriceChange { car_id: id.to_string(), old_range, new_range, timestamp: now })
    }

    pub fn set_availability(
        &self,
        id: &str,
        dealer_id: &str,
        available: bool,
    ) -> Result<CarUpdate, CatalogError> {
        let now = chrono::Utc::now();
        let mut inner = self.write();

        let car = inner
            .cars
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(format!("car {}", id)))?;

        let dealer = car
            .dealers
            .iter_mut()
            .find(|dealer| dealer.id == dealer_id)
            .ok_or_else(|| CatalogError::NotFound(format!("dealer {} for car {}", dealer_id, id)))?;

        dealer.available = available;
        car.last_updated = Some(now);

        Ok(CarUpdate::AvailabilityChange {
            car_id: id.to_string(),
            dealer_id: dealer_id.to_string(),
            available,
            timestamp: now,
        })
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
