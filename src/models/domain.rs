use serde::{Deserialize, Serialize};

/// Inclusive on-road price band in lakh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// True when `self` sits entirely inside `other`.
    pub fn within(&self, other: &PriceRange) -> bool {
        self.min >= other.min && self.max <= other.max
    }

    /// True when the two bands share any sub-range.
    pub fn overlaps(&self, other: &PriceRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Hatchback,
    Sedan,
    Suv,
    Pickup,
    Convertible,
}

impl BodyType {
    pub fn label(&self) -> &'static str {
        match self {
            BodyType::Hatchback => "Hatchback",
            BodyType::Sedan => "Sedan",
            BodyType::Suv => "SUV",
            BodyType::Pickup => "Pickup",
            BodyType::Convertible => "Convertible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

/// Engine and chassis specification block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSpecs {
    pub engine: String,
    pub transmission: String,
    pub seating: u8,
    #[serde(rename = "bootSpace")]
    pub boot_space: u16,
    #[serde(rename = "groundClearance")]
    pub ground_clearance: u16,
    #[serde(rename = "fuelTankCapacity", default)]
    pub fuel_tank_capacity: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

/// Exterior dimensions in millimetres
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: u16,
    pub width: u16,
    pub height: u16,
    pub wheelbase: u16,
}

/// Feature lists grouped the way listings present them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureGroups {
    #[serde(default)]
    pub safety: Vec<String>,
    #[serde(default)]
    pub comfort: Vec<String>,
    #[serde(default)]
    pub technology: Vec<String>,
    #[serde(default)]
    pub exterior: Vec<String>,
    #[serde(default)]
    pub interior: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarVariant {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    pub engine: String,
    pub transmission: String,
    #[serde(rename = "fuelType")]
    pub fuel_type: FuelType,
    pub mileage: f64,
}

/// A dealer listing attached to a car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerListing {
    pub id: String,
    pub name: String,
    pub location: String,
    pub contact: String,
    pub rating: f64,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "availability")]
    pub available: bool,
    pub price: f64,
    #[serde(default)]
    pub offers: Vec<String>,
}

/// Catalog car record
///
/// Match scores and compatibility reasons are never stored here; they are
/// attached per scoring pass via [`ScoredCar`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(rename = "bodyType")]
    pub body_type: BodyType,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "fuelType")]
    pub fuel_type: FuelType,
    /// kmpl; electric records carry 0 here and track range separately
    pub mileage: f64,
    #[serde(rename = "safetyRating")]
    pub safety_rating: u8,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub specs: CarSpecs,
    #[serde(default)]
    pub features: FeatureGroups,
    #[serde(default)]
    pub variants: Vec<CarVariant>,
    #[serde(default)]
    pub dealers: Vec<DealerListing>,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

impl CarRecord {
    /// Display name, e.g. "Toyota Camry"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// A car annotated with the transient output of one scoring pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCar {
    #[serde(flatten)]
    pub car: CarRecord,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "compatibilityReasons")]
    pub compatibility_reasons: Vec<String>,
}

/// Quiz budget brackets, in lakh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "under-5")]
    Under5,
    #[serde(rename = "5-10")]
    From5To10,
    #[serde(rename = "10-20")]
    From10To20,
    #[serde(rename = "20-35")]
    From20To35,
    #[serde(rename = "above-35")]
    Above35,
}

impl BudgetBracket {
    pub fn price_range(&self) -> PriceRange {
        match self {
            BudgetBracket::Under5 => PriceRange { min: 0.0, max: 5.0 },
            BudgetBracket::From5To10 => PriceRange { min: 5.0, max: 10.0 },
            BudgetBracket::From10To20 => PriceRange { min: 10.0, max: 20.0 },
            BudgetBracket::From20To35 => PriceRange { min: 20.0, max: 35.0 },
            BudgetBracket::Above35 => PriceRange { min: 35.0, max: 100.0 },
        }
    }
}

/// Fuel answer; `Any` is the stated wildcard, not an omitted field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelChoice {
    Any,
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelChoice {
    pub fn accepts(&self, fuel: FuelType) -> bool {
        match self {
            FuelChoice::Any => true,
            FuelChoice::Petrol => fuel == FuelType::Petrol,
            FuelChoice::Diesel => fuel == FuelType::Diesel,
            FuelChoice::Electric => fuel == FuelType::Electric,
            FuelChoice::Hybrid => fuel == FuelType::Hybrid,
        }
    }

    /// The concrete fuel named by this choice, if any
    pub fn named_fuel(&self) -> Option<FuelType> {
        match self {
            FuelChoice::Any => None,
            FuelChoice::Petrol => Some(FuelType::Petrol),
            FuelChoice::Diesel => Some(FuelType::Diesel),
            FuelChoice::Electric => Some(FuelType::Electric),
            FuelChoice::Hybrid => Some(FuelType::Hybrid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatingNeed {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7+")]
    SevenPlus,
}

impl SeatingNeed {
    pub fn min_seats(&self) -> u8 {
        match self {
            SeatingNeed::Two => 2,
            SeatingNeed::Four => 4,
            SeatingNeed::Six => 6,
            SeatingNeed::SevenPlus => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Price,
    Economy,
    Safety,
    Performance,
    Reliability,
    Comfort,
    Technology,
    Style,
}

/// Ordered priority tags, capped at three.
///
/// Longer lists are truncated on construction and on deserialization, never
/// rejected, so the first three stated tags always win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Priority>", into = "Vec<Priority>")]
pub struct PriorityList(Vec<Priority>);

pub const MAX_PRIORITIES: usize = 3;

impl PriorityList {
    pub fn new(mut priorities: Vec<Priority>) -> Self {
        priorities.truncate(MAX_PRIORITIES);
        Self(priorities)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Priority> {
        self.0.iter()
    }

    pub fn contains(&self, priority: Priority) -> bool {
        self.0.contains(&priority)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Priority>> for PriorityList {
    fn from(priorities: Vec<Priority>) -> Self {
        Self::new(priorities)
    }
}

impl From<PriorityList> for Vec<Priority> {
    fn from(list: PriorityList) -> Self {
        list.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommutePattern {
    Short,
    Medium,
    Long,
    Weekend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsagePattern {
    City,
    Highway,
    Mixed,
    Adventure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// One completed quiz, i.e. a user preference set.
///
/// Every field is optional: a skipped question leaves its criterion unable to
/// award points while the criterion maximum still counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(default)]
    pub budget: Option<BudgetBracket>,
    #[serde(rename = "vehicleType", default)]
    pub vehicle_type: Option<BodyType>,
    #[serde(default)]
    pub seating: Option<SeatingNeed>,
    #[serde(rename = "fuelType", default)]
    pub fuel_type: Option<FuelChoice>,
    #[serde(default)]
    pub commute: Option<CommutePattern>,
    #[serde(default)]
    pub usage: Option<UsagePattern>,
    #[serde(rename = "priority", default)]
    pub priorities: PriorityList,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
}

/// Per-criterion point awards for the match-score calculator
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub budget: u32,
    pub budget_partial: u32,
    pub body_type: u32,
    pub fuel_type: u32,
    pub priority: u32,
    pub seating: u32,
}

impl ScoringWeights {
    /// Fixed denominator: every criterion counts whether or not the answer
    /// set allows it to score.
    pub fn max_total(&self) -> u32 {
        self.budget + self.body_type + self.fuel_type + self.priority * MAX_PRIORITIES as u32 + self.seating
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget: 25,
            budget_partial: 15,
            body_type: 20,
            fuel_type: 15,
            priority: 10,
            seating: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Shopper identity; no credentials, no session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    CashDiscount,
    ExchangeBonus,
    Financing,
    Insurance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarOffer {
    pub id: String,
    #[serde(rename = "carId")]
    pub car_id: String,
    #[serde(rename = "dealerId")]
    pub dealer_id: String,
    pub title: String,
    pub description: String,
    pub discount: f64,
    #[serde(rename = "validUntil")]
    pub valid_until: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(rename = "type")]
    pub kind: OfferKind,
    #[serde(rename = "publishedAt")]
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Catalog change event, streamed to subscribers as tagged JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarUpdate {
    CarAdded {
        #[serde(rename = "carId")]
        car_id: String,
        make: String,
        model: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    CarUpdated {
        #[serde(rename = "carId")]
        car_id: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    PriceChange {
        #[serde(rename = "carId")]
        car_id: String,
        #[serde(rename = "oldRange")]
        old_range: PriceRange,
        #[serde(rename = "newRange")]
        new_range: PriceRange,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    AvailabilityChange {
        #[serde(rename = "carId")]
        car_id: String,
        #[serde(rename = "dealerId")]
        dealer_id: String,
        available: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl CarUpdate {
    pub fn car_id(&self) -> &str {
        match self {
            CarUpdate::CarAdded { car_id, .. }
            | CarUpdate::CarUpdated { car_id, .. }
            | CarUpdate::PriceChange { car_id, .. }
            | CarUpdate::AvailabilityChange { car_id, .. } => car_id,
        }
    }

    /// Only added/updated events drop cached responses; price and
    /// availability changes ride on the existing entries until TTL expiry.
    pub fn invalidates_cache(&self) -> bool {
        matches!(self, CarUpdate::CarAdded { .. } | CarUpdate::CarUpdated { .. })
    }
}
