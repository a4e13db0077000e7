// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BodyType, BudgetBracket, CarOffer, CarRecord, CarSpecs, CarUpdate, CarVariant, CommutePattern,
    DealerListing, Dimensions, ExperienceLevel, FeatureGroups, FuelChoice, FuelType, OfferKind,
    PriceRange, Priority, PriorityList, QuizAnswers, ScoredCar, ScoringWeights, SeatingNeed, User,
    UserRole, MAX_PRIORITIES,
};
pub use requests::{
    AvailabilityUpdateRequest, BatchRequest, CompareRequest, LimitQuery, LocationQuery,
    PriceUpdateRequest, RecommendRequest, SaveCarRequest, SearchParams, SortBy, SortOrder,
    UpsertCarRequest,
};
pub use responses::{
    ErrorResponse, FacetSummary, HealthResponse, RecommendResponse, SavedCarsResponse,
    SearchResponse,
};
