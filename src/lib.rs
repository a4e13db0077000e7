//! CarMatch Algo - Car matching and catalog service for CarMatch
//!
//! This library provides the scoring and search core used by the CarMatch
//! shopping assistant: a fixed-weight match-score calculator over quiz
//! answers, a filter/sort/paginate search pipeline, comparison tooling, and
//! the in-memory catalog, cache and update-feed services behind the HTTP
//! surface.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{build_comparison, calculate_match_score, ComparisonSet, Recommender, SearchEngine};
pub use models::{
    CarRecord, CarUpdate, QuizAnswers, ScoredCar, ScoringWeights, SearchParams, SearchResponse,
};
