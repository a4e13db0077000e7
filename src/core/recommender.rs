use crate::core::scoring::calculate_match_score;
use crate::models::{CarRecord, QuizAnswers, ScoredCar, ScoringWeights};

/// Result of one recommendation pass
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredCar>,
    pub total_scored: usize,
}

/// Scores and ranks the catalog against a quiz result
///
/// The weight table is injected once at construction; handlers share a single
/// instance through application state rather than reaching for ambient
/// globals.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Score every candidate, rank by match score, keep the top `limit`.
    ///
    /// Ties break toward the cheaper car. Scores and reasons live only on the
    /// returned [`ScoredCar`]s; the catalog records themselves are untouched.
    pub fn recommend(
        &self,
        answers: &QuizAnswers,
        candidates: Vec<CarRecord>,
        limit: usize,
    ) -> RecommendationResult {
        let total_scored = candidates.len();

        let mut scored: Vec<ScoredCar> = candidates
            .into_iter()
            .map(|car| {
                let (match_score, compatibility_reasons) =
                    calculate_match_score(&car, answers, &self.weights);
                ScoredCar { car, match_score, compatibility_reasons }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.match_score.cmp(&a.match_score).then_with(|| {
                a.car
                    .price_range
                    .min
                    .partial_cmp(&b.car.price_range.min)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        scored.truncate(limit);

        RecommendationResult { recommendations: scored, total_scored }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
