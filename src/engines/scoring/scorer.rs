use crate::config::ScoringWeights;
use crate::types::{FeatureVector, ScoreSet};

/// Coverage term used when the caller has no per-guide value
pub const DEFAULT_COVERAGE: f64 = 1.0;

/// Scoring model seam. The pipeline only relies on this trait, so the
/// heuristic model can be replaced without touching the other stages.
pub trait GuideScorer: Send + Sync {
    fn on_target_score(&self, features: &FeatureVector) -> f64;

    /// Lower is better
    fn off_target_penalty(&self, features: &FeatureVector) -> f64;

    fn score(&self, features: &FeatureVector, weights: &ScoringWeights, coverage: f64) -> ScoreSet {
        let on_target_score = self.on_target_score(features);
        let off_target_penalty = self.off_target_penalty(features);
        ScoreSet {
            on_target_score,
            off_target_penalty,
            composite_score: composite_score(weights, on_target_score, off_target_penalty, coverage),
        }
    }
}

pub fn composite_score(
    weights: &ScoringWeights,
    on_target: f64,
    off_target: f64,
    coverage: f64,
) -> f64 {
    weights.on_target * on_target - weights.off_target * off_target + weights.coverage * coverage
}

/// GC/stability placeholder model
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl GuideScorer for HeuristicScorer {
    fn on_target_score(&self, features: &FeatureVector) -> f64 {
        let gc_score = (features.gc_content / 50.0).clamp(0.0, 1.0);
        let thermo_score = ((features.thermodynamic_proxy + 10.0) / 20.0).clamp(0.0, 1.0);
        (gc_score + thermo_score) / 2.0
    }

    fn off_target_penalty(&self, features: &FeatureVector) -> f64 {
        (features.gc_content / 100.0) * (1.0 - features.context_weight)
    }
}
