pub mod scorer;

pub use scorer::{composite_score, GuideScorer, HeuristicScorer, DEFAULT_COVERAGE};
