pub mod bandit;
pub mod pareto;
pub mod reranker;

pub use bandit::{BanditMemory, BanditOptimizer};
pub use pareto::OptimizationDirection;
pub use reranker::DiversityReranker;
