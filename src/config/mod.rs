pub mod traits;
pub mod scoring;
pub mod bandit;
pub mod limits;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use scoring::ScoringWeights;
pub use bandit::RlParams;
pub use limits::DesignLimits;
pub use traits::ConfigSection;
