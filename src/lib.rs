pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager};
pub use engines::design::{DesignRequest, DesignResponse, DesignService};
pub use engines::feedback::FeedbackSubmission;
pub use error::{DesignError, Result};
pub use types::Guide;
