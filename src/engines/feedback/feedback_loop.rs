use super::registry::CandidateRegistry;
use super::store::FeedbackLog;
use crate::engines::optimisation::BanditOptimizer;
use crate::error::{DesignError, Result};
use crate::types::FeedbackRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub candidate_id: String,
    pub rating: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FeedbackSubmission {
    pub fn new(candidate_id: impl Into<String>, rating: f64) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            rating,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub candidate_id: String,
    pub reward: f64,
    /// Bandit estimate for the guide after this update
    pub updated_value: f64,
}

/// Turns ratings into rewards for the bandit.
///
/// A submission is accepted only if its candidate id was issued by a design
/// request; it is then logged and applied as exactly one policy update.
pub struct FeedbackLoop {
    registry: Arc<CandidateRegistry>,
    optimizer: Arc<BanditOptimizer>,
    log: Box<dyn FeedbackLog>,
}

impl FeedbackLoop {
    pub fn new(
        registry: Arc<CandidateRegistry>,
        optimizer: Arc<BanditOptimizer>,
        log: Box<dyn FeedbackLog>,
    ) -> Self {
        Self {
            registry,
            optimizer,
            log,
        }
    }

    pub fn log(&self) -> &dyn FeedbackLog {
        self.log.as_ref()
    }

    pub fn submit(&self, submission: FeedbackSubmission) -> Result<FeedbackAck> {
        let reward = normalize_rating(submission.rating)?;

        let key = self.registry.resolve(&submission.candidate_id).ok_or_else(|| {
            log::warn!("Feedback for unknown candidate {}", submission.candidate_id);
            DesignError::UnknownFeedbackTarget(submission.candidate_id.clone())
        })?;

        let record = FeedbackRecord {
            candidate_id: submission.candidate_id,
            rating: submission.rating,
            notes: submission.notes.unwrap_or_default(),
            timestamp: Utc::now(),
        };
        self.log.append(&record)?;

        let updated_value = self.optimizer.update_policy(&key, reward)?;
        log::info!(
            "Feedback {} rated {} (reward {:.2}, estimate now {:.4})",
            record.candidate_id,
            record.rating,
            reward,
            updated_value
        );

        Ok(FeedbackAck {
            candidate_id: record.candidate_id,
            reward,
            updated_value,
        })
    }
}

/// Map a rating in [1, 5] to a reward in [0.2, 1]
pub fn normalize_rating(rating: f64) -> Result<f64> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DesignError::InvalidFeedback(format!(
            "rating must be within [{}, {}], got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(rating / MAX_RATING)
}
