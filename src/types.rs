use crate::error::{DesignError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Validated nucleotide sequence over `{A, C, G, T}` (case-sensitive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence(String);

impl Sequence {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if let Some((position, symbol)) = raw
            .char_indices()
            .find(|(_, c)| !matches!(c, 'A' | 'C' | 'G' | 'T'))
        {
            return Err(DesignError::InvalidSequence { position, symbol });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A PAM hit with its guide window. Never mutated after the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub locus: usize,
    pub guide_window: Range<usize>,
    pub pam_window: Range<usize>,
    pub guide_sequence: String,
    pub pam_sequence: String,
}

impl Candidate {
    pub fn guide_start(&self) -> usize {
        self.guide_window.start
    }

    pub fn guide_length(&self) -> usize {
        self.guide_window.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub gc_content: f64,
    pub thermodynamic_proxy: f64,
    pub context_weight: f64,
    pub guide_length: usize,
    pub pam_gc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub on_target_score: f64,
    pub off_target_penalty: f64,
    pub composite_score: f64,
}

/// Key the bandit memory is indexed by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyKey {
    pub locus: usize,
    pub guide_sequence: String,
}

impl PolicyKey {
    pub fn new(locus: usize, guide_sequence: impl Into<String>) -> Self {
        Self {
            locus,
            guide_sequence: guide_sequence.into(),
        }
    }
}

impl std::fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.locus, self.guide_sequence)
    }
}

/// Scored guide record handed to the optimizer, the reranker and the caller.
///
/// Assembled field by field from a [`Candidate`], its [`FeatureVector`] and
/// its [`ScoreSet`] so the output schema is fixed at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub locus: usize,
    pub guide_sequence: String,
    pub pam_sequence: String,
    pub pam_start: usize,
    pub guide_start: usize,
    pub gc_content: f64,
    #[serde(rename = "thermodynamic")]
    pub thermodynamic_proxy: f64,
    pub context_weight: f64,
    pub guide_length: usize,
    pub pam_gc: f64,
    pub on_target_score: f64,
    pub off_target_penalty: f64,
    pub composite_score: f64,
    pub candidate_id: String,
}

impl Guide {
    pub fn assemble(
        candidate: &Candidate,
        features: &FeatureVector,
        scores: &ScoreSet,
        candidate_id: String,
    ) -> Self {
        Self {
            locus: candidate.locus,
            guide_sequence: candidate.guide_sequence.clone(),
            pam_sequence: candidate.pam_sequence.clone(),
            pam_start: candidate.pam_window.start,
            guide_start: candidate.guide_start(),
            gc_content: features.gc_content,
            thermodynamic_proxy: features.thermodynamic_proxy,
            context_weight: features.context_weight,
            guide_length: features.guide_length,
            pam_gc: features.pam_gc,
            on_target_score: scores.on_target_score,
            off_target_penalty: scores.off_target_penalty,
            composite_score: scores.composite_score,
            candidate_id,
        }
    }

    pub fn policy_key(&self) -> PolicyKey {
        PolicyKey::new(self.locus, self.guide_sequence.clone())
    }
}

/// Caller-facing identifier, `{gene_id}_{locus}`
pub fn candidate_id(gene_id: &str, locus: usize) -> String {
    format!("{}_{}", gene_id, locus)
}

/// One line of the append-only feedback log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub candidate_id: String,
    pub rating: f64,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_accepts_acgt() {
        let seq = Sequence::new("ACGTACGT").unwrap();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.as_str(), "ACGTACGT");
    }

    #[test]
    fn test_sequence_rejects_lowercase_and_ambiguous() {
        match Sequence::new("ACGtA") {
            Err(DesignError::InvalidSequence { position, symbol }) => {
                assert_eq!(position, 3);
                assert_eq!(symbol, 't');
            }
            other => panic!("expected InvalidSequence, got {:?}", other),
        }
        assert!(Sequence::new("ACGNA").is_err());
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        assert!(Sequence::new("").unwrap().is_empty());
    }

    #[test]
    fn test_guide_serializes_thermodynamic_name() {
        let candidate = Candidate {
            locus: 5,
            guide_window: 2..5,
            pam_window: 5..8,
            guide_sequence: "GCA".to_string(),
            pam_sequence: "TGG".to_string(),
        };
        let features = FeatureVector {
            gc_content: 66.0,
            thermodynamic_proxy: 1.0,
            context_weight: 0.5,
            guide_length: 3,
            pam_gc: 66.0,
        };
        let scores = ScoreSet {
            on_target_score: 0.8,
            off_target_penalty: 0.1,
            composite_score: 0.5,
        };
        let guide = Guide::assemble(&candidate, &features, &scores, candidate_id("BRCA1", 5));
        let json = serde_json::to_value(&guide).unwrap();
        assert_eq!(json["thermodynamic"], 1.0);
        assert_eq!(json["candidate_id"], "BRCA1_5");
        assert_eq!(json["guide_start"], 2);
        assert_eq!(guide.policy_key(), PolicyKey::new(5, "GCA"));
    }
}
