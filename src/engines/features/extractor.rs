use crate::types::{Candidate, FeatureVector};

/// Derives the feature vector of a candidate. Stateless: the output depends
/// only on the candidate and the sequence length.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, candidate: &Candidate, sequence_length: usize) -> FeatureVector {
        FeatureVector {
            gc_content: gc_content(&candidate.guide_sequence),
            thermodynamic_proxy: thermodynamic_proxy(&candidate.guide_sequence),
            context_weight: context_weight(candidate.locus, sequence_length),
            guide_length: candidate.guide_length(),
            pam_gc: gc_content(&candidate.pam_sequence),
        }
    }
}

fn count_gc(sequence: &str) -> usize {
    sequence.bytes().filter(|b| matches!(b, b'G' | b'C')).count()
}

fn count_at(sequence: &str) -> usize {
    sequence.bytes().filter(|b| matches!(b, b'A' | b'T')).count()
}

/// Percentage of G/C symbols, 0 for an empty sequence
pub fn gc_content(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    100.0 * count_gc(sequence) as f64 / sequence.len() as f64
}

/// GC count minus AT count. Ambiguous symbols count for neither.
pub fn thermodynamic_proxy(sequence: &str) -> f64 {
    count_gc(sequence) as f64 - count_at(sequence) as f64
}

/// Positional weight peaking at 1.0 on the sequence midpoint
pub fn context_weight(locus: usize, sequence_length: usize) -> f64 {
    let center = sequence_length as f64 / 2.0;
    let distance = (locus as f64 - center).abs();
    1.0 / (1.0 + distance / 10.0)
}
