use super::pareto::{self, OptimizationDirection};
use crate::types::Guide;

/// On-target is maximized, off-target penalty minimized
const GUIDE_DIRECTIONS: [OptimizationDirection; 2] = [
    OptimizationDirection::Maximize,
    OptimizationDirection::Minimize,
];

fn objectives(guide: &Guide) -> Vec<f64> {
    vec![guide.on_target_score, guide.off_target_penalty]
}

/// True if `a` is at least as good as `b` on both objectives and strictly better on one
pub fn dominates(a: &Guide, b: &Guide) -> bool {
    pareto::dominates(&objectives(a), &objectives(b), &GUIDE_DIRECTIONS)
}

/// Pareto-aware reordering of the bandit's selection
#[derive(Debug, Clone, Copy, Default)]
pub struct DiversityReranker;

impl DiversityReranker {
    pub fn new() -> Self {
        Self
    }

    /// Non-dominated guides in the order they entered the front
    pub fn pareto_front(&self, guides: &[Guide]) -> Vec<Guide> {
        front_indices(guides)
            .into_iter()
            .map(|i| guides[i].clone())
            .collect()
    }

    /// Reduce `guides` to `top_k`.
    ///
    /// A front of at least `top_k` guides is truncated in insertion order
    /// (not by composite score). A smaller front is topped up with the
    /// remaining guides by descending composite score.
    pub fn rerank(&self, guides: Vec<Guide>, top_k: usize) -> Vec<Guide> {
        if guides.len() <= top_k {
            return guides;
        }

        let front = front_indices(&guides);
        let mut slots: Vec<Option<Guide>> = guides.into_iter().map(Some).collect();

        if front.len() >= top_k {
            return front
                .into_iter()
                .take(top_k)
                .filter_map(|i| slots[i].take())
                .collect();
        }

        let mut result: Vec<Guide> = front.iter().filter_map(|&i| slots[i].take()).collect();

        // Stable sort: equal scores keep input order
        let mut remaining: Vec<Guide> = slots.into_iter().flatten().collect();
        remaining.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

        let fill = top_k - result.len();
        result.extend(remaining.into_iter().take(fill));

        log::debug!(
            "Reranked to {} guides ({} from the Pareto front)",
            result.len(),
            front.len()
        );
        result
    }
}

fn front_indices(guides: &[Guide]) -> Vec<usize> {
    let points: Vec<Vec<f64>> = guides.iter().map(objectives).collect();
    pareto::pareto_front(&points, &GUIDE_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(name: &str, on: f64, off: f64, composite: f64) -> Guide {
        Guide {
            locus: 0,
            guide_sequence: String::new(),
            pam_sequence: "AGG".to_string(),
            pam_start: 0,
            guide_start: 0,
            gc_content: 0.0,
            thermodynamic_proxy: 0.0,
            context_weight: 0.0,
            guide_length: 0,
            pam_gc: 0.0,
            on_target_score: on,
            off_target_penalty: off,
            composite_score: composite,
            candidate_id: name.to_string(),
        }
    }

    fn ids(guides: &[Guide]) -> Vec<&str> {
        guides.iter().map(|g| g.candidate_id.as_str()).collect()
    }

    #[test]
    fn test_dominance_irreflexive_and_asymmetric() {
        let a = guide("A", 0.9, 0.1, 0.0);
        let b = guide("B", 0.7, 0.2, 0.0);
        assert!(!dominates(&a, &a));
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn test_chain_front_then_composite_fill() {
        // Composites under the default weights (0.5, 0.3, 0.2) with coverage 1
        let guides = vec![
            guide("A", 0.9, 0.1, 0.62),
            guide("B", 0.7, 0.2, 0.49),
            guide("C", 0.5, 0.5, 0.30),
        ];
        let reranker = DiversityReranker::new();
        assert_eq!(ids(&reranker.pareto_front(&guides)), vec!["A"]);
        assert_eq!(ids(&reranker.rerank(guides, 2)), vec!["A", "B"]);
    }

    #[test]
    fn test_front_truncated_in_insertion_order() {
        // B and A trade off, C is dominated by B
        let guides = vec![
            guide("A", 0.9, 0.3, 0.1),
            guide("B", 0.7, 0.2, 0.9),
            guide("C", 0.5, 0.5, 0.8),
        ];
        let reranked = DiversityReranker::new().rerank(guides, 2);
        assert_eq!(ids(&reranked), vec!["A", "B"]);
    }

    #[test]
    fn test_front_truncation_ignores_composite() {
        let guides = vec![
            guide("A", 0.9, 0.5, 0.1),
            guide("B", 0.8, 0.4, 0.5),
            guide("C", 0.7, 0.3, 0.9),
        ];
        let reranked = DiversityReranker::new().rerank(guides, 2);
        assert_eq!(ids(&reranked), vec!["A", "B"]);
    }

    #[test]
    fn test_small_front_filled_by_composite() {
        let guides = vec![
            guide("A", 0.9, 0.1, 0.5),
            guide("B", 0.7, 0.2, 0.2),
            guide("C", 0.5, 0.5, 0.9),
            guide("D", 0.6, 0.3, 0.4),
        ];
        let reranked = DiversityReranker::new().rerank(guides, 3);
        assert_eq!(ids(&reranked), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_short_input_returned_unchanged() {
        let guides = vec![guide("B", 0.1, 0.9, 0.0), guide("A", 0.9, 0.1, 1.0)];
        let reranked = DiversityReranker::new().rerank(guides.clone(), 2);
        assert_eq!(reranked, guides);
    }
}
