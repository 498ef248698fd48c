/// Pareto dominance and front extraction over objective vectors

/// Defines whether an objective should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationDirection {
    Maximize,
    Minimize,
}

/// Check if objective vector A dominates B.
/// A dominates B if A is no worse than B in all objectives and strictly better in at least one.
pub fn dominates(
    a_objectives: &[f64],
    b_objectives: &[f64],
    directions: &[OptimizationDirection],
) -> bool {
    if a_objectives.len() != b_objectives.len() || a_objectives.len() != directions.len() {
        return false;
    }

    let mut at_least_one_better = false;

    for ((&a_val, &b_val), direction) in a_objectives.iter().zip(b_objectives).zip(directions) {
        let (a_better, a_no_worse) = match direction {
            OptimizationDirection::Maximize => (a_val > b_val, a_val >= b_val),
            OptimizationDirection::Minimize => (a_val < b_val, a_val <= b_val),
        };

        // Also false for NaN, which is never comparable
        if !a_no_worse {
            return false;
        }

        if a_better {
            at_least_one_better = true;
        }
    }

    at_least_one_better
}

/// Indices of the non-dominated members of `objectives`, in the order they entered the front.
///
/// Members are inserted one by one: a newcomer evicts every front member it
/// dominates and joins unless a remaining member dominates it.
pub fn pareto_front(objectives: &[Vec<f64>], directions: &[OptimizationDirection]) -> Vec<usize> {
    let mut front: Vec<usize> = Vec::new();

    for (i, candidate) in objectives.iter().enumerate() {
        front.retain(|&member| !dominates(candidate, &objectives[member], directions));

        let dominated = front
            .iter()
            .any(|&member| dominates(&objectives[member], candidate, directions));
        if !dominated {
            front.push(i);
        }
    }

    front
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_maximize() {
        let directions = vec![OptimizationDirection::Maximize, OptimizationDirection::Maximize];

        // A is better in both objectives
        assert!(dominates(&[10.0, 20.0], &[5.0, 10.0], &directions));

        // A is better in one, equal in other
        assert!(dominates(&[10.0, 20.0], &[10.0, 10.0], &directions));

        // A is better in one, worse in other - no dominance
        assert!(!dominates(&[10.0, 5.0], &[5.0, 10.0], &directions));

        // Equal in both - no dominance
        assert!(!dominates(&[10.0, 20.0], &[10.0, 20.0], &directions));
    }

    #[test]
    fn test_dominance_mixed() {
        let directions = vec![OptimizationDirection::Maximize, OptimizationDirection::Minimize];

        // A has higher first objective (good) and lower second objective (good)
        assert!(dominates(&[10.0, 5.0], &[5.0, 10.0], &directions));

        // A has higher first (good) but higher second (bad) - no dominance
        assert!(!dominates(&[10.0, 15.0], &[5.0, 10.0], &directions));
    }

    #[test]
    fn test_dominance_mismatched_lengths() {
        let directions = vec![OptimizationDirection::Maximize];
        assert!(!dominates(&[1.0, 2.0], &[0.0], &directions));
    }

    #[test]
    fn test_front_eviction_keeps_insertion_order() {
        let directions = vec![OptimizationDirection::Maximize, OptimizationDirection::Maximize];
        let objectives = vec![
            vec![1.0, 1.0], // evicted by 2
            vec![5.0, 1.0],
            vec![2.0, 4.0],
            vec![1.0, 5.0],
            vec![0.5, 0.5], // dominated on arrival
        ];
        assert_eq!(pareto_front(&objectives, &directions), vec![1, 2, 3]);
    }

    #[test]
    fn test_front_keeps_exact_duplicates() {
        let directions = vec![OptimizationDirection::Maximize, OptimizationDirection::Minimize];
        let objectives = vec![vec![0.5, 0.1], vec![0.5, 0.1]];
        assert_eq!(pareto_front(&objectives, &directions), vec![0, 1]);
    }
}
