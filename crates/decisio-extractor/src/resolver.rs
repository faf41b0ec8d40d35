//! Entity overlap resolution
//!
//! Candidates from the recognizer and the pattern library frequently cover
//! the same characters. The resolver reduces them to a set in which no two
//! spans overlap.

use std::cmp::Ordering;

use decisio_core::{Entity, ResolutionStrategy};

/// Resolves overlapping candidate entities with a configured strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityResolver {
    strategy: ResolutionStrategy,
}

impl EntityResolver {
    pub fn new(strategy: ResolutionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    /// Return a non-overlapping subset ordered by `(start, end)`
    pub fn resolve(&self, candidates: Vec<Entity>) -> Vec<Entity> {
        let input = candidates.len();
        let resolved = match self.strategy {
            ResolutionStrategy::Greedy => resolve_greedy(candidates),
            ResolutionStrategy::MaxWeight => resolve_max_weight(candidates),
        };
        tracing::debug!(
            strategy = ?self.strategy,
            input,
            kept = resolved.len(),
            "entities resolved"
        );
        resolved
    }
}

/// Position order with a deterministic tie-break: start, end, higher
/// confidence first, then label.
fn position_order(a: &Entity, b: &Entity) -> Ordering {
    a.start
        .cmp(&b.start)
        .then(a.end.cmp(&b.end))
        .then(b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.label.cmp(&b.label))
}

/// Interval sweep keeping the more confident entity of each overlapping pair.
///
/// Accepted spans are pairwise disjoint and start no later than the current
/// candidate, so a candidate overlaps at most one of them: the one that
/// still covers its start. Equal confidence keeps the entity accepted first.
pub fn resolve_greedy(mut candidates: Vec<Entity>) -> Vec<Entity> {
    candidates.sort_by(position_order);

    let mut accepted: Vec<Entity> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match accepted.iter().position(|kept| kept.overlaps(&candidate)) {
            Some(index) => {
                if candidate.confidence > accepted[index].confidence {
                    accepted[index] = candidate;
                }
            }
            None => accepted.push(candidate),
        }
    }

    accepted.sort_by(position_order);
    accepted
}

/// Weighted interval scheduling: the non-overlapping subset with the
/// largest total confidence.
pub fn resolve_max_weight(mut candidates: Vec<Entity>) -> Vec<Entity> {
    if candidates.is_empty() {
        return candidates;
    }

    candidates.sort_by(|a, b| {
        a.end
            .cmp(&b.end)
            .then(a.start.cmp(&b.start))
            .then(b.confidence.total_cmp(&a.confidence))
            .then_with(|| a.label.cmp(&b.label))
    });

    let n = candidates.len();
    // previous[i]: how many spans end at or before span i starts
    let previous: Vec<usize> = candidates
        .iter()
        .map(|entity| candidates.partition_point(|other| other.end <= entity.start))
        .collect();

    // best[i]: optimal total over the first i spans
    let mut best = vec![0.0_f64; n + 1];
    for i in 0..n {
        let take = candidates[i].confidence + best[previous[i]];
        best[i + 1] = if take > best[i] { take } else { best[i] };
    }

    let mut chosen = Vec::new();
    let mut i = n;
    while i > 0 {
        let take = candidates[i - 1].confidence + best[previous[i - 1]];
        if take > best[i - 1] {
            chosen.push(i - 1);
            i = previous[i - 1];
        } else {
            i -= 1;
        }
    }

    let mut slots: Vec<Option<Entity>> = candidates.into_iter().map(Some).collect();
    let mut resolved: Vec<Entity> = chosen
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();
    resolved.sort_by(position_order);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use decisio_core::RawCandidateEntity;
    use proptest::prelude::*;

    fn entity(label: &str, start: usize, end: usize, confidence: f64) -> Entity {
        RawCandidateEntity::new(label.to_lowercase(), label, start, end, confidence)
            .into_entity(label)
    }

    fn spans(entities: &[Entity]) -> Vec<(&str, usize, usize)> {
        entities
            .iter()
            .map(|e| (e.label.as_str(), e.start, e.end))
            .collect()
    }

    #[test]
    fn test_higher_confidence_wins_overlap() {
        let resolved = resolve_greedy(vec![
            entity("MONEY", 0, 10, 0.9),
            entity("LAW", 5, 15, 0.95),
        ]);
        assert_eq!(spans(&resolved), vec![("LAW", 5, 15)]);
    }

    #[test]
    fn test_disjoint_entities_survive() {
        let resolved = resolve_greedy(vec![
            entity("LAW", 20, 30, 0.9),
            entity("MONEY", 0, 10, 0.9),
            entity("DATE", 10, 20, 0.5),
        ]);
        assert_eq!(
            spans(&resolved),
            vec![("MONEY", 0, 10), ("DATE", 10, 20), ("LAW", 20, 30)]
        );
    }

    #[test]
    fn test_equal_confidence_keeps_first_in_position_order() {
        let resolved = resolve_greedy(vec![
            entity("WORKER_RIGHT", 3, 12, 0.9),
            entity("MONEY", 0, 8, 0.9),
        ]);
        assert_eq!(spans(&resolved), vec![("MONEY", 0, 8)]);
    }

    #[test]
    fn test_chain_overlap_greedy_vs_max_weight() {
        let chain = vec![
            entity("A", 0, 10, 0.6),
            entity("B", 5, 15, 0.7),
            entity("C", 12, 20, 0.6),
        ];

        let greedy = resolve_greedy(chain.clone());
        assert_eq!(spans(&greedy), vec![("B", 5, 15)]);

        let optimal = resolve_max_weight(chain);
        assert_eq!(spans(&optimal), vec![("A", 0, 10), ("C", 12, 20)]);
    }

    #[test]
    fn test_resolver_dispatches_on_strategy() {
        let candidates = vec![entity("A", 0, 4, 0.5), entity("B", 2, 6, 0.6)];
        let resolver = EntityResolver::new(ResolutionStrategy::MaxWeight);
        assert_eq!(resolver.strategy(), ResolutionStrategy::MaxWeight);
        assert_eq!(spans(&resolver.resolve(candidates)), vec![("B", 2, 6)]);
        assert!(EntityResolver::default().resolve(Vec::new()).is_empty());
    }

    fn arb_entities() -> impl Strategy<Value = Vec<Entity>> {
        prop::collection::vec((0usize..60, 1usize..12, 0.0f64..=1.0), 0..25).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (start, len, confidence))| {
                    entity(&format!("L{i}"), start, start + len, confidence)
                })
                .collect()
        })
    }

    fn assert_disjoint(entities: &[Entity]) {
        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    fn total(entities: &[Entity]) -> f64 {
        entities.iter().map(|e| e.confidence).sum()
    }

    proptest! {
        #[test]
        fn prop_greedy_output_is_disjoint_subset(candidates in arb_entities()) {
            let resolved = resolve_greedy(candidates.clone());
            assert_disjoint(&resolved);
            for kept in &resolved {
                prop_assert!(candidates.contains(kept));
            }
        }

        #[test]
        fn prop_max_weight_is_disjoint_and_at_least_greedy(candidates in arb_entities()) {
            let optimal = resolve_max_weight(candidates.clone());
            let greedy = resolve_greedy(candidates.clone());
            assert_disjoint(&optimal);
            for kept in &optimal {
                prop_assert!(candidates.contains(kept));
            }
            prop_assert!(total(&optimal) + 1e-9 >= total(&greedy));
        }

        #[test]
        fn prop_disjoint_input_is_preserved(lengths in prop::collection::vec(1usize..8, 0..15)) {
            let mut start = 0;
            let candidates: Vec<Entity> = lengths
                .iter()
                .enumerate()
                .map(|(i, len)| {
                    let e = entity(&format!("L{i}"), start, start + len, 0.5);
                    start += len;
                    e
                })
                .collect();

            prop_assert_eq!(resolve_greedy(candidates.clone()).len(), candidates.len());
            prop_assert_eq!(resolve_max_weight(candidates.clone()).len(), candidates.len());
        }
    }
}
