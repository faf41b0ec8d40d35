//! Weighted fusion of scoring-method candidates

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use decisio_core::{ClassificationCandidate, ClassifierConfig, DecisionOutcome, FusedClassification};

/// Method name of a verdict fused from several candidates
pub const COMBINED_METHOD: &str = "combined";

/// Fuse candidates into one verdict.
///
/// A lone candidate is returned as is. Otherwise each candidate adds
/// `confidence * weight(method)` to the bucket of its outcome and the
/// heaviest bucket wins, ties going to favorable, then unfavorable, then
/// partially favorable. The fused confidence is the winning sum capped at 1.
pub fn fuse(candidates: Vec<ClassificationCandidate>, config: &ClassifierConfig) -> FusedClassification {
    match candidates.len() {
        0 => return FusedClassification::default(),
        1 => {
            if let Some(single) = candidates.into_iter().next() {
                return FusedClassification {
                    principal_outcome: single.principal_outcome,
                    confidence: single.confidence,
                    evidence: single.evidence,
                    contributing_methods: vec![single.method.clone()],
                    method: single.method,
                    details: single.details,
                };
            }
            return FusedClassification::default();
        }
        _ => {}
    }

    let mut buckets = [0.0_f64; 3];
    let mut contributing = Vec::with_capacity(candidates.len());
    let mut evidence = Vec::new();
    let mut per_method = Map::new();

    for candidate in candidates {
        let weight = config.weight_for(&candidate.method);
        if let Some(slot) = DecisionOutcome::DECISIVE
            .iter()
            .position(|outcome| *outcome == candidate.principal_outcome)
        {
            buckets[slot] += candidate.confidence * weight;
        }

        let key = unique_key(&per_method, &candidate.method);
        per_method.insert(key, json!(candidate.details));
        contributing.push(candidate.method);
        evidence.extend(candidate.evidence);
    }

    let mut winner = 0;
    for slot in 1..buckets.len() {
        if buckets[slot] > buckets[winner] {
            winner = slot;
        }
    }

    let scores: Map<String, Value> = DecisionOutcome::DECISIVE
        .iter()
        .zip(buckets.iter())
        .map(|(outcome, score)| (outcome.as_str().to_string(), json!(score)))
        .collect();

    let mut details = BTreeMap::new();
    details.insert("scores".to_string(), Value::Object(scores));
    details.insert("methods".to_string(), Value::Object(per_method));

    if buckets[winner] <= 0.0 {
        let mut fused = FusedClassification::undetermined(COMBINED_METHOD, "no weighted evidence");
        fused.contributing_methods = contributing;
        fused.details = details;
        return fused;
    }

    tracing::debug!(
        outcome = %DecisionOutcome::DECISIVE[winner],
        score = buckets[winner],
        methods = contributing.len(),
        "candidates fused"
    );

    FusedClassification {
        principal_outcome: DecisionOutcome::DECISIVE[winner],
        confidence: buckets[winner].min(1.0),
        evidence,
        method: COMBINED_METHOD.to_string(),
        contributing_methods: contributing,
        details,
    }
}

fn unique_key(map: &Map<String, Value>, method: &str) -> String {
    if !map.contains_key(method) {
        return method.to_string();
    }
    let mut n = 2;
    loop {
        let key = format!("{method}#{n}");
        if !map.contains_key(&key) {
            return key;
        }
        n += 1;
    }
}
