//! Independent outcome scoring methods
//!
//! Each method looks at the text (and optionally at right-outcome records)
//! and either proposes one [`ClassificationCandidate`] or stays silent.

use std::sync::Arc;

use serde_json::json;

use decisio_core::{
    ClassificationCandidate, ClassifierConfig, DecisionOutcome, EvidenceItem, MethodReliability,
    RightOutcomeRecord, ScoringMethodKind,
};

use super::fusion::fuse;
use super::patterns::{Implication, ImpliedPattern, PatternTables, WeightedPattern};
use crate::text::{char_window, prefix_chars};

/// A scoring method: proposes a verdict or returns `None` for no signal
pub trait ScoringMethod: Send + Sync {
    fn kind(&self) -> ScoringMethodKind;

    fn score(
        &self,
        text: &str,
        rights: Option<&[RightOutcomeRecord]>,
    ) -> Option<ClassificationCandidate>;
}

/// The six methods in evaluation order
pub fn standard_methods(
    tables: Arc<PatternTables>,
    config: &ClassifierConfig,
) -> Vec<Box<dyn ScoringMethod>> {
    vec![
        Box::new(PatternScorer::new(tables.clone(), config)),
        Box::new(InferenceScorer::new(tables.clone(), config)),
        Box::new(LegalLanguageScorer::new(tables.clone(), config)),
        Box::new(RightsScorer::new(config)),
        Box::new(ContextScorer::new(tables.clone(), config)),
        Box::new(StructureScorer::new(tables, config)),
    ]
}

// ============================================================================
// Shared scoring
// ============================================================================

/// Summed weight and evidence of one table over a text
#[derive(Debug, Default)]
struct TableScore {
    score: f64,
    evidence: Vec<EvidenceItem>,
}

fn scan(table: &[WeightedPattern], text: &str) -> TableScore {
    let mut result = TableScore::default();
    for pattern in table {
        for mat in pattern.regex.find_iter(text) {
            result.score += pattern.weight;
            result.evidence.push(EvidenceItem::new(pattern.tag, mat.as_str()));
        }
    }
    result
}

/// Direct pattern scoring over a text or excerpt.
///
/// The winning table is the one with the highest summed weight; ties go to
/// partial, then favorable, then unfavorable.
pub(crate) fn score_direct(
    tables: &PatternTables,
    text: &str,
    divisor: f64,
    reliability: MethodReliability,
) -> Option<ClassificationCandidate> {
    let favorable = scan(&tables.favorable, text);
    let unfavorable = scan(&tables.unfavorable, text);
    let partial = scan(&tables.partial, text);

    let max = favorable.score.max(unfavorable.score).max(partial.score);
    if max == 0.0 {
        return None;
    }

    let agreement = scan(&tables.agreement, text).score;
    let with_merit = scan(&tables.extinct_with_merit, text).score;
    let without_merit = scan(&tables.extinct_without_merit, text).score;

    let scores = (favorable.score, unfavorable.score, partial.score);
    let (outcome, evidence) = if partial.score == max {
        (DecisionOutcome::PartiallyFavorable, partial.evidence)
    } else if favorable.score == max {
        (DecisionOutcome::Favorable, favorable.evidence)
    } else {
        (DecisionOutcome::Unfavorable, unfavorable.evidence)
    };

    let confidence = (max / divisor).min(reliability.ceiling);

    Some(
        ClassificationCandidate::new(outcome, confidence, ScoringMethodKind::Pattern.as_str())
            .with_evidence(evidence)
            .with_detail("score_favorable", scores.0)
            .with_detail("score_unfavorable", scores.1)
            .with_detail("score_partial", scores.2)
            .with_detail("score_agreement", agreement)
            .with_detail("score_extinct_with_merit", with_merit)
            .with_detail("score_extinct_without_merit", without_merit),
    )
}

/// Indirect scoring: favorable wins only with a strictly higher sum
fn score_implied(
    table: &[ImpliedPattern],
    text: &str,
    kind: ScoringMethodKind,
    divisor: f64,
    reliability: MethodReliability,
) -> Option<ClassificationCandidate> {
    let mut favorable = 0.0;
    let mut unfavorable = 0.0;
    let mut auxiliary = serde_json::Map::new();
    let mut evidence = Vec::new();

    for entry in table {
        for mat in entry.pattern.regex.find_iter(text) {
            let weight = entry.pattern.weight;
            match entry.implies {
                Implication::Favorable => favorable += weight,
                Implication::Unfavorable => unfavorable += weight,
                Implication::Auxiliary(name) => {
                    let current = auxiliary.get(name).and_then(|v| v.as_f64()).unwrap_or(0.0);
                    auxiliary.insert(name.to_string(), json!(current + weight));
                }
            }
            evidence.push(EvidenceItem::new(entry.pattern.tag, mat.as_str()));
        }
    }

    if favorable == 0.0 && unfavorable == 0.0 {
        return None;
    }

    let (outcome, score) = if favorable > unfavorable {
        (DecisionOutcome::Favorable, favorable)
    } else {
        (DecisionOutcome::Unfavorable, unfavorable)
    };
    let confidence = (score / divisor).min(reliability.ceiling);

    let mut candidate = ClassificationCandidate::new(outcome, confidence, kind.as_str())
        .with_evidence(evidence)
        .with_detail("score_favorable", favorable)
        .with_detail("score_unfavorable", unfavorable);
    if !auxiliary.is_empty() {
        candidate = candidate.with_detail("auxiliary", serde_json::Value::Object(auxiliary));
    }
    Some(candidate)
}

// ============================================================================
// Method 1: direct patterns
// ============================================================================

pub struct PatternScorer {
    tables: Arc<PatternTables>,
    divisor: f64,
    reliability: MethodReliability,
}

impl PatternScorer {
    pub fn new(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            tables,
            divisor: config.score_divisor,
            reliability: config.reliability(ScoringMethodKind::Pattern),
        }
    }
}

impl ScoringMethod for PatternScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::Pattern
    }

    fn score(&self, text: &str, _rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        score_direct(&self.tables, text, self.divisor, self.reliability)
    }
}

// ============================================================================
// Methods 2 and 3: indirect tables
// ============================================================================

pub struct InferenceScorer {
    tables: Arc<PatternTables>,
    divisor: f64,
    reliability: MethodReliability,
}

impl InferenceScorer {
    pub fn new(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            tables,
            divisor: config.score_divisor,
            reliability: config.reliability(ScoringMethodKind::Inference),
        }
    }
}

impl ScoringMethod for InferenceScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::Inference
    }

    fn score(&self, text: &str, _rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        score_implied(&self.tables.inference, text, self.kind(), self.divisor, self.reliability)
    }
}

pub struct LegalLanguageScorer {
    tables: Arc<PatternTables>,
    divisor: f64,
    reliability: MethodReliability,
}

impl LegalLanguageScorer {
    pub fn new(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            tables,
            divisor: config.score_divisor,
            reliability: config.reliability(ScoringMethodKind::LegalLanguage),
        }
    }
}

impl ScoringMethod for LegalLanguageScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::LegalLanguage
    }

    fn score(&self, text: &str, _rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        score_implied(&self.tables.legal_language, text, self.kind(), self.divisor, self.reliability)
    }
}

// ============================================================================
// Method 4: right outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RightVote {
    Granted,
    Denied,
    Partial,
    Agreement,
    ExtinctWithMerit,
    ExtinctWithoutMerit,
}

impl RightVote {
    fn parse(outcome: &str) -> Option<Self> {
        let vote = match outcome.trim().to_lowercase().as_str() {
            "granted" | "concedido" | "deferido" => Self::Granted,
            "denied" | "negado" | "indeferido" => Self::Denied,
            "partially_granted" | "parcialmente" => Self::Partial,
            "agreement" | "acordo" => Self::Agreement,
            "extinctive_with_merit" | "extinto_com_merito" => Self::ExtinctWithMerit,
            "extinctive_without_merit" | "extinto_sem_merito" => Self::ExtinctWithoutMerit,
            _ => return None,
        };
        Some(vote)
    }
}

pub struct RightsScorer {
    reliability: MethodReliability,
}

impl RightsScorer {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            reliability: config.reliability(ScoringMethodKind::Rights),
        }
    }
}

impl ScoringMethod for RightsScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::Rights
    }

    fn score(&self, _text: &str, rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        let rights = rights?;

        let mut votes = Vec::new();
        let mut evidence = Vec::new();
        for record in rights {
            let Some(raw) = record.decision_outcome.as_deref() else {
                continue;
            };
            if let Some(vote) = RightVote::parse(raw) {
                votes.push(vote);
                evidence.push(EvidenceItem::new(
                    self.kind().as_str(),
                    format!("{}: {}", record.display_name(), raw.to_lowercase()),
                ));
            }
        }

        if votes.is_empty() {
            return None;
        }

        let count = |wanted: RightVote| votes.iter().filter(|v| **v == wanted).count();
        let granted = count(RightVote::Granted);
        let denied = count(RightVote::Denied);
        let partial = count(RightVote::Partial);
        let total = votes.len();

        let (outcome, confidence) = if partial > 0 || (granted > 0 && denied > 0) {
            (DecisionOutcome::PartiallyFavorable, 0.8)
        } else if granted > denied {
            (DecisionOutcome::Favorable, granted as f64 / total as f64)
        } else if denied > granted {
            (DecisionOutcome::Unfavorable, denied as f64 / total as f64)
        } else {
            (DecisionOutcome::PartiallyFavorable, 0.5)
        };

        Some(
            ClassificationCandidate::new(outcome, confidence.min(self.reliability.ceiling), self.kind().as_str())
                .with_evidence(evidence)
                .with_detail("total_rights", total)
                .with_detail("granted_count", granted)
                .with_detail("denied_count", denied)
                .with_detail("partial_count", partial)
                .with_detail("agreement_count", count(RightVote::Agreement))
                .with_detail("extinct_with_merit_count", count(RightVote::ExtinctWithMerit))
                .with_detail("extinct_without_merit_count", count(RightVote::ExtinctWithoutMerit)),
        )
    }
}

// ============================================================================
// Method 5: dispositive excerpts
// ============================================================================

pub struct ContextScorer {
    tables: Arc<PatternTables>,
    config: ClassifierConfig,
}

impl ContextScorer {
    pub fn new(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            tables,
            config: config.clone(),
        }
    }
}

impl ScoringMethod for ContextScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::Context
    }

    fn score(&self, text: &str, _rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        let pattern_reliability = self.config.reliability(ScoringMethodKind::Pattern);
        let mut excerpts = 0;
        let mut usable = Vec::new();

        for marker in &self.tables.dispositive_markers {
            for mat in marker.regex.find_iter(text) {
                excerpts += 1;
                let excerpt = char_window(
                    text,
                    mat.start(),
                    mat.end(),
                    self.config.context_window_before,
                    self.config.context_window_after,
                );
                if let Some(candidate) =
                    score_direct(&self.tables, excerpt, self.config.score_divisor, pattern_reliability)
                {
                    if candidate.confidence > self.config.context_min_confidence {
                        usable.push(candidate);
                    }
                }
            }
        }

        if usable.is_empty() {
            return None;
        }

        let used = usable.len();
        let fused = fuse(usable, &self.config);
        let ceiling = self.config.reliability(self.kind()).ceiling;

        let mut candidate = fused.into_candidate(self.kind().as_str());
        candidate.confidence = candidate.confidence.min(ceiling);
        candidate.details.remove("contributing_methods");
        Some(
            candidate
                .with_detail("excerpts_found", excerpts)
                .with_detail("excerpts_used", used),
        )
    }
}

// ============================================================================
// Method 6: document structure
// ============================================================================

pub struct StructureScorer {
    tables: Arc<PatternTables>,
    divisor: f64,
    min_confidence: f64,
    reliability: MethodReliability,
    pattern_reliability: MethodReliability,
}

impl StructureScorer {
    pub fn new(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            tables,
            divisor: config.score_divisor,
            min_confidence: config.structure_min_confidence,
            reliability: config.reliability(ScoringMethodKind::Structure),
            pattern_reliability: config.reliability(ScoringMethodKind::Pattern),
        }
    }
}

impl ScoringMethod for StructureScorer {
    fn kind(&self) -> ScoringMethodKind {
        ScoringMethodKind::Structure
    }

    fn score(&self, text: &str, _rights: Option<&[RightOutcomeRecord]>) -> Option<ClassificationCandidate> {
        let mut best: Option<ClassificationCandidate> = None;
        let mut evidence = Vec::new();

        for regex in &self.tables.structure {
            for mat in regex.find_iter(text) {
                let span = mat.as_str();
                let Some(hit) = score_direct(&self.tables, span, self.divisor, self.pattern_reliability) else {
                    continue;
                };
                if hit.confidence <= self.min_confidence {
                    continue;
                }

                evidence.push(EvidenceItem::new(self.kind().as_str(), prefix_chars(span, 100)));
                let better = best
                    .as_ref()
                    .map(|current| hit.confidence > current.confidence)
                    .unwrap_or(true);
                if better {
                    best = Some(hit);
                }
            }
        }

        let mut best = best?;
        let hits = evidence.len();
        best.method = self.kind().as_str().to_string();
        best.evidence = evidence;
        best.confidence = best.confidence.min(self.reliability.ceiling);
        Some(best.with_detail("structure_hits", hits))
    }
}
