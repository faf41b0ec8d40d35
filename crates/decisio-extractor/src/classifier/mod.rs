//! Outcome classification
//!
//! Six independent scoring methods each look at a ruling and may propose a
//! verdict. [`OutcomeClassifier`] runs them in a fixed order and fuses the
//! proposals with per-method reliability weights.

pub mod fusion;
pub mod methods;
pub mod patterns;

use std::sync::Arc;

use decisio_core::{ClassifierConfig, FusedClassification, RightOutcomeRecord};

pub use fusion::{fuse, COMBINED_METHOD};
pub use methods::{
    standard_methods, ContextScorer, InferenceScorer, LegalLanguageScorer, PatternScorer,
    RightsScorer, ScoringMethod, StructureScorer,
};
pub use patterns::PatternTables;

/// Method name reported for texts too short to classify
pub const INSUFFICIENT_TEXT: &str = "insufficient_text";

/// Classifies the overall outcome of a ruling
pub struct OutcomeClassifier {
    config: ClassifierConfig,
    methods: Vec<Box<dyn ScoringMethod>>,
}

impl OutcomeClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self::with_tables(Arc::new(PatternTables::standard()), config)
    }

    /// Share already compiled tables between classifiers
    pub fn with_tables(tables: Arc<PatternTables>, config: &ClassifierConfig) -> Self {
        Self {
            config: config.clone(),
            methods: standard_methods(tables, config),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a ruling, optionally using right outcomes found earlier.
    ///
    /// Never fails: texts shorter than the configured minimum and texts with
    /// no signal yield an undetermined verdict with confidence 0.
    pub fn analyze(&self, text: &str, rights: Option<&[RightOutcomeRecord]>) -> FusedClassification {
        if text.trim().chars().count() < self.config.min_text_length {
            tracing::debug!(chars = text.trim().chars().count(), "text too short to classify");
            return FusedClassification::undetermined(INSUFFICIENT_TEXT, "insufficient text");
        }

        let candidates: Vec<_> = self
            .methods
            .iter()
            .filter_map(|method| {
                let candidate = method.score(text, rights);
                if let Some(c) = &candidate {
                    tracing::trace!(
                        method = method.kind().as_str(),
                        outcome = %c.principal_outcome,
                        confidence = c.confidence,
                        "method proposed an outcome"
                    );
                }
                candidate
            })
            .collect();

        let fused = fuse(candidates, &self.config);
        tracing::debug!(
            outcome = %fused.principal_outcome,
            confidence = fused.confidence,
            methods = ?fused.contributing_methods,
            "outcome classified"
        );
        fused
    }

    /// Classify with right outcomes given as a JSON array.
    ///
    /// Malformed JSON is logged and treated as absent.
    pub fn analyze_json(&self, text: &str, rights_json: Option<&str>) -> FusedClassification {
        let records = rights_json.and_then(parse_rights_payload);
        self.analyze(text, records.as_deref())
    }
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Parse a JSON array of right-outcome records, skipping items that are not
/// objects. Returns `None` for malformed JSON or a non-array payload.
pub fn parse_rights_payload(payload: &str) -> Option<Vec<RightOutcomeRecord>> {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed rights payload");
            return None;
        }
    };

    let serde_json::Value::Array(items) = value else {
        tracing::warn!("rights payload is not an array");
        return None;
    };

    Some(items.iter().filter_map(record_from_value).collect())
}

/// Field-by-field read of one record; a mistyped field is dropped on its own
/// without discarding the outcome vote.
fn record_from_value(item: &serde_json::Value) -> Option<RightOutcomeRecord> {
    let object = item.as_object()?;
    let text = |key: &str| object.get(key).and_then(serde_json::Value::as_str).map(str::to_string);

    Some(RightOutcomeRecord {
        right_type: text("type").unwrap_or_default(),
        description: text("description"),
        decision_outcome: text("decision_outcome"),
        confidence: object.get("confidence").and_then(serde_json::Value::as_f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use decisio_core::DecisionOutcome;

    fn classifier() -> OutcomeClassifier {
        OutcomeClassifier::default()
    }

    #[test]
    fn test_favorable_ruling() {
        let text = "Julgo procedente o pedido de horas extras. Condeno a ré ao pagamento de R$ 5.000,00.";
        let result = classifier().analyze(text, None);

        assert_eq!(result.principal_outcome, DecisionOutcome::Favorable);
        assert_eq!(result.confidence, 1.0);
        assert!(result
            .evidence
            .iter()
            .any(|e| e.method_tag == "julgamento_procedente_direto"));
        assert!(result.contributing_methods.contains(&"pattern".to_string()));
    }

    #[test]
    fn test_unfavorable_ruling() {
        let result = classifier().analyze("Julgo improcedente o pedido por falta de provas.", None);
        assert_eq!(result.principal_outcome, DecisionOutcome::Unfavorable);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_partially_favorable_ruling() {
        let text = "Julgo parcialmente procedente o pedido, deferindo apenas as horas extras.";
        let result = classifier().analyze(text, None);
        assert_eq!(result.principal_outcome, DecisionOutcome::PartiallyFavorable);
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_empty_and_short_text() {
        for text in ["", "   ", "defiro"] {
            let result = classifier().analyze(text, None);
            assert_eq!(result.principal_outcome, DecisionOutcome::Undetermined);
            assert_eq!(result.confidence, 0.0);
            assert_eq!(result.method, INSUFFICIENT_TEXT);
            assert_eq!(result.evidence[0].matched_text, "insufficient text");
        }
    }

    #[test]
    fn test_text_without_signal() {
        let result = classifier().analyze("O documento descreve o histórico funcional do autor.", None);
        assert_eq!(result.principal_outcome, DecisionOutcome::Undetermined);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.evidence[0].matched_text, "no patterns matched");
    }

    #[test]
    fn test_rights_only_signal() {
        let rights = vec![
            RightOutcomeRecord::new("overtime", "granted"),
            RightOutcomeRecord::new("vacation_pay", "denied"),
        ];
        let result = classifier().analyze("Texto sem termos conclusivos.", Some(&rights));

        assert_eq!(result.principal_outcome, DecisionOutcome::PartiallyFavorable);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.method, "rights");
        assert_eq!(result.evidence[0].matched_text, "overtime: granted");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let text = "Ante o exposto, julgo parcialmente procedente o pedido. \
                    Condeno a ré ao pagamento de horas extras. Indefiro o dano moral.";
        let classifier = classifier();
        let first = classifier.analyze(text, None);
        for _ in 0..3 {
            assert_eq!(classifier.analyze(text, None), first);
        }
    }

    #[test]
    fn test_analyze_json_payloads() {
        let classifier = classifier();
        let text = "Texto sem termos conclusivos.";

        let result = classifier.analyze_json(
            text,
            Some(r#"[{"type": "overtime", "decision_outcome": "deferido"}, 42, "x"]"#),
        );
        assert_eq!(result.principal_outcome, DecisionOutcome::Favorable);
        assert_eq!(result.confidence, 1.0);

        let malformed = classifier.analyze_json(text, Some("[{not json"));
        assert_eq!(malformed, classifier.analyze(text, None));
        assert_eq!(malformed.principal_outcome, DecisionOutcome::Undetermined);
    }

    #[test]
    fn test_parse_rights_payload() {
        assert!(parse_rights_payload("{oops").is_none());
        assert!(parse_rights_payload(r#"{"type": "overtime"}"#).is_none());

        let records = parse_rights_payload(
            r#"[{"type": "fgts", "decision_outcome": "granted", "confidence": 0.7}, null, {}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].right_type, "fgts");
        assert_eq!(records[0].confidence, Some(0.7));
        assert!(records[1].decision_outcome.is_none());
    }

    #[test]
    fn test_mistyped_fields_keep_the_outcome_vote() {
        let records = parse_rights_payload(
            r#"[{"type": null, "decision_outcome": "deferido", "confidence": "alta"},
                {"type": 7, "decision_outcome": 1}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].right_type, "");
        assert_eq!(records[0].decision_outcome.as_deref(), Some("deferido"));
        assert_eq!(records[0].confidence, None);
        assert!(records[1].decision_outcome.is_none());

        let result = classifier().analyze_json(
            "Texto sem termos conclusivos.",
            Some(r#"[{"type": "fgts", "decision_outcome": "granted", "confidence": "alta"}]"#),
        );
        assert_eq!(result.principal_outcome, DecisionOutcome::Favorable);
        assert_eq!(result.method, "rights");
    }
}
