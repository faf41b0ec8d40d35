//! Global confidence of a document analysis
//!
//! Each component is either present with a score in [0, 1], contributing
//! `score * weight`, or absent, contributing a flat penalty term.

use serde::{Deserialize, Serialize};

use decisio_core::{average, ConfidenceContribution, Entity, PipelineConfig, SummaryResult, TextQuality, WorkerRight};

/// Components of the global confidence, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    TextQuality,
    Entities,
    Rights,
    Summary,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextQuality => "text_quality",
            Self::Entities => "entities",
            Self::Rights => "rights",
            Self::Summary => "summary",
        }
    }
}

/// State of one component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentSignal {
    Present(f64),
    Absent,
}

impl ComponentSignal {
    fn from_score(score: Option<f64>) -> Self {
        score.map(Self::Present).unwrap_or(Self::Absent)
    }
}

/// Observed state of every component of one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceSignals {
    pub quality: f64,
    pub entities: ComponentSignal,
    pub rights: ComponentSignal,
    pub summary: ComponentSignal,
}

/// Weighted global confidence with its per-component breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalConfidence {
    pub value: f64,
    pub breakdown: Vec<ConfidenceContribution>,
}

/// Weights and penalty applied to the component signals
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceModel {
    quality_weight: f64,
    entity_weight: f64,
    rights_weight: f64,
    summary_weight: f64,
    absent_penalty: f64,
    target_words: usize,
    clamp: bool,
}

impl ConfidenceModel {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            quality_weight: config.quality_weight,
            entity_weight: config.entity_weight,
            rights_weight: config.rights_weight,
            summary_weight: config.summary_weight,
            absent_penalty: config.absent_component_penalty,
            target_words: config.summary_target_words,
            clamp: config.clamp_global_confidence,
        }
    }

    /// Summary adequacy: word count relative to the target, capped at 1.
    /// An empty or failed summary counts as absent.
    pub fn summary_signal(&self, summary: Option<&SummaryResult>) -> ComponentSignal {
        match summary {
            Some(s) if !s.is_empty() => {
                let target = self.target_words.max(1) as f64;
                ComponentSignal::Present((s.word_count() as f64 / target).min(1.0))
            }
            _ => ComponentSignal::Absent,
        }
    }

    pub fn observe(
        &self,
        quality: &TextQuality,
        entities: &[Entity],
        rights: &[WorkerRight],
        summary: Option<&SummaryResult>,
    ) -> ConfidenceSignals {
        ConfidenceSignals {
            quality: quality.quality_score,
            entities: ComponentSignal::from_score(average(entities.iter().map(|e| e.confidence))),
            rights: ComponentSignal::from_score(average(rights.iter().map(|r| r.confidence))),
            summary: self.summary_signal(summary),
        }
    }

    pub fn compute(&self, signals: &ConfidenceSignals) -> GlobalConfidence {
        let parts = [
            (Component::TextQuality, ComponentSignal::Present(signals.quality), self.quality_weight),
            (Component::Entities, signals.entities, self.entity_weight),
            (Component::Rights, signals.rights, self.rights_weight),
            (Component::Summary, signals.summary, self.summary_weight),
        ];

        let breakdown: Vec<ConfidenceContribution> = parts
            .iter()
            .map(|&(component, signal, weight)| match signal {
                ComponentSignal::Present(score) => ConfidenceContribution {
                    component: component.as_str().to_string(),
                    state: "present".to_string(),
                    score: Some(score),
                    contribution: score * weight,
                },
                ComponentSignal::Absent => ConfidenceContribution {
                    component: component.as_str().to_string(),
                    state: "absent".to_string(),
                    score: None,
                    contribution: self.absent_penalty,
                },
            })
            .collect();

        let sum: f64 = breakdown.iter().map(|c| c.contribution).sum();
        let value = if self.clamp { sum.clamp(0.0, 1.0) } else { sum };

        GlobalConfidence { value, breakdown }
    }
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signals(quality: f64, entities: Option<f64>, rights: Option<f64>, summary: Option<f64>) -> ConfidenceSignals {
        ConfidenceSignals {
            quality,
            entities: ComponentSignal::from_score(entities),
            rights: ComponentSignal::from_score(rights),
            summary: ComponentSignal::from_score(summary),
        }
    }

    #[test]
    fn test_absent_components_contribute_penalty() {
        let result = ConfidenceModel::default().compute(&signals(0.8, None, None, None));
        assert!((result.value - 0.54).abs() < 1e-9);
        assert_eq!(result.breakdown.len(), 4);
        assert_eq!(result.breakdown[1].state, "absent");
        assert_eq!(result.breakdown[1].contribution, 0.1);
    }

    #[test]
    fn test_present_components_are_weighted() {
        let result = ConfidenceModel::default().compute(&signals(1.0, Some(0.9), Some(0.6), Some(0.5)));
        // 0.3 + 0.18 + 0.18 + 0.1
        assert!((result.value - 0.76).abs() < 1e-9);
        assert_eq!(result.breakdown[2].score, Some(0.6));
    }

    #[test]
    fn test_summary_signal() {
        let model = ConfidenceModel::default();
        assert_eq!(model.summary_signal(None), ComponentSignal::Absent);
        assert_eq!(model.summary_signal(Some(&SummaryResult::empty("too short"))), ComponentSignal::Absent);

        let summary = SummaryResult {
            summary: vec!["palavra"; 50].join(" "),
            ..Default::default()
        };
        assert_eq!(model.summary_signal(Some(&summary)), ComponentSignal::Present(0.5));

        let long = SummaryResult {
            summary: vec!["palavra"; 250].join(" "),
            ..Default::default()
        };
        assert_eq!(model.summary_signal(Some(&long)), ComponentSignal::Present(1.0));
    }

    #[test]
    fn test_clamping_is_configurable() {
        let config = PipelineConfig {
            quality_weight: 2.0,
            ..Default::default()
        };
        let clamped = ConfidenceModel::from_config(&config).compute(&signals(1.0, None, None, None));
        assert_eq!(clamped.value, 1.0);

        let config = PipelineConfig {
            quality_weight: 2.0,
            clamp_global_confidence: false,
            ..Default::default()
        };
        let raw = ConfidenceModel::from_config(&config).compute(&signals(1.0, None, None, None));
        assert!((raw.value - 2.3).abs() < 1e-9);
    }

    fn arb_signal() -> impl Strategy<Value = Option<f64>> {
        prop::option::of(0.0f64..=1.0)
    }

    proptest! {
        #[test]
        fn prop_default_model_stays_in_unit_interval(
            quality in 0.0f64..=1.0,
            entities in arb_signal(),
            rights in arb_signal(),
            summary in arb_signal(),
        ) {
            let result = ConfidenceModel::default().compute(&signals(quality, entities, rights, summary));
            prop_assert!((0.0..=1.0).contains(&result.value));
        }
    }
}
