//! Aggregate reporting and JSON export over many analyses

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use decisio_core::{average, DocumentAnalysis, Result, RightOutcome};

/// Version stamped into exports
pub const EXPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    pub total_documents: usize,
    pub avg_processing_time_ms: f64,
    pub avg_global_confidence: f64,
    pub avg_quality_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityReportStats {
    pub total_entities: usize,
    pub avg_entities_per_document: f64,
    pub label_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RightsReportStats {
    pub total_rights: usize,
    pub avg_rights_per_document: f64,
    pub type_distribution: BTreeMap<String, usize>,
    pub outcome_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub successful_summaries: usize,
    pub success_rate: f64,
    pub avg_compression_ratio: f64,
}

/// Documents per quality band: high >= 0.8, medium >= 0.5, low below
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Aggregate statistics over a set of document analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub general: GeneralStats,
    pub entities: EntityReportStats,
    pub rights: RightsReportStats,
    pub classification_distribution: BTreeMap<String, usize>,
    pub summaries: SummaryStats,
    pub quality_distribution: QualityDistribution,
}

impl AnalysisReport {
    /// `None` when there is nothing to report on
    pub fn from_analyses(analyses: &[DocumentAnalysis]) -> Option<Self> {
        if analyses.is_empty() {
            return None;
        }
        let total = analyses.len();
        let per_document = |count: usize| (count as f64 / total as f64 * 10.0).round() / 10.0;

        let general = GeneralStats {
            total_documents: total,
            avg_processing_time_ms: round2(
                average(analyses.iter().map(|a| a.processing_time_ms as f64)).unwrap_or(0.0),
            ),
            avg_global_confidence: round2(average(analyses.iter().map(|a| a.global_confidence)).unwrap_or(0.0)),
            avg_quality_score: round2(
                average(analyses.iter().map(|a| a.text_quality.quality_score)).unwrap_or(0.0),
            ),
        };

        let mut label_distribution = BTreeMap::new();
        for entity in analyses.iter().flat_map(|a| &a.entities) {
            *label_distribution.entry(entity.label.clone()).or_insert(0) += 1;
        }
        let total_entities: usize = label_distribution.values().sum();

        let mut type_distribution = BTreeMap::new();
        let mut outcome_distribution: BTreeMap<String, usize> = [
            RightOutcome::Granted,
            RightOutcome::Denied,
            RightOutcome::PartiallyGranted,
            RightOutcome::Unknown,
        ]
        .iter()
        .map(|o| (o.as_str().to_string(), 0))
        .collect();
        for right in analyses.iter().flat_map(|a| &a.rights) {
            *type_distribution.entry(right.right_type.clone()).or_insert(0) += 1;
            *outcome_distribution
                .entry(right.decision_outcome.as_str().to_string())
                .or_insert(0) += 1;
        }
        let total_rights: usize = type_distribution.values().sum();

        let mut classification_distribution = BTreeMap::new();
        for analysis in analyses {
            *classification_distribution
                .entry(analysis.classification.principal_outcome.as_str().to_string())
                .or_insert(0) += 1;
        }

        let summaries: Vec<_> = analyses
            .iter()
            .filter_map(|a| a.summary.as_ref())
            .filter(|s| !s.is_empty())
            .collect();
        let summary_stats = SummaryStats {
            successful_summaries: summaries.len(),
            success_rate: round2(summaries.len() as f64 / total as f64),
            avg_compression_ratio: round2(
                average(
                    summaries
                        .iter()
                        .map(|s| s.metrics.compression_ratio)
                        .filter(|r| *r > 0.0),
                )
                .unwrap_or(0.0),
            ),
        };

        let mut quality_distribution = QualityDistribution::default();
        for analysis in analyses {
            match analysis.text_quality.quality_score {
                s if s >= 0.8 => quality_distribution.high += 1,
                s if s >= 0.5 => quality_distribution.medium += 1,
                _ => quality_distribution.low += 1,
            }
        }

        tracing::info!(documents = total, total_entities, total_rights, "analysis report created");

        Some(Self {
            general,
            entities: EntityReportStats {
                total_entities,
                avg_entities_per_document: per_document(total_entities),
                label_distribution,
            },
            rights: RightsReportStats {
                total_rights,
                avg_rights_per_document: per_document(total_rights),
                type_distribution,
                outcome_distribution,
            },
            classification_distribution,
            summaries: summary_stats,
            quality_distribution,
        })
    }

    /// Plain-text rendering for terminals
    pub fn render(&self) -> String {
        let mut out = format!(
            "=== Analysis Report ===\n\n\
             Documents: {}\n\
             Average global confidence: {:.2}\n\
             Average quality score:     {:.2}\n\
             Average processing time:   {:.0} ms\n\n\
             Entities: {} ({:.1} per document)\n\
             Rights:   {} ({:.1} per document)\n\
             Summaries: {} ({:.0}% success)\n\
             Quality: high {} | medium {} | low {}\n\n\
             Outcomes:\n",
            self.general.total_documents,
            self.general.avg_global_confidence,
            self.general.avg_quality_score,
            self.general.avg_processing_time_ms,
            self.entities.total_entities,
            self.entities.avg_entities_per_document,
            self.rights.total_rights,
            self.rights.avg_rights_per_document,
            self.summaries.successful_summaries,
            self.summaries.success_rate * 100.0,
            self.quality_distribution.high,
            self.quality_distribution.medium,
            self.quality_distribution.low,
        );
        for (outcome, count) in &self.classification_distribution {
            out.push_str(&format!("  {outcome}: {count}\n"));
        }
        out
    }
}

#[derive(Debug, Serialize)]
struct ExportMetadata {
    total_documents: usize,
    export_date: String,
    pipeline_version: &'static str,
}

#[derive(Debug, Serialize)]
struct Export<'a> {
    metadata: ExportMetadata,
    results: &'a [DocumentAnalysis],
}

/// Pretty JSON with export metadata and every analysis
pub fn export_json(analyses: &[DocumentAnalysis]) -> Result<String> {
    let export = Export {
        metadata: ExportMetadata {
            total_documents: analyses.len(),
            export_date: Utc::now().to_rfc3339(),
            pipeline_version: EXPORT_VERSION,
        },
        results: analyses,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use decisio_core::{
        DecisionOutcome, FusedClassification, RawCandidateEntity, SummaryResult, TextQuality, WorkerRight,
    };

    fn analysis(id: &str, quality: f64, outcome: DecisionOutcome) -> DocumentAnalysis {
        let mut classification = FusedClassification::default();
        classification.principal_outcome = outcome;
        DocumentAnalysis {
            document_id: id.to_string(),
            entities: vec![RawCandidateEntity::new("CLT", "LAW", 0, 3, 0.9).into_entity("Lei/Artigo")],
            rights: vec![WorkerRight {
                right_type: "overtime".to_string(),
                description: "Horas extras".to_string(),
                mentions: vec!["horas extras".to_string()],
                mention_count: 1,
                context_sentences: Vec::new(),
                legal_basis: Vec::new(),
                decision_outcome: RightOutcome::Granted,
                confidence: 0.5,
            }],
            classification,
            summary: None,
            text_quality: TextQuality {
                quality_score: quality,
                ..Default::default()
            },
            global_confidence: 0.6,
            confidence_breakdown: Vec::new(),
            stage_errors: Vec::new(),
            processing_time_ms: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_report() {
        assert!(AnalysisReport::from_analyses(&[]).is_none());
    }

    #[test]
    fn test_report_distributions() {
        let mut second = analysis("b", 0.6, DecisionOutcome::Unfavorable);
        second.summary = Some(SummaryResult {
            summary: "Julgo improcedente.".to_string(),
            metrics: decisio_core::SummaryMetrics {
                compression_ratio: 0.25,
                ..Default::default()
            },
            ..Default::default()
        });
        let analyses = vec![
            analysis("a", 0.9, DecisionOutcome::Favorable),
            second,
            analysis("c", 0.2, DecisionOutcome::Favorable),
        ];

        let report = AnalysisReport::from_analyses(&analyses).unwrap();
        assert_eq!(report.general.total_documents, 3);
        assert_eq!(report.general.avg_global_confidence, 0.6);
        assert_eq!(report.entities.label_distribution["LAW"], 3);
        assert_eq!(report.entities.avg_entities_per_document, 1.0);
        assert_eq!(report.rights.outcome_distribution["granted"], 3);
        assert_eq!(report.rights.outcome_distribution["denied"], 0);
        assert_eq!(report.classification_distribution["favorable"], 2);
        assert_eq!(report.summaries.successful_summaries, 1);
        assert_eq!(report.summaries.success_rate, 0.33);
        assert_eq!(report.summaries.avg_compression_ratio, 0.25);
        assert_eq!(
            report.quality_distribution,
            QualityDistribution {
                high: 1,
                medium: 1,
                low: 1
            }
        );
        assert!(report.render().contains("favorable: 2"));
    }

    #[test]
    fn test_export_json_shape() {
        let json = export_json(&[analysis("a", 0.9, DecisionOutcome::Favorable)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["total_documents"], 1);
        assert_eq!(value["results"][0]["document_id"], "a");
        assert_eq!(value["results"][0]["rights"][0]["type"], "overtime");
    }
}
