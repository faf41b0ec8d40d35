//! Decisio Pipeline - per-document aggregation and batch processing
//!
//! [`DocumentPipeline`] runs every analysis stage over one ruling and folds
//! the results into a [`DocumentAnalysis`] with a global confidence score.
//! Stage failures degrade the analysis instead of aborting it.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use decisio_core::{
    AnalysisStore, AppConfig, DecisioError, DocumentAnalysis, Entity, EntityRecognizer,
    FusedClassification, PipelineConfig, Result, SummaryResult, Summarizer, TextQualityScorer,
    WorkerRight,
};
use decisio_extractor::classifier::INSUFFICIENT_TEXT;
use decisio_extractor::text::truncate_at_boundary;
use decisio_extractor::{
    to_outcome_records, EntityResolver, EntitySourceAdapter, OutcomeClassifier, WorkerRightAnalyzer,
};

pub mod batch;
pub mod confidence;
pub mod quality;
pub mod report;
pub mod summary;

pub use batch::{BatchDocument, BatchFailure, BatchProcessor, BatchReport};
pub use confidence::{ComponentSignal, ConfidenceModel, ConfidenceSignals, GlobalConfidence};
pub use quality::HeuristicQualityScorer;
pub use report::{export_json, AnalysisReport};
pub use summary::LegalImportanceSummarizer;

// ============================================================================
// Document Pipeline
// ============================================================================

/// Runs quality scoring, entity extraction, rights analysis, outcome
/// classification and summarization over a document
pub struct DocumentPipeline {
    config: PipelineConfig,
    adapter: EntitySourceAdapter,
    resolver: EntityResolver,
    rights: WorkerRightAnalyzer,
    classifier: OutcomeClassifier,
    quality: Arc<dyn TextQualityScorer>,
    summarizer: Arc<dyn Summarizer>,
    confidence: ConfidenceModel,
}

impl DocumentPipeline {
    /// Pipeline with the default quality scorer and summarizer
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.pipeline.clone(),
            adapter: EntitySourceAdapter::new(),
            resolver: EntityResolver::new(config.resolver.strategy),
            rights: WorkerRightAnalyzer::new(),
            classifier: OutcomeClassifier::new(&config.classifier),
            quality: Arc::new(HeuristicQualityScorer::new()),
            summarizer: Arc::new(LegalImportanceSummarizer::new()),
            confidence: ConfidenceModel::from_config(&config.pipeline),
        }
    }

    /// Add a statistical entity recognizer
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.adapter = self.adapter.with_recognizer(recognizer);
        self
    }

    pub fn with_quality_scorer(mut self, scorer: Arc<dyn TextQualityScorer>) -> Self {
        self.quality = scorer;
        self
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyse a document under a generated id
    pub fn process_text(&self, text: &str) -> Result<DocumentAnalysis> {
        self.process(&Uuid::new_v4().to_string(), text)
    }

    /// Analyse one document.
    ///
    /// Only empty input is an error. A failing recognizer or summarizer
    /// leaves that stage empty, records it in `stage_errors` and lowers the
    /// global confidence.
    pub fn process(&self, document_id: &str, text: &str) -> Result<DocumentAnalysis> {
        let start_time = Instant::now();

        if text.trim().is_empty() {
            return Err(DecisioError::EmptyText);
        }

        let text = if text.len() > self.config.max_text_length {
            tracing::warn!(
                document_id,
                bytes = text.len(),
                max = self.config.max_text_length,
                "text too long, truncating"
            );
            truncate_at_boundary(text, self.config.max_text_length)
        } else {
            text
        };

        tracing::info!(document_id, bytes = text.len(), "document analysis started");
        let mut stage_errors = Vec::new();

        let text_quality = self.quality.assess(text);
        if text_quality.quality_score < self.config.min_quality_score {
            tracing::warn!(
                document_id,
                quality_score = text_quality.quality_score,
                issues = ?text_quality.issues,
                "low quality text"
            );
        }

        let entities = if self.config.include_entities {
            self.extract_entities(document_id, text, &mut stage_errors)
        } else {
            Vec::new()
        };

        let rights: Vec<WorkerRight> = if self.config.include_rights {
            self.rights.analyze(text)
        } else {
            Vec::new()
        };
        tracing::debug!(document_id, entities = entities.len(), rights = rights.len(), "extraction done");

        let classification = self.classify(text, &rights);

        let summary = if self.config.include_summary {
            self.summarize(document_id, text, &mut stage_errors)
        } else {
            None
        };

        let signals = self
            .confidence
            .observe(&text_quality, &entities, &rights, summary.as_ref());
        let global = self.confidence.compute(&signals);

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            document_id,
            outcome = %classification.principal_outcome,
            global_confidence = global.value,
            processing_time_ms,
            "document analysis completed"
        );

        Ok(DocumentAnalysis {
            document_id: document_id.to_string(),
            entities,
            rights,
            classification,
            summary,
            text_quality,
            global_confidence: global.value,
            confidence_breakdown: global.breakdown,
            stage_errors,
            processing_time_ms,
            created_at: Utc::now(),
        })
    }

    /// Analyse and persist a document
    pub async fn process_and_store(
        &self,
        document_id: &str,
        text: &str,
        store: &dyn AnalysisStore,
    ) -> Result<DocumentAnalysis> {
        let analysis = self.process(document_id, text)?;
        store.save(&analysis).await?;
        Ok(analysis)
    }

    fn extract_entities(&self, document_id: &str, text: &str, stage_errors: &mut Vec<String>) -> Vec<Entity> {
        match self.adapter.collect(text) {
            Ok(batch) => {
                if batch.rejected > 0 {
                    tracing::warn!(document_id, rejected = batch.rejected, "candidate entities rejected");
                }
                self.resolver.resolve(batch.entities)
            }
            Err(e) => {
                tracing::warn!(document_id, error = %e, "entity stage failed");
                stage_errors.push(format!("entities: {e}"));
                Vec::new()
            }
        }
    }

    fn classify(&self, text: &str, rights: &[WorkerRight]) -> FusedClassification {
        if text.trim().chars().count() < self.config.min_text_length {
            return FusedClassification::undetermined(INSUFFICIENT_TEXT, "insufficient text");
        }
        let records = to_outcome_records(rights);
        self.classifier.analyze(text, Some(&records))
    }

    fn summarize(&self, document_id: &str, text: &str, stage_errors: &mut Vec<String>) -> Option<SummaryResult> {
        match self
            .summarizer
            .summarize(text, self.config.summary_sentences, &self.config.summary_method)
        {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(document_id, error = %e, "summary stage failed");
                stage_errors.push(format!("summary: {e}"));
                None
            }
        }
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decisio_core::{DecisionOutcome, RawCandidateEntity, TextQuality};

    struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RawCandidateEntity>> {
            Err(DecisioError::Recognizer("model not loaded".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct FixedQuality(f64);

    impl TextQualityScorer for FixedQuality {
        fn assess(&self, _text: &str) -> TextQuality {
            TextQuality {
                quality_score: self.0,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let pipeline = DocumentPipeline::default();
        assert!(matches!(pipeline.process("doc", "  \n"), Err(DecisioError::EmptyText)));
    }

    #[test]
    fn test_short_ruling() {
        let pipeline = DocumentPipeline::default().with_quality_scorer(Arc::new(FixedQuality(1.0)));
        let analysis = pipeline.process("doc-1", "Defiro o pedido de horas extras.").unwrap();

        assert_eq!(analysis.document_id, "doc-1");
        assert_eq!(analysis.rights.len(), 1);
        assert_eq!(analysis.rights[0].right_type, "overtime");
        assert_eq!(analysis.classification.principal_outcome, DecisionOutcome::Favorable);
        // text too short to summarize: the summary is present but empty
        assert!(analysis.summary.as_ref().unwrap().is_empty());
        assert!(analysis.stage_errors.is_empty());
        assert!((0.0..=1.0).contains(&analysis.global_confidence));
    }

    #[test]
    fn test_recognizer_failure_degrades_entities_only() {
        let pipeline = DocumentPipeline::default()
            .with_quality_scorer(Arc::new(FixedQuality(1.0)))
            .with_recognizer(Arc::new(FailingRecognizer));
        let analysis = pipeline
            .process("doc-2", "Julgo procedente o pedido. Condeno a ré ao pagamento de R$ 5.000,00.")
            .unwrap();

        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.stage_errors.len(), 1);
        assert!(analysis.stage_errors[0].starts_with("entities:"));
        assert_eq!(analysis.classification.principal_outcome, DecisionOutcome::Favorable);
        assert_eq!(analysis.confidence_breakdown[1].state, "absent");
    }

    #[test]
    fn test_stages_can_be_disabled() {
        let mut config = AppConfig::default();
        config.pipeline.include_entities = false;
        config.pipeline.include_rights = false;
        config.pipeline.include_summary = false;

        let pipeline = DocumentPipeline::new(&config).with_quality_scorer(Arc::new(FixedQuality(0.5)));
        let analysis = pipeline
            .process("doc-3", "Julgo improcedente o pedido por falta de provas.")
            .unwrap();

        assert!(analysis.entities.is_empty());
        assert!(analysis.rights.is_empty());
        assert!(analysis.summary.is_none());
        assert_eq!(analysis.classification.principal_outcome, DecisionOutcome::Unfavorable);
        // 0.5 * 0.3 + 3 * 0.1
        assert!((analysis.global_confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut config = AppConfig::default();
        config.pipeline.max_text_length = 40;
        let pipeline = DocumentPipeline::new(&config);

        let text = "Julgo improcedente o pedido. ".repeat(10);
        let analysis = pipeline.process("doc-4", &text).unwrap();
        assert!(analysis.entities.iter().all(|e| e.end <= 40));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let pipeline = DocumentPipeline::default();
        let a = pipeline.process_text("Julgo improcedente o pedido.").unwrap();
        let b = pipeline.process_text("Julgo improcedente o pedido.").unwrap();
        assert_ne!(a.document_id, b.document_id);
    }
}
