//! Pipeline Integration Tests
//!
//! Full runs over realistic labor-court rulings, from raw text to
//! reports and exports.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use decisio_core::{
    AnalysisStore, AppConfig, BatchConfig, DecisionOutcome, InMemoryAnalysisStore, ResolutionStrategy,
    RightOutcome,
};
use decisio_pipeline::{export_json, AnalysisReport, BatchDocument, BatchProcessor, DocumentPipeline};
use serde_json::Value;

const MIXED_RULING: &str = "SENTENÇA\n\n\
    RELATÓRIO\n\
    O reclamante ajuizou reclamação trabalhista em face da reclamada, postulando horas extras \
    e indenização por danos morais.\n\n\
    FUNDAMENTAÇÃO\n\
    Os cartões de ponto demonstram a sobrejornada habitual, nos termos do art. 59 da CLT. \
    Defiro o pedido de horas extras com reflexos.\n\
    Não restou comprovado o abalo alegado pelo autor. Indefiro o pedido de danos morais.\n\n\
    DISPOSITIVO\n\
    Ante o exposto, julgo parcialmente procedente a reclamação para condenar a reclamada ao \
    pagamento de horas extras no valor de R$ 12.500,00, conforme fundamentação.";

const DISMISSAL: &str = "Trata-se de reclamação trabalhista em que o autor pede o adicional de \
    insalubridade. O laudo pericial concluiu pela ausência de agentes insalubres no local de trabalho. \
    O reclamante não comprovou a exposição alegada. Ante o exposto, julgo improcedente o pedido \
    de adicional de insalubridade e absolvo a reclamada.";

// =============================================================================
// Single Document Tests
// =============================================================================

#[test]
fn test_mixed_ruling_end_to_end() {
    let pipeline = DocumentPipeline::default();
    let analysis = pipeline.process("mixed", MIXED_RULING).unwrap();

    let overtime = analysis
        .rights
        .iter()
        .find(|r| r.right_type == "overtime")
        .expect("overtime right");
    assert_eq!(overtime.decision_outcome, RightOutcome::Granted);

    let moral = analysis
        .rights
        .iter()
        .find(|r| r.right_type == "moral_damages")
        .expect("moral damages right");
    assert_eq!(moral.decision_outcome, RightOutcome::Denied);

    assert!(analysis.classification.principal_outcome.is_decisive());
    assert!(analysis
        .classification
        .contributing_methods
        .contains(&"rights".to_string()));

    assert!(analysis.entities.iter().any(|e| e.label == "LAW"));
    for pair in analysis.entities.windows(2) {
        assert!(pair[0].end <= pair[1].start, "entities overlap: {:?}", pair);
    }

    let summary = analysis.summary.as_ref().expect("summary");
    assert!(!summary.is_empty());
    assert!(summary.sentence_count <= pipeline.config().summary_sentences);

    assert!(analysis.stage_errors.is_empty());
    assert_eq!(analysis.confidence_breakdown.len(), 4);
    assert!((0.0..=1.0).contains(&analysis.global_confidence));
}

#[test]
fn test_dismissal_is_unfavorable() {
    let analysis = DocumentPipeline::default().process("dismissal", DISMISSAL).unwrap();

    assert_eq!(analysis.classification.principal_outcome, DecisionOutcome::Unfavorable);
    assert!(analysis.classification.confidence > 0.5);
    assert!(analysis
        .rights
        .iter()
        .all(|r| r.decision_outcome != RightOutcome::Granted));
}

#[test]
fn test_max_weight_resolution_keeps_entities_disjoint() {
    let mut config = AppConfig::default();
    config.resolver.strategy = ResolutionStrategy::MaxWeight;

    let analysis = DocumentPipeline::new(&config).process("mw", MIXED_RULING).unwrap();
    for pair in analysis.entities.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let pipeline = DocumentPipeline::default();
    let first = pipeline.process("same", MIXED_RULING).unwrap();
    let second = pipeline.process("same", MIXED_RULING).unwrap();

    assert_eq!(first.entities, second.entities);
    assert_eq!(first.rights, second.rights);
    assert_eq!(first.classification, second.classification);
    assert_eq!(first.global_confidence, second.global_confidence);
}

#[test]
fn test_process_and_store_round_trip() {
    let pipeline = DocumentPipeline::default();
    let store = InMemoryAnalysisStore::new();

    let stored = tokio_test::block_on(pipeline.process_and_store("stored", DISMISSAL, &store)).unwrap();
    let loaded = tokio_test::block_on(store.get("stored")).unwrap().expect("stored analysis");

    assert_eq!(loaded.document_id, stored.document_id);
    assert_eq!(loaded.classification.principal_outcome, stored.classification.principal_outcome);
    assert_eq!(loaded.rights.len(), stored.rights.len());
}

// =============================================================================
// Batch and Reporting Tests
// =============================================================================

#[tokio::test]
async fn test_batch_report_and_export() {
    let pipeline = Arc::new(DocumentPipeline::default());
    let processor = BatchProcessor::new(pipeline, &BatchConfig::default());

    let report = processor
        .run(vec![
            BatchDocument::new("mixed", MIXED_RULING),
            BatchDocument::new("dismissal", DISMISSAL),
            BatchDocument::new("blank", ""),
        ])
        .await;

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].document_id, "blank");

    let aggregate = AnalysisReport::from_analyses(&report.analyses).unwrap();
    assert_eq!(aggregate.general.total_documents, 2);
    assert_eq!(aggregate.classification_distribution.values().sum::<usize>(), 2);
    assert!(aggregate.rights.total_rights >= 3);

    let exported: Value = serde_json::from_str(&export_json(&report.analyses).unwrap()).unwrap();
    assert_eq!(exported["metadata"]["total_documents"], 2);
    assert_eq!(exported["results"][0]["document_id"], "mixed");
    assert_eq!(exported["results"][1]["document_id"], "dismissal");
}
