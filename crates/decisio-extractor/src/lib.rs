//! Decisio Extractor - analysis stages for labor-court rulings
//!
//! - [`ner`]: entity source adapter and legal pattern library
//! - [`resolver`]: overlap resolution of candidate entities
//! - [`rights`]: worker-right detection and outcome attribution
//! - [`classifier`]: outcome classification from six scoring methods

pub mod classifier;
pub mod ner;
pub mod resolver;
pub mod rights;
pub mod text;

pub use classifier::{parse_rights_payload, OutcomeClassifier, PatternTables, ScoringMethod};
pub use ner::{describe_label, CandidateBatch, EntitySourceAdapter, EntityStats, LegalEntityType, PatternLibrary};
pub use resolver::EntityResolver;
pub use rights::{
    create_rights_report, rights_to_json, to_outcome_records, RightsSummary, RightsVocabulary,
    WorkerRightAnalyzer,
};
