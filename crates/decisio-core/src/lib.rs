//! Decisio Core - Domain records, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the decisio engine:
//! - Entity and worker-right records extracted from judicial decisions
//! - Outcome classification candidates and the fused verdict
//! - Per-document analysis records
//! - Common error types
//! - Collaborator traits (recognizer, summarizer, quality scorer, storage)
//! - Configuration management

pub mod config;
pub mod store;

pub use config::{
    AppConfig, BatchConfig, ClassifierConfig, ConfigError, LoggingConfig, MethodReliability,
    MethodTable, PipelineConfig, ResolutionStrategy, ResolverConfig, ScoringMethodKind,
};
pub use store::InMemoryAnalysisStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for decisio operations
#[derive(Error, Debug)]
pub enum DecisioError {
    #[error("Invalid candidate entity: {reason}")]
    InvalidCandidate { reason: String },

    #[error("Recognizer error: {0}")]
    Recognizer(String),

    #[error("Input text is empty")]
    EmptyText,

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document {document_id} timed out after {secs}s")]
    Timeout { document_id: String, secs: u64 },

    #[error("Worker task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DecisioError>;

// ============================================================================
// Entities
// ============================================================================

/// A resolved named entity found in decision text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Literal text covered by the span
    pub text: String,

    /// Label such as `MONEY`, `LAW` or `PER`
    pub label: String,

    /// Byte offset where the span starts
    pub start: usize,

    /// Byte offset one past the end of the span
    pub end: usize,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Human-readable label description
    pub description: String,
}

impl Entity {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the two spans share at least one position
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Candidate span as produced by a recognizer, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandidateEntity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

impl RawCandidateEntity {
    pub fn new(
        text: impl Into<String>,
        label: impl Into<String>,
        start: usize,
        end: usize,
        confidence: f64,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
            confidence,
        }
    }

    /// Check the candidate against the document it was extracted from.
    ///
    /// Rejects empty or inverted spans, spans outside the document,
    /// offsets that split a UTF-8 character, and confidences outside [0, 1].
    pub fn validate(&self, document: &str) -> Result<()> {
        let invalid = |reason: String| Err(DecisioError::InvalidCandidate { reason });

        if self.end <= self.start {
            return invalid(format!(
                "span [{}, {}) of '{}' is empty or inverted",
                self.start, self.end, self.label
            ));
        }
        if self.end > document.len() {
            return invalid(format!(
                "span [{}, {}) exceeds document length {}",
                self.start,
                self.end,
                document.len()
            ));
        }
        if !document.is_char_boundary(self.start) || !document.is_char_boundary(self.end) {
            return invalid(format!(
                "span [{}, {}) does not fall on character boundaries",
                self.start, self.end
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return invalid(format!(
                "confidence {} of '{}' is outside [0, 1]",
                self.confidence, self.label
            ));
        }
        Ok(())
    }

    /// Promote a validated candidate into an entity
    pub fn into_entity(self, description: impl Into<String>) -> Entity {
        Entity {
            text: self.text,
            label: self.label,
            start: self.start,
            end: self.end,
            confidence: self.confidence,
            description: description.into(),
        }
    }
}

// ============================================================================
// Worker Rights
// ============================================================================

/// Outcome attributed to a single worker right
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightOutcome {
    Granted,
    Denied,
    PartiallyGranted,
    #[default]
    Unknown,
}

impl RightOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::PartiallyGranted => "partially_granted",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RightOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labor entitlement mentioned in a decision, with its attributed outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRight {
    /// Right identifier, e.g. `overtime`
    #[serde(rename = "type")]
    pub right_type: String,

    /// Description of the entitlement
    pub description: String,

    /// Distinct literal mentions found in the text
    pub mentions: Vec<String>,

    /// Total number of keyword hits, duplicates included
    pub mention_count: usize,

    /// Unique sentences containing a mention, in order of first hit
    pub context_sentences: Vec<String>,

    /// Statutes and precedents associated with the right
    pub legal_basis: Vec<String>,

    /// Attributed outcome
    pub decision_outcome: RightOutcome,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Right-outcome record accepted by the rights-derived scoring method.
///
/// Fields are lenient: outcome strings may use English or Portuguese
/// synonyms and unknown values are ignored by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RightOutcomeRecord {
    #[serde(rename = "type", default)]
    pub right_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub decision_outcome: Option<String>,

    #[serde(default)]
    pub confidence: Option<f64>,
}

impl RightOutcomeRecord {
    pub fn new(right_type: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            right_type: right_type.into(),
            description: None,
            decision_outcome: Some(outcome.into()),
            confidence: None,
        }
    }

    /// Label used in evidence: the type, else the description
    pub fn display_name(&self) -> &str {
        if !self.right_type.is_empty() {
            &self.right_type
        } else {
            self.description.as_deref().unwrap_or("right")
        }
    }
}

impl From<&WorkerRight> for RightOutcomeRecord {
    fn from(right: &WorkerRight) -> Self {
        Self {
            right_type: right.right_type.clone(),
            description: None,
            decision_outcome: Some(right.decision_outcome.as_str().to_string()),
            confidence: Some(right.confidence),
        }
    }
}

// ============================================================================
// Outcome Classification
// ============================================================================

/// Overall decision outcome from the claimant's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Favorable,
    Unfavorable,
    PartiallyFavorable,
    #[default]
    Undetermined,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::PartiallyFavorable => "partially_favorable",
            Self::Undetermined => "undetermined",
        }
    }

    /// The three outcomes a scoring method can vote for, in tie-break order
    pub const DECISIVE: [DecisionOutcome; 3] = [
        DecisionOutcome::Favorable,
        DecisionOutcome::Unfavorable,
        DecisionOutcome::PartiallyFavorable,
    ];

    pub fn is_decisive(&self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionOutcome {
    type Err = DecisioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "favorable" => Ok(Self::Favorable),
            "unfavorable" => Ok(Self::Unfavorable),
            "partially_favorable" | "partial" => Ok(Self::PartiallyFavorable),
            "undetermined" => Ok(Self::Undetermined),
            other => Err(DecisioError::Other(anyhow::anyhow!(
                "unknown decision outcome '{other}'"
            ))),
        }
    }
}

/// Traceability record linking a verdict to the text that triggered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub method_tag: String,
    pub matched_text: String,
}

impl EvidenceItem {
    pub fn new(method_tag: impl Into<String>, matched_text: impl Into<String>) -> Self {
        Self {
            method_tag: method_tag.into(),
            matched_text: matched_text.into(),
        }
    }
}

/// Verdict proposed by a single scoring method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCandidate {
    pub principal_outcome: DecisionOutcome,
    pub confidence: f64,
    pub evidence: Vec<EvidenceItem>,
    pub method: String,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl ClassificationCandidate {
    pub fn new(
        principal_outcome: DecisionOutcome,
        confidence: f64,
        method: impl Into<String>,
    ) -> Self {
        Self {
            principal_outcome,
            confidence,
            evidence: Vec::new(),
            method: method.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<EvidenceItem>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Final outcome verdict fused from every contributing scoring method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedClassification {
    pub principal_outcome: DecisionOutcome,
    pub confidence: f64,
    pub evidence: Vec<EvidenceItem>,
    /// `combined` when several methods voted, otherwise the single origin
    pub method: String,
    pub contributing_methods: Vec<String>,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl FusedClassification {
    /// Verdict carrying no signal, with an explanatory evidence note
    pub fn undetermined(method: impl Into<String>, note: impl Into<String>) -> Self {
        let method = method.into();
        Self {
            principal_outcome: DecisionOutcome::Undetermined,
            confidence: 0.0,
            evidence: vec![EvidenceItem::new(method.clone(), note)],
            method,
            contributing_methods: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    /// Re-label as a single candidate, e.g. when a method fuses sub-results
    pub fn into_candidate(self, method: impl Into<String>) -> ClassificationCandidate {
        let mut details = self.details;
        if !self.contributing_methods.is_empty() {
            details.insert(
                "contributing_methods".to_string(),
                serde_json::json!(self.contributing_methods),
            );
        }
        ClassificationCandidate {
            principal_outcome: self.principal_outcome,
            confidence: self.confidence,
            evidence: self.evidence,
            method: method.into(),
            details,
        }
    }
}

impl Default for FusedClassification {
    fn default() -> Self {
        Self::undetermined("none", "no patterns matched")
    }
}

// ============================================================================
// Summary and Text Quality
// ============================================================================

/// Metrics describing how much a summary compresses the source text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub original_words: usize,
    pub summary_words: usize,
    pub original_sentences: usize,
    pub summary_sentences: usize,
    pub compression_ratio: f64,
    pub sentence_ratio: f64,
}

/// Output of the summarizer collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub sentences: Vec<String>,
    pub method: String,
    pub sentence_count: usize,
    pub metrics: SummaryMetrics,
    /// Why the summary is empty, when it is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResult {
    /// Summary with no sentences, carrying the reason
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            method: "none".to_string(),
            error: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn word_count(&self) -> usize {
        self.summary.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
    }
}

/// Text-quality assessment of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextQuality {
    /// Score in [0, 1]
    pub quality_score: f64,

    /// Short issue codes, e.g. `text_too_short`
    pub issues: Vec<String>,

    pub word_count: usize,
    pub sentence_count: usize,
    pub legal_terms_found: usize,
    pub worker_terms_found: usize,
    pub special_char_ratio: f64,
    pub useful_text_ratio: f64,
}

// ============================================================================
// Document Analysis
// ============================================================================

/// Contribution of one component to the global confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceContribution {
    pub component: String,
    /// `present` or `absent`
    pub state: String,
    /// Component score when present
    pub score: Option<f64>,
    pub contribution: f64,
}

/// Per-document analysis produced by the pipeline aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub document_id: String,
    pub entities: Vec<Entity>,
    pub rights: Vec<WorkerRight>,
    pub classification: FusedClassification,
    pub summary: Option<SummaryResult>,
    pub text_quality: TextQuality,
    pub global_confidence: f64,
    pub confidence_breakdown: Vec<ConfidenceContribution>,
    /// Stages that failed and degraded to an empty result
    pub stage_errors: Vec<String>,
    pub processing_time_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl DocumentAnalysis {
    pub fn average_entity_confidence(&self) -> Option<f64> {
        average(self.entities.iter().map(|e| e.confidence))
    }

    pub fn average_right_confidence(&self) -> Option<f64> {
        average(self.rights.iter().map(|r| r.confidence))
    }
}

/// Arithmetic mean, `None` for an empty sequence
pub fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Statistical or rule-based named-entity recognizer
pub trait EntityRecognizer: Send + Sync {
    /// Produce raw candidate spans for the text
    fn recognize(&self, text: &str) -> Result<Vec<RawCandidateEntity>>;

    /// Recognizer name for logging
    fn name(&self) -> &str;
}

/// Extractive summarizer collaborator
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, max_sentences: usize, method: &str) -> Result<SummaryResult>;
}

/// Text-quality scorer collaborator
pub trait TextQualityScorer: Send + Sync {
    fn assess(&self, text: &str) -> TextQuality;
}

/// Persistent storage for document analyses
#[async_trait::async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Store (or replace) an analysis keyed by its document id
    async fn save(&self, analysis: &DocumentAnalysis) -> Result<()>;

    /// Fetch an analysis by document id
    async fn get(&self, document_id: &str) -> Result<Option<DocumentAnalysis>>;

    /// All stored document ids, sorted
    async fn list_ids(&self) -> Result<Vec<String>>;
}

// ============================================================================
// Tests
// ============================================================================
