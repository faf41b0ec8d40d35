//! Decisio Configuration Management
//!
//! Handles configuration from environment variables and TOML files
//! with defaults for the standard scoring table.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Pipeline aggregation settings
    pub pipeline: PipelineConfig,

    /// Outcome classifier tuning table
    pub classifier: ClassifierConfig,

    /// Entity overlap resolution
    pub resolver: ResolverConfig,

    /// Batch worker pool
    pub batch: BatchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Logging
        if let Ok(level) = std::env::var("DECISIO_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("DECISIO_LOG_JSON") {
            config.logging.json_format = parse_bool("DECISIO_LOG_JSON", &json)?;
        }

        // Batch
        if let Ok(concurrency) = std::env::var("DECISIO_BATCH_CONCURRENCY") {
            config.batch.concurrency =
                concurrency.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DECISIO_BATCH_CONCURRENCY".to_string(),
                    value: concurrency,
                })?;
        }
        if let Ok(secs) = std::env::var("DECISIO_DOCUMENT_TIMEOUT_SECS") {
            config.batch.document_timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DECISIO_DOCUMENT_TIMEOUT_SECS".to_string(),
                    value: secs,
                })?;
        }

        // Pipeline
        if let Ok(max) = std::env::var("DECISIO_MAX_TEXT_LENGTH") {
            config.pipeline.max_text_length =
                max.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DECISIO_MAX_TEXT_LENGTH".to_string(),
                    value: max,
                })?;
        }
        if let Ok(clamp) = std::env::var("DECISIO_CLAMP_GLOBAL_CONFIDENCE") {
            config.pipeline.clamp_global_confidence =
                parse_bool("DECISIO_CLAMP_GLOBAL_CONFIDENCE", &clamp)?;
        }

        // Resolver
        if let Ok(strategy) = std::env::var("DECISIO_RESOLVER_STRATEGY") {
            config.resolver.strategy = strategy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format != defaults.logging.json_format {
            self.logging.json_format = env_config.logging.json_format;
        }
        if env_config.batch.concurrency != defaults.batch.concurrency {
            self.batch.concurrency = env_config.batch.concurrency;
        }
        if env_config.batch.document_timeout_secs != defaults.batch.document_timeout_secs {
            self.batch.document_timeout_secs = env_config.batch.document_timeout_secs;
        }
        if env_config.pipeline.max_text_length != defaults.pipeline.max_text_length {
            self.pipeline.max_text_length = env_config.pipeline.max_text_length;
        }
        if env_config.pipeline.clamp_global_confidence
            != defaults.pipeline.clamp_global_confidence
        {
            self.pipeline.clamp_global_confidence = env_config.pipeline.clamp_global_confidence;
        }
        if env_config.resolver.strategy != defaults.resolver.strategy {
            self.resolver.strategy = env_config.resolver.strategy;
        }

        Ok(self)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.concurrency".to_string(),
                value: "0".to_string(),
            });
        }
        if self.pipeline.max_text_length < self.pipeline.min_text_length {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.max_text_length".to_string(),
                value: self.pipeline.max_text_length.to_string(),
            });
        }
        if self.classifier.score_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "classifier.score_divisor".to_string(),
                value: self.classifier.score_divisor.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Pipeline aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum trimmed length (chars) below which classification is skipped
    pub min_text_length: usize,

    /// Maximum input length in bytes; longer text is truncated
    pub max_text_length: usize,

    /// Quality score under which a warning is logged
    pub min_quality_score: f64,

    /// Sentence budget passed to the summarizer
    pub summary_sentences: usize,

    /// Summarization method name
    pub summary_method: String,

    /// Summary length (words) that counts as fully adequate
    pub summary_target_words: usize,

    /// Global-confidence component weights
    pub quality_weight: f64,
    pub entity_weight: f64,
    pub rights_weight: f64,
    pub summary_weight: f64,

    /// Flat contribution of a component with no result
    pub absent_component_penalty: f64,

    /// Clamp the weighted sum into [0, 1]
    pub clamp_global_confidence: bool,

    pub include_entities: bool,
    pub include_rights: bool,
    pub include_summary: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            max_text_length: 500_000,
            min_quality_score: 0.3,
            summary_sentences: 10,
            summary_method: "legal_importance".to_string(),
            summary_target_words: 100,
            quality_weight: 0.3,
            entity_weight: 0.2,
            rights_weight: 0.3,
            summary_weight: 0.2,
            absent_component_penalty: 0.1,
            clamp_global_confidence: true,
            include_entities: true,
            include_rights: true,
            include_summary: true,
        }
    }
}

/// Identifier of an outcome scoring method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethodKind {
    Pattern,
    Inference,
    LegalLanguage,
    Rights,
    Context,
    Structure,
}

impl ScoringMethodKind {
    pub const ALL: [ScoringMethodKind; 6] = [
        Self::Pattern,
        Self::Inference,
        Self::LegalLanguage,
        Self::Rights,
        Self::Context,
        Self::Structure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Inference => "inference",
            Self::LegalLanguage => "legal_language",
            Self::Rights => "rights",
            Self::Context => "context",
            Self::Structure => "structure",
        }
    }
}

impl std::fmt::Display for ScoringMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ScoringMethodKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "scoring_method".to_string(),
                value: s.to_string(),
            })
    }
}

/// Reliability weight and confidence ceiling of one scoring method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MethodReliability {
    /// Multiplier applied to the method's confidence during fusion
    pub weight: f64,

    /// Upper bound of the method's own confidence
    pub ceiling: f64,
}

impl MethodReliability {
    pub const fn new(weight: f64, ceiling: f64) -> Self {
        Self { weight, ceiling }
    }
}

/// Named reliability table, one entry per scoring method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MethodTable {
    pub pattern: MethodReliability,
    pub inference: MethodReliability,
    pub legal_language: MethodReliability,
    pub rights: MethodReliability,
    pub context: MethodReliability,
    pub structure: MethodReliability,
}

impl MethodTable {
    pub fn get(&self, kind: ScoringMethodKind) -> MethodReliability {
        match kind {
            ScoringMethodKind::Pattern => self.pattern,
            ScoringMethodKind::Inference => self.inference,
            ScoringMethodKind::LegalLanguage => self.legal_language,
            ScoringMethodKind::Rights => self.rights,
            ScoringMethodKind::Context => self.context,
            ScoringMethodKind::Structure => self.structure,
        }
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self {
            pattern: MethodReliability::new(1.0, 1.0),
            inference: MethodReliability::new(0.6, 0.8),
            legal_language: MethodReliability::new(0.7, 0.7),
            rights: MethodReliability::new(0.8, 1.0),
            context: MethodReliability::new(0.9, 1.0),
            structure: MethodReliability::new(0.7, 1.0),
        }
    }
}

/// Outcome classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Per-method reliability weights and ceilings
    pub methods: MethodTable,

    /// Fusion weight of a method missing from the table
    pub fallback_weight: f64,

    /// Summed pattern weight is divided by this to get a confidence
    pub score_divisor: f64,

    /// Characters kept before a dispositive marker
    pub context_window_before: usize,

    /// Characters kept after a dispositive marker
    pub context_window_after: usize,

    /// Excerpt results at or below this confidence are discarded
    pub context_min_confidence: f64,

    /// Structure hits must exceed this confidence
    pub structure_min_confidence: f64,

    /// Minimum trimmed length (chars) of classifiable text
    pub min_text_length: usize,
}

impl ClassifierConfig {
    pub fn reliability(&self, kind: ScoringMethodKind) -> MethodReliability {
        self.methods.get(kind)
    }

    /// Fusion weight for a method name, falling back for unknown names
    pub fn weight_for(&self, method: &str) -> f64 {
        method
            .parse::<ScoringMethodKind>()
            .map(|kind| self.methods.get(kind).weight)
            .unwrap_or(self.fallback_weight)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            methods: MethodTable::default(),
            fallback_weight: 0.5,
            score_divisor: 2.0,
            context_window_before: 100,
            context_window_after: 200,
            context_min_confidence: 0.3,
            structure_min_confidence: 0.5,
            min_text_length: 10,
        }
    }
}

/// Strategy used to resolve overlapping entity spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Position-ordered sweep keeping the more confident of each overlapping pair
    #[default]
    Greedy,
    /// Weighted interval scheduling maximising total confidence
    MaxWeight,
}

impl std::str::FromStr for ResolutionStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "greedy" => Ok(Self::Greedy),
            "max_weight" => Ok(Self::MaxWeight),
            _ => Err(ConfigError::InvalidValue {
                key: "DECISIO_RESOLVER_STRATEGY".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Entity resolver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub strategy: ResolutionStrategy,
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Documents analysed concurrently
    pub concurrency: usize,

    /// Per-document timeout in seconds
    pub document_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            document_timeout_secs: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
