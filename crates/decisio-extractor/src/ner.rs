//! Named Entity Recognition (NER) module
//!
//! Provides the entity source adapter:
//! - Pattern library: deterministic regexes for legal entities
//! - Recognizer boundary: candidates from a statistical recognizer are
//!   validated before they reach the resolver

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use decisio_core::{Entity, EntityRecognizer, RawCandidateEntity, Result};

// ============================================================================
// Entity Labels
// ============================================================================

/// Entity labels produced by the pattern library and the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalEntityType {
    // Pattern library
    Processo,
    Money,
    Date,
    Law,
    Court,
    WorkerRight,
    Party,
    ActionType,

    // Statistical recognizer
    Person,
    Organization,
    Location,
    Misc,
    Time,
}

impl LegalEntityType {
    /// Get the label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processo => "PROCESSO",
            Self::Money => "MONEY",
            Self::Date => "DATE",
            Self::Law => "LAW",
            Self::Court => "COURT",
            Self::WorkerRight => "WORKER_RIGHT",
            Self::Party => "PARTY",
            Self::ActionType => "ACTION_TYPE",
            Self::Person => "PER",
            Self::Organization => "ORG",
            Self::Location => "LOC",
            Self::Misc => "MISC",
            Self::Time => "TIME",
        }
    }

    /// Portuguese description attached to resolved entities
    pub fn description(&self) -> &'static str {
        match self {
            Self::Processo => "Número do processo",
            Self::Money => "Valor monetário",
            Self::Date => "Data",
            Self::Law => "Lei/Artigo",
            Self::Court => "Tribunal/Vara",
            Self::WorkerRight => "Direito trabalhista",
            Self::Party => "Parte",
            Self::ActionType => "Tipo de ação",
            Self::Person => "Pessoa",
            Self::Organization => "Organização",
            Self::Location => "Local",
            Self::Misc => "Miscelânea",
            Self::Time => "Horário",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let kind = match label.to_uppercase().as_str() {
            "PROCESSO" => Self::Processo,
            "MONEY" => Self::Money,
            "DATE" => Self::Date,
            "LAW" => Self::Law,
            "COURT" => Self::Court,
            "WORKER_RIGHT" => Self::WorkerRight,
            "PARTY" => Self::Party,
            "ACTION_TYPE" => Self::ActionType,
            "PER" | "PERSON" => Self::Person,
            "ORG" => Self::Organization,
            "LOC" => Self::Location,
            "MISC" => Self::Misc,
            "TIME" => Self::Time,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for LegalEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Description for any label, falling back to the label itself
pub fn describe_label(label: &str) -> String {
    LegalEntityType::from_label(label)
        .map(|kind| kind.description().to_string())
        .unwrap_or_else(|| label.to_string())
}

// ============================================================================
// Pattern Library
// ============================================================================

const MONTHS: &str = "janeiro|fevereiro|março|abril|maio|junho|julho|agosto|setembro|outubro|novembro|dezembro";

/// Deterministic regex recognizer for labor-court entities
pub struct PatternLibrary {
    /// Pattern rules (regex -> entity label)
    patterns: Vec<(Regex, LegalEntityType)>,
    /// Confidence assigned to every pattern match
    confidence: f64,
}

impl PatternLibrary {
    /// Confidence of deterministic pattern matches
    pub const DEFAULT_CONFIDENCE: f64 = 0.9;

    /// Create the library with the default labor-court rules
    pub fn new() -> Self {
        let mut library = Self {
            patterns: Vec::new(),
            confidence: Self::DEFAULT_CONFIDENCE,
        };

        library.init_process_patterns();
        library.init_money_patterns();
        library.init_date_patterns();
        library.init_law_patterns();
        library.init_court_patterns();
        library.init_worker_right_patterns();
        library.init_party_patterns();
        library.init_action_patterns();
        library
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn init_process_patterns(&mut self) {
        // CNJ numbering: NNNNNNN-DD.AAAA.J.TR.OOOO
        self.add_pattern(
            r"\b\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4}\b",
            LegalEntityType::Processo,
        );
        self.add_pattern(
            r"\b\d{4}[.\s]?\d{3}[.\s]?\d{3}[.\s]?\d{3}[.\s]?\d[.\s]?\d{2}[.\s]?\d{4}\b",
            LegalEntityType::Processo,
        );
        self.add_pattern(
            r"(?:Processo|Autos)\s+n[º°]?\s*\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4}\b",
            LegalEntityType::Processo,
        );
    }

    fn init_money_patterns(&mut self) {
        self.add_pattern(r"R\$\s*\d{1,3}(?:\.?\d{3})*(?:,\d{2})?", LegalEntityType::Money);
        self.add_pattern(r"R\$\s*\d{1,3}(?:,\d{3})*(?:\.\d{2})?", LegalEntityType::Money);
        self.add_pattern(
            r"\d{1,3}(?:\.?\d{3})*(?:,\d{2})?\s*(?:reais?|milhões?|bilhões?)",
            LegalEntityType::Money,
        );
        self.add_pattern(
            r"(?:valor|montante)\s+(?:de|em)\s+R\$\s*\d{1,3}(?:\.?\d{3})*(?:,\d{2})?",
            LegalEntityType::Money,
        );
        self.add_pattern(
            r"\d+(?:\s*mil)?(?:\s*e\s*\d{1,3})?\s*reais",
            LegalEntityType::Money,
        );
    }

    fn init_date_patterns(&mut self) {
        self.add_pattern(r"\b\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b", LegalEntityType::Date);
        self.add_pattern(
            &format!(r"\b\d{{1,2}}\s+de\s+(?:{MONTHS})\s+de\s+\d{{4}}\b"),
            LegalEntityType::Date,
        );
        self.add_pattern(
            &format!(r"\b(?:{MONTHS})\s+de\s+\d{{4}}\b"),
            LegalEntityType::Date,
        );
        self.add_pattern(
            &format!(r"\b\d{{1,2}}\s+de\s+(?:{MONTHS})\b"),
            LegalEntityType::Date,
        );
        self.add_pattern(r"\bano\s+de\s+\d{4}\b", LegalEntityType::Date);
    }

    fn init_law_patterns(&mut self) {
        self.add_pattern(
            r"(?:art\.?|artigo)\s*\d+[º°]?(?:\s*,?\s*caput)?(?:\s*,?\s*(?:§|parágrafo)\s*\d+[º°]?)?(?:\s*,\s*inciso\s+[IVXLCDM]+)?(?:\s*,\s*alínea\s+[a-z])?(?:\s+da\s+(?:CLT|CF|CC|CP|CPC|CDC|LSA|Lei\s+\d+|DL\s+\d+|Súmula\s+\d+))?",
            LegalEntityType::Law,
        );
        self.add_pattern(r"\bCLT\b|Consolidação das Leis do Trabalho", LegalEntityType::Law);
        self.add_pattern(r"\bCF\b|Constituição Federal", LegalEntityType::Law);
        self.add_pattern(r"\bCC\b|Código Civil", LegalEntityType::Law);
        self.add_pattern(r"\bCPC\b|Código de Processo Civil", LegalEntityType::Law);
        self.add_pattern(
            r"\bLei\s+n[º°]?\s*\d+(?:\.\d{3})*(?:[.,/]\d{2,4})?",
            LegalEntityType::Law,
        );
        self.add_pattern(
            r"\bDecreto\s+n[º°]?\s*\d+(?:\.\d{3})*(?:[.,/]\d{2,4})?",
            LegalEntityType::Law,
        );
        self.add_pattern(
            r"\bSúmula\s+(?:n[º°]?\s*\d+|TST\s+n[º°]?\s*\d+)",
            LegalEntityType::Law,
        );
        self.add_pattern(r"\bOJ\s+\d+(?:/\s*SDI-?\d+)?", LegalEntityType::Law);
        self.add_pattern(
            r"(?:jurisprudência|precedente)(?:\s+do\s+(?:TST|STF|STJ|TRT))?",
            LegalEntityType::Law,
        );
    }

    fn init_court_patterns(&mut self) {
        self.add_pattern(
            r"\bTST\b|\bTRT\s*\d{1,2}[ªº]?\s*Região\b|\bSTF\b|\bSTJ\b",
            LegalEntityType::Court,
        );
        self.add_pattern(
            r"Tribunal\s+Superior\s+do\s+Trabalho|Superior\s+Tribunal\s+de\s+Justiça|Supremo\s+Tribunal\s+Federal",
            LegalEntityType::Court,
        );
        self.add_pattern(
            r"\d{1,2}[ªº]?\s*Vara\s+(?:do\s+Trabalho|Cível|Federal)",
            LegalEntityType::Court,
        );
        self.add_pattern(
            r"\bMinistério\s+Público\s+do\s+Trabalho\b|\bMPT\b",
            LegalEntityType::Court,
        );
        self.add_pattern(r"\bJustiça\s+do\s+Trabalho\b", LegalEntityType::Court);
    }

    fn init_worker_right_patterns(&mut self) {
        let rights = [
            r"horas?\s+extras?",
            r"sobrejornada",
            r"trabalho\s+extraordinário",
            r"adicional\s+noturno",
            r"trabalho\s+noturno",
            r"adicional\s+de\s+insalubridade",
            r"insalubridade",
            r"adicional\s+de\s+periculosidade",
            r"periculosidade",
            r"vale[\-\s]transporte",
            r"auxílio[\-\s]transporte",
            r"vale[\-\s]alimentação",
            r"vale[\-\s]refeição",
            r"auxílio[\-\s]alimentação",
            r"equiparação\s+salarial",
            r"isonomia\s+salarial",
            r"décimo\s+terceiro",
            r"13[º°]\s+salário",
            r"gratificação\s+natalina",
            r"férias\s+(?:proporcionais?|vencidas?|em\s+dobro)",
            r"férias?",
            r"aviso\s+prévio",
            r"pré[\-\s]aviso",
            r"multa\s+do\s+FGTS",
            r"FGTS",
            r"Fundo\s+de\s+Garantia",
            r"estabilidade\s+provisória",
            r"estabilidade",
            r"garantia\s+no\s+emprego",
            r"indenização\s+por\s+danos?\s+morais?",
            r"dano\s+moral",
            r"rescisão\s+indireta",
            r"justa\s+causa\s+do\s+empregador",
            r"salário[\-\s]família",
            r"vínculo\s+empregatício",
            r"reconhecimento\s+de\s+vínculo",
            r"verbas\s+rescisórias",
            r"rescisão\s+contratual",
            r"dispensa\s+sem\s+justa\s+causa",
            r"salário\s+mínimo",
            r"piso\s+salarial",
            r"assédio\s+moral",
            r"assédio\s+sexual",
            r"acidente\s+de\s+trabalho",
            r"doença\s+ocupacional",
            r"horas\s+in\s+itinere",
        ];
        for pattern in rights {
            self.add_pattern(pattern, LegalEntityType::WorkerRight);
        }
    }

    fn init_party_patterns(&mut self) {
        self.add_pattern(
            r"\b(?:reclamante|reclamada|reclamado|autor|réu|exequente|executado|embargante|embargado|litigante)\b",
            LegalEntityType::Party,
        );
        self.add_pattern(r"\b(?:as\s+partes|parte)\b", LegalEntityType::Party);
    }

    fn init_action_patterns(&mut self) {
        self.add_pattern(
            r"reclamação\s+trabalhista|ação\s+trabalhista|processo\s+trabalhista",
            LegalEntityType::ActionType,
        );
        self.add_pattern(r"sentença|acórdão|decisão\s+judicial", LegalEntityType::ActionType);
        self.add_pattern(
            r"recurso\s+ordinário|recurso\s+de\s+revista|embargos\s+de\s+declaração|agravo\s+de\s+instrumento",
            LegalEntityType::ActionType,
        );
        self.add_pattern(
            r"contestação|manifestação|petição|impugnação",
            LegalEntityType::ActionType,
        );
    }

    /// Add a case-insensitive regex pattern
    fn add_pattern(&mut self, pattern: &str, entity_type: LegalEntityType) {
        match Regex::new(&format!("(?i){pattern}")) {
            Ok(regex) => self.patterns.push((regex, entity_type)),
            Err(e) => tracing::warn!(%entity_type, error = %e, "skipping invalid entity pattern"),
        }
    }

    /// Extract candidates by pattern matching
    fn extract_by_patterns(&self, text: &str) -> Vec<RawCandidateEntity> {
        let mut candidates = Vec::new();

        for (regex, entity_type) in &self.patterns {
            for mat in regex.find_iter(text) {
                if mat.as_str().trim().is_empty() {
                    continue;
                }
                candidates.push(RawCandidateEntity::new(
                    mat.as_str(),
                    entity_type.as_str(),
                    mat.start(),
                    mat.end(),
                    self.confidence,
                ));
            }
        }

        candidates
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for PatternLibrary {
    fn recognize(&self, text: &str) -> Result<Vec<RawCandidateEntity>> {
        Ok(self.extract_by_patterns(text))
    }

    fn name(&self) -> &str {
        "patterns"
    }
}

// ============================================================================
// Entity Source Adapter
// ============================================================================

/// Candidates gathered from every source, after boundary validation
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub entities: Vec<Entity>,
    /// Candidates dropped because they violated the span contract
    pub rejected: usize,
}

/// Combines an optional statistical recognizer with the pattern library
pub struct EntitySourceAdapter {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    patterns: PatternLibrary,
}

impl EntitySourceAdapter {
    /// Adapter backed by the pattern library only
    pub fn new() -> Self {
        Self {
            recognizer: None,
            patterns: PatternLibrary::new(),
        }
    }

    /// Add a statistical recognizer
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Collect candidates from all sources.
    ///
    /// Fails when the recognizer fails; malformed candidates are dropped
    /// and counted instead.
    pub fn collect(&self, text: &str) -> Result<CandidateBatch> {
        let mut raw = Vec::new();

        if let Some(recognizer) = &self.recognizer {
            let found = recognizer.recognize(text)?;
            tracing::debug!(recognizer = recognizer.name(), count = found.len(), "recognizer candidates");
            raw.extend(found);
        }

        let pattern_hits = self.patterns.recognize(text)?;
        tracing::debug!(count = pattern_hits.len(), "pattern candidates");
        raw.extend(pattern_hits);

        let mut batch = CandidateBatch::default();
        for candidate in raw {
            match candidate.validate(text) {
                Ok(()) => {
                    let description = describe_label(&candidate.label);
                    batch.entities.push(candidate.into_entity(description));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting candidate entity");
                    batch.rejected += 1;
                }
            }
        }

        Ok(batch)
    }
}

impl Default for EntitySourceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Entity Statistics
// ============================================================================

/// Summary statistics over a resolved entity set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    pub total: usize,
    pub by_label: BTreeMap<String, usize>,
    pub average_confidence: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
}

impl EntityStats {
    pub fn from_entities(entities: &[Entity]) -> Self {
        if entities.is_empty() {
            return Self::default();
        }

        let mut by_label = BTreeMap::new();
        for entity in entities {
            *by_label.entry(entity.label.clone()).or_insert(0) += 1;
        }

        let confidences = entities.iter().map(|e| e.confidence);
        let sum: f64 = confidences.clone().sum();

        Self {
            total: entities.len(),
            by_label,
            average_confidence: sum / entities.len() as f64,
            min_confidence: confidences.clone().fold(f64::INFINITY, f64::min),
            max_confidence: confidences.fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use decisio_core::DecisioError;

    struct FixedRecognizer(Vec<RawCandidateEntity>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RawCandidateEntity>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct BrokenRecognizer;

    impl EntityRecognizer for BrokenRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RawCandidateEntity>> {
            Err(DecisioError::Recognizer("model not loaded".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn labels_of<'a>(candidates: &'a [RawCandidateEntity], text: &str) -> Vec<&'a str> {
        candidates
            .iter()
            .filter(|c| c.text == text)
            .map(|c| c.label.as_str())
            .collect()
    }

    #[test]
    fn test_pattern_library_money_and_law() {
        let library = PatternLibrary::new();
        let text = "Condeno a reclamada ao pagamento de R$ 5.000,00, nos termos do art. 59 da CLT.";
        let candidates = library.recognize(text).unwrap();

        assert!(labels_of(&candidates, "R$ 5.000,00").contains(&"MONEY"));
        assert!(candidates
            .iter()
            .any(|c| c.label == "LAW" && c.text.starts_with("art. 59")));
        assert!(candidates.iter().all(|c| c.confidence == 0.9));
    }

    #[test]
    fn test_pattern_library_process_number_and_court() {
        let library = PatternLibrary::new();
        let text = "Processo nº 0001234-56.2023.5.02.0001 - 3ª Vara do Trabalho de São Paulo, TRT 2ª Região";
        let candidates = library.recognize(text).unwrap();

        assert!(labels_of(&candidates, "0001234-56.2023.5.02.0001").contains(&"PROCESSO"));
        assert!(candidates.iter().any(|c| c.label == "COURT" && c.text.contains("Vara do Trabalho")));
        assert!(candidates.iter().any(|c| c.label == "COURT" && c.text.starts_with("TRT")));
    }

    #[test]
    fn test_pattern_library_dates_are_case_insensitive() {
        let library = PatternLibrary::new();
        let text = "Admitido em 10 de Março de 2019 e dispensado em 05/01/2021.";
        let candidates = library.recognize(text).unwrap();

        assert!(labels_of(&candidates, "10 de Março de 2019").contains(&"DATE"));
        assert!(labels_of(&candidates, "05/01/2021").contains(&"DATE"));
    }

    #[test]
    fn test_describe_label() {
        assert_eq!(describe_label("MONEY"), "Valor monetário");
        assert_eq!(describe_label("PER"), "Pessoa");
        assert_eq!(describe_label("CUSTOM"), "CUSTOM");
        assert_eq!(LegalEntityType::WorkerRight.to_string(), "WORKER_RIGHT");
    }

    #[test]
    fn test_adapter_drops_malformed_recognizer_candidates() {
        let text = "João da Silva ajuizou reclamação trabalhista.";
        let recognizer = FixedRecognizer(vec![
            RawCandidateEntity::new("João da Silva", "PER", 0, "João da Silva".len(), 0.8),
            RawCandidateEntity::new("bad", "PER", 10, 4, 0.8),
            RawCandidateEntity::new("João", "PER", 0, "João".len(), 1.5),
        ]);
        let adapter = EntitySourceAdapter::new().with_recognizer(Arc::new(recognizer));

        let batch = adapter.collect(text).unwrap();

        assert_eq!(batch.rejected, 2);
        let person = batch.entities.iter().find(|e| e.label == "PER").unwrap();
        assert_eq!(person.description, "Pessoa");
        assert!(batch.entities.iter().any(|e| e.label == "ACTION_TYPE"));
    }

    #[test]
    fn test_adapter_propagates_recognizer_failure() {
        let adapter = EntitySourceAdapter::new().with_recognizer(Arc::new(BrokenRecognizer));
        assert!(matches!(
            adapter.collect("qualquer texto"),
            Err(DecisioError::Recognizer(_))
        ));
    }

    #[test]
    fn test_entity_stats() {
        let entities = vec![
            RawCandidateEntity::new("a", "MONEY", 0, 1, 0.9).into_entity("Valor monetário"),
            RawCandidateEntity::new("b", "MONEY", 2, 3, 0.7).into_entity("Valor monetário"),
            RawCandidateEntity::new("c", "LAW", 4, 5, 0.8).into_entity("Lei/Artigo"),
        ];
        let stats = EntityStats::from_entities(&entities);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_label["MONEY"], 2);
        assert!((stats.average_confidence - 0.8).abs() < 1e-9);
        assert_eq!(stats.min_confidence, 0.7);
        assert_eq!(stats.max_confidence, 0.9);
        assert_eq!(EntityStats::from_entities(&[]), EntityStats::default());
    }
}
