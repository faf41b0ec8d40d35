//! Worker-right analysis
//!
//! Scans decision text against a fixed vocabulary of labor entitlements,
//! collects the sentences that mention each one and attributes an outcome
//! (granted, denied, partially granted) from the wording of those sentences.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use decisio_core::{Result, RightOutcome, RightOutcomeRecord, WorkerRight};

use crate::text::{containing_sentence, sentence_spans, word_count};

// ============================================================================
// Vocabulary
// ============================================================================

/// One entitlement of the vocabulary with its compiled keyword matchers
#[derive(Debug, Clone)]
pub struct RightDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub legal_basis: &'static [&'static str],
    pub keywords: &'static [&'static str],
    matchers: Vec<Regex>,
}

impl RightDefinition {
    fn new(
        id: &'static str,
        description: &'static str,
        legal_basis: &'static [&'static str],
        keywords: &'static [&'static str],
    ) -> Self {
        let matchers = keywords
            .iter()
            .filter_map(|keyword| {
                Regex::new(&format!("(?i){}", regex::escape(keyword)))
                    .map_err(|e| tracing::warn!(right = id, keyword, error = %e, "skipping keyword"))
                    .ok()
            })
            .collect();

        Self {
            id,
            description,
            legal_basis,
            keywords,
            matchers,
        }
    }
}

/// Immutable right-type vocabulary, built once and shared
#[derive(Debug, Clone)]
pub struct RightsVocabulary {
    definitions: Vec<RightDefinition>,
}

impl RightsVocabulary {
    /// Default labor-court vocabulary
    pub fn standard() -> Self {
        let definitions = vec![
            RightDefinition::new(
                "overtime",
                "Remuneração adicional devida por trabalho prestado além da jornada normal.",
                &["Art. 59 CLT", "Art. 7º, XVI CF", "Súmula 340 TST", "OJ 394 SDI-1 TST"],
                &[
                    "horas extras",
                    "hora extra",
                    "sobrejornada",
                    "trabalho extraordinário",
                    "labor extraordinário",
                    "jornada extraordinária",
                    "além da jornada",
                    "excesso de jornada",
                    "prestação de serviços além",
                    "prorrogação de jornada",
                    "banco de horas",
                    "acordo de compensação de horas",
                ],
            ),
            RightDefinition::new(
                "night_shift_premium",
                "Acréscimo salarial para o trabalho executado no período noturno.",
                &["Art. 73 CLT", "Art. 7º, IX CF", "Súmula 60 TST"],
                &[
                    "adicional noturno",
                    "trabalho noturno",
                    "labor noturno",
                    "serviço noturno",
                    "jornada noturna",
                    "período noturno",
                    "hora noturna reduzida",
                ],
            ),
            RightDefinition::new(
                "unhealthy_premium",
                "Adicional pago ao empregado que trabalha em condições nocivas à saúde, acima dos limites de tolerância.",
                &["Art. 189-192 CLT", "NR-15", "Súmula 80 TST", "OJ 47 SDI-1 TST"],
                &[
                    "insalubridade",
                    "adicional de insalubridade",
                    "trabalho insalubre",
                    "condições insalubres",
                    "agentes insalubres",
                    "ambiente insalubre",
                    "grau de insalubridade",
                    "exposição a agentes nocivos",
                ],
            ),
            RightDefinition::new(
                "hazard_premium",
                "Adicional devido ao empregado que exerce atividades perigosas, com contato permanente com risco de morte.",
                &["Art. 193 CLT", "NR-16", "Súmula 364 TST"],
                &[
                    "periculosidade",
                    "adicional de periculosidade",
                    "trabalho perigoso",
                    "atividade perigosa",
                    "condições perigosas",
                    "risco de vida",
                    "inflamáveis",
                    "explosivos",
                    "eletricidade",
                ],
            ),
            RightDefinition::new(
                "transportation_voucher",
                "Benefício para custear o deslocamento do empregado entre residência e trabalho.",
                &["Lei 7.418/85", "Decreto 95.247/87"],
                &[
                    "vale transporte",
                    "vale-transporte",
                    "auxílio transporte",
                    "auxílio-transporte",
                    "benefício transporte",
                    "custo de deslocamento",
                ],
            ),
            RightDefinition::new(
                "meal_voucher",
                "Benefício para a aquisição de alimentos, in natura ou refeições prontas.",
                &["Lei 6.321/76", "Art. 458 CLT"],
                &[
                    "vale alimentação",
                    "vale-alimentação",
                    "vale refeição",
                    "vale-refeição",
                    "auxílio alimentação",
                    "auxílio-alimentação",
                    "ticket alimentação",
                    "tíquete alimentação",
                    "benefício alimentação",
                    "cestas básicas",
                    "programa de alimentação do trabalhador",
                ],
            ),
            RightDefinition::new(
                "salary_equalization",
                "Direito de empregados com as mesmas funções, para o mesmo empregador e na mesma localidade, receberem salários idênticos.",
                &["Art. 461 CLT", "Art. 7º, XXX CF", "Súmula 6 TST"],
                &[
                    "equiparação salarial",
                    "isonomia salarial",
                    "igualdade salarial",
                    "mesmo salário",
                    "paridade salarial",
                    "trabalho igual salário igual",
                    "paradigma",
                    "identidade de funções",
                ],
            ),
            RightDefinition::new(
                "thirteenth_salary",
                "Gratificação anual correspondente a 1/12 da remuneração por mês de serviço.",
                &["Lei 4.090/62", "Lei 4.749/65", "Art. 7º, VIII CF"],
                &[
                    "décimo terceiro",
                    "13º salário",
                    "gratificação natalina",
                    "gratificação de natal",
                ],
            ),
            RightDefinition::new(
                "vacation_pay",
                "Período de descanso remunerado concedido após cada período aquisitivo de 12 meses.",
                &["Art. 129-153 CLT", "Art. 7º, XVII CF", "Súmula 81 TST", "Súmula 450 TST"],
                &[
                    "férias",
                    "descanso anual",
                    "período aquisitivo",
                    "período concessivo",
                    "abono pecuniário",
                ],
            ),
            RightDefinition::new(
                "notice_period",
                "Comunicação antecipada da rescisão do contrato de trabalho, com prazo mínimo legal.",
                &["Art. 487-491 CLT", "Art. 7º, XXI CF", "Lei 12.506/2011"],
                &[
                    "aviso prévio",
                    "pré-aviso",
                    "aviso-prévio",
                    "aviso de dispensa",
                    "antecedência da dispensa",
                    "redução de jornada no aviso",
                    "dispensa sem justa causa",
                ],
            ),
            RightDefinition::new(
                "severance_fund",
                "Fundo de proteção ao trabalhador dispensado sem justa causa, formado por depósitos mensais do empregador.",
                &["Lei 8.036/90", "Art. 7º, III CF"],
                &[
                    "FGTS",
                    "Fundo de Garantia",
                    "fundo garantia tempo serviço",
                    "código de saque",
                    "chave de conectividade",
                ],
            ),
            RightDefinition::new(
                "employment_stability",
                "Direito de permanecer no emprego por determinado período, vedada a dispensa arbitrária.",
                &[
                    "Art. 10, II ADCT",
                    "Art. 118 Lei 8.213/91",
                    "Art. 165 CLT",
                    "Art. 7º, I CF",
                ],
                &[
                    "estabilidade",
                    "garantia no emprego",
                    "proteção contra despedida",
                    "reintegração",
                    "readmissão",
                    "gestante",
                    "acidente de trabalho",
                    "cipeiro",
                    "dirigente sindical",
                ],
            ),
            RightDefinition::new(
                "moral_damages",
                "Compensação por lesão a direitos da personalidade do empregado, como honra, imagem ou dignidade.",
                &["Art. 5º, V e X CF", "Art. 927 CC", "Art. 223-A a 223-G CLT"],
                &[
                    "danos morais",
                    "dano moral",
                    "indenização moral",
                    "reparação moral",
                    "compensação moral",
                    "lesão moral",
                    "ofensa moral",
                    "constrangimento",
                    "humilhação",
                    "atingimento à honra",
                ],
            ),
            RightDefinition::new(
                "indirect_termination",
                "Rescisão do contrato pelo empregado em razão de falta grave cometida pelo empregador.",
                &["Art. 483 CLT"],
                &[
                    "rescisão indireta",
                    "justa causa do empregador",
                    "dispensa indireta",
                    "falta grave do empregador",
                    "salários atrasados",
                ],
            ),
            RightDefinition::new(
                "family_allowance",
                "Benefício pago ao trabalhador de baixa renda com filhos menores de 14 anos ou inválidos.",
                &["Lei 8.213/91", "Art. 7º, XII CF", "Decreto 3.048/99"],
                &["salário família", "salário-família", "abono família", "auxílio família"],
            ),
            RightDefinition::new(
                "material_damages",
                "Prejuízo financeiro sofrido ou lucro que se deixou de obter por ato ilícito ou descumprimento contratual.",
                &["Art. 402 CC"],
                &[
                    "dano material",
                    "danos materiais",
                    "prejuízo financeiro",
                    "lucros cessantes",
                    "danos emergentes",
                    "despesas médicas",
                    "perdas e danos",
                ],
            ),
            RightDefinition::new(
                "moral_harassment",
                "Exposição do trabalhador a situações humilhantes e constrangedoras, repetitivas e prolongadas.",
                &["Art. 1º, III e IV CF", "Art. 483 CLT"],
                &[
                    "assédio moral",
                    "violência psicológica no trabalho",
                    "pressão psicológica",
                    "ambiente hostil",
                ],
            ),
        ];

        Self { definitions }
    }

    pub fn definitions(&self) -> &[RightDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&RightDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for RightsVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Outcome Attribution
// ============================================================================

/// Indicator tables checked in priority order: granted, denied, partial
#[derive(Debug, Clone)]
struct OutcomeIndicators {
    granted: Vec<Regex>,
    denied: Vec<Regex>,
    partial: Vec<Regex>,
    legal_terms: Option<Regex>,
}

const GRANTED_INDICATORS: &[&str] = &[
    r"\b(?:procedente|acolho|defiro|concedo|reconheço|confirmo|homologo)\b",
    r"julgo(?:\s+totalmente)?\s+procedente",
    r"faz jus|tem direito|é devido|deve ser pago|cabe ao reclamante",
    r"\bcondeno\b|deverá pagar|fica obrigad[oa]|arcará com",
    r"determino o pagamento de|determino a \w+ do reclamante",
    r"reconheço o vínculo empregatício|declaro a rescisão indireta",
    r"dou provimento ao recurso",
];

const DENIED_INDICATORS: &[&str] = &[
    r"\b(?:improcedente|rejeito|indefiro|nego)\b|não reconheço|declaro a improcedência",
    r"julgo(?:\s+totalmente)?\s+improcedente",
    r"\babsolvo\b|não procede",
    r"não faz jus|não tem direito|não é devido|\bincabível\b",
    r"não comprovou|ausência de prova|ônus da prova não desincumbido",
    r"\binviável\b|\bdescabido\b|não há elementos",
    r"nego provimento ao recurso",
    r"mantenho a sentença",
];

const PARTIAL_INDICATORS: &[&str] = &[
    r"parcialmente procedente|em parte procedente|em parte acolho|em parte defiro",
    r"acolho\s+em\s+parte|defiro\s+em\s+parte",
    r"dou parcial provimento ao recurso",
    r"rejeito alguns pedidos e acolho outros",
];

const GRANTED_FALLBACK: &[&str] = &["condeno", "pagar", "devido", "procedente"];
const DENIED_FALLBACK: &[&str] = &["improcedente", "não devido", "rejeito"];

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(&format!("(?i){pattern}")) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "skipping outcome indicator");
                None
            }
        })
        .collect()
}

impl OutcomeIndicators {
    fn new() -> Self {
        Self {
            granted: compile_all(GRANTED_INDICATORS),
            denied: compile_all(DENIED_INDICATORS),
            partial: compile_all(PARTIAL_INDICATORS),
            legal_terms: Regex::new(r"(?i)\b(?:art|artigo|clt|lei|decreto|súmula)\b").ok(),
        }
    }

    /// First matching category wins; the fallback keyword check only runs
    /// when no indicator matched at all.
    fn attribute(&self, context: &str) -> RightOutcome {
        if context.is_empty() {
            return RightOutcome::Unknown;
        }

        let any = |table: &[Regex]| table.iter().any(|regex| regex.is_match(context));
        if any(&self.granted) {
            return RightOutcome::Granted;
        }
        if any(&self.denied) {
            return RightOutcome::Denied;
        }
        if any(&self.partial) {
            return RightOutcome::PartiallyGranted;
        }

        let folded = context.to_lowercase();
        if GRANTED_FALLBACK.iter().any(|word| folded.contains(word)) {
            RightOutcome::Granted
        } else if DENIED_FALLBACK.iter().any(|word| folded.contains(word)) {
            RightOutcome::Denied
        } else {
            RightOutcome::Unknown
        }
    }

    fn has_legal_terms(&self, context: &str) -> bool {
        self.legal_terms
            .as_ref()
            .map(|regex| regex.is_match(context))
            .unwrap_or(false)
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Identifies worker rights and attributes their outcomes
#[derive(Debug, Clone)]
pub struct WorkerRightAnalyzer {
    vocabulary: RightsVocabulary,
    indicators: OutcomeIndicators,
    citations: Vec<Regex>,
}

impl WorkerRightAnalyzer {
    pub fn new() -> Self {
        Self::with_vocabulary(RightsVocabulary::standard())
    }

    pub fn with_vocabulary(vocabulary: RightsVocabulary) -> Self {
        Self {
            vocabulary,
            indicators: OutcomeIndicators::new(),
            citations: compile_all(CITATION_PATTERNS),
        }
    }

    pub fn vocabulary(&self) -> &RightsVocabulary {
        &self.vocabulary
    }

    /// Rights with at least one keyword mention, most confident first
    pub fn analyze(&self, text: &str) -> Vec<WorkerRight> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let spans = sentence_spans(text);
        let mut rights = Vec::new();

        for definition in &self.vocabulary.definitions {
            let mut mentions: Vec<String> = Vec::new();
            let mut mention_count = 0;
            let mut context_sentences: Vec<String> = Vec::new();

            for matcher in &definition.matchers {
                for mat in matcher.find_iter(text) {
                    mention_count += 1;
                    let literal = mat.as_str().to_string();
                    if !mentions.contains(&literal) {
                        mentions.push(literal);
                    }
                    if let Some(sentence) = containing_sentence(&spans, mat.start()) {
                        if !context_sentences.iter().any(|s| s == sentence) {
                            context_sentences.push(sentence.to_string());
                        }
                    }
                }
            }

            if mention_count == 0 {
                continue;
            }

            let context = context_sentences.join(" ");
            let decision_outcome = self.indicators.attribute(&context);
            let confidence = self.confidence(mention_count, &mentions, &context_sentences, &context);

            rights.push(WorkerRight {
                right_type: definition.id.to_string(),
                description: definition.description.to_string(),
                mentions,
                mention_count,
                context_sentences,
                legal_basis: definition.legal_basis.iter().map(|s| s.to_string()).collect(),
                decision_outcome,
                confidence,
            });
        }

        rights.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        tracing::debug!(
            rights = rights.len(),
            granted = rights.iter().filter(|r| r.decision_outcome == RightOutcome::Granted).count(),
            denied = rights.iter().filter(|r| r.decision_outcome == RightOutcome::Denied).count(),
            "worker rights analyzed"
        );
        rights
    }

    fn confidence(
        &self,
        mention_count: usize,
        mentions: &[String],
        context_sentences: &[String],
        context: &str,
    ) -> f64 {
        let mut confidence = (mention_count as f64 * 0.2).min(0.6);

        if !context_sentences.is_empty() {
            let total_words: usize = context_sentences.iter().map(|s| word_count(s)).sum();
            let average = total_words as f64 / context_sentences.len() as f64;
            if average > 10.0 {
                confidence += 0.2;
            }
        }

        let mut distinct: Vec<String> = mentions.iter().map(|m| m.to_lowercase()).collect();
        distinct.sort();
        distinct.dedup();
        if distinct.len() > 1 {
            confidence += 0.1;
        }

        if self.indicators.has_legal_terms(context) {
            confidence += 0.1;
        }

        confidence.min(1.0)
    }

    /// Citations found in each right's context sentences, keyed by right type
    pub fn extract_legal_basis(&self, rights: &[WorkerRight]) -> BTreeMap<String, Vec<String>> {
        let mut references = BTreeMap::new();

        for right in rights {
            let mut found: Vec<String> = right
                .context_sentences
                .iter()
                .flat_map(|sentence| {
                    self.citations
                        .iter()
                        .flat_map(move |regex| regex.find_iter(sentence).map(|m| m.as_str().trim().to_string()))
                })
                .collect();
            found.sort();
            found.dedup();

            if !found.is_empty() {
                references.insert(right.right_type.clone(), found);
            }
        }

        references
    }
}

impl Default for WorkerRightAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

const CITATION_PATTERNS: &[&str] = &[
    r"art\.?\s*\d+[º°]?(?:\s*,\s*§\s*\d+[º°]?)?(?:\s*(?:da\s+CLT|do\s+CC|da\s+CF))?",
    r"artigo\s+\d+[º°]?(?:\s*,\s*parágrafo\s*\d+[º°]?)?",
    r"Lei\s+n?[º°]?\s*\d+[.,/]\d+(?:/\d+)?",
    r"Decreto\s+n?[º°]?\s*\d+[.,/]\d+(?:/\d+)?",
    r"Súmula\s+n?[º°]?\s*\d+",
    r"Orientação\s+Jurisprudencial\s+n?[º°]?\s*\d+|\bOJ\s+\d+",
    r"Precedente\s+Normativo\s+n?[º°]?\s*\d+",
];

// ============================================================================
// Summary, Export and Report
// ============================================================================

/// Entry of the most confident rights list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRight {
    #[serde(rename = "type")]
    pub right_type: String,
    pub description: String,
    pub confidence: f64,
    pub outcome: RightOutcome,
    pub mention_count: usize,
}

/// Aggregate view of one document's rights analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RightsSummary {
    pub total_rights_identified: usize,
    pub average_confidence: f64,
    pub outcome_distribution: BTreeMap<String, usize>,
    pub rights_distribution: BTreeMap<String, usize>,
    pub rights_by_outcome: BTreeMap<String, Vec<String>>,
    pub top_confident_rights: Vec<TopRight>,
}

impl RightsSummary {
    pub fn from_rights(rights: &[WorkerRight]) -> Self {
        if rights.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            total_rights_identified: rights.len(),
            ..Self::default()
        };

        let total: f64 = rights.iter().map(|r| r.confidence).sum();
        summary.average_confidence = round_to(total / rights.len() as f64, 2);

        for right in rights {
            let outcome = right.decision_outcome.as_str().to_string();
            *summary.outcome_distribution.entry(outcome.clone()).or_insert(0) += 1;
            *summary
                .rights_distribution
                .entry(right.right_type.clone())
                .or_insert(0) += 1;
            summary
                .rights_by_outcome
                .entry(outcome)
                .or_default()
                .push(right.description.clone());
        }

        let mut ranked: Vec<&WorkerRight> = rights.iter().collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        summary.top_confident_rights = ranked
            .into_iter()
            .take(5)
            .map(|r| TopRight {
                right_type: r.right_type.clone(),
                description: r.description.clone(),
                confidence: round_to(r.confidence, 2),
                outcome: r.decision_outcome,
                mention_count: r.mention_count,
            })
            .collect();

        summary
    }

    pub fn count(&self, outcome: RightOutcome) -> usize {
        self.outcome_distribution
            .get(outcome.as_str())
            .copied()
            .unwrap_or(0)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Serialize)]
struct RightExport<'a> {
    #[serde(rename = "type")]
    right_type: &'a str,
    description: &'a str,
    mentions: &'a [String],
    context_sentences: &'a [String],
    decision_outcome: RightOutcome,
    confidence: f64,
}

/// Pretty JSON in the record shape accepted by the rights scoring method
pub fn rights_to_json(rights: &[WorkerRight]) -> Result<String> {
    let export: Vec<RightExport<'_>> = rights
        .iter()
        .map(|r| RightExport {
            right_type: &r.right_type,
            description: &r.description,
            mentions: &r.mentions,
            context_sentences: &r.context_sentences,
            decision_outcome: r.decision_outcome,
            confidence: round_to(r.confidence, 2),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Records for the rights scoring method of the outcome classifier
pub fn to_outcome_records(rights: &[WorkerRight]) -> Vec<RightOutcomeRecord> {
    rights.iter().map(RightOutcomeRecord::from).collect()
}

fn outcome_heading(outcome: RightOutcome) -> &'static str {
    match outcome {
        RightOutcome::Granted => "DIREITOS DEFERIDOS",
        RightOutcome::Denied => "DIREITOS INDEFERIDOS",
        RightOutcome::PartiallyGranted => "DIREITOS PARCIALMENTE DEFERIDOS",
        RightOutcome::Unknown => "DIREITOS SEM DECISÃO CLARA",
    }
}

/// Plain-text report grouped by outcome
pub fn create_rights_report(rights: &[WorkerRight]) -> String {
    if rights.is_empty() {
        return "Nenhum direito trabalhista identificado.".to_string();
    }

    let mut lines = vec![
        "RELATÓRIO DE DIREITOS TRABALHISTAS IDENTIFICADOS".to_string(),
        "=".repeat(50),
    ];

    for outcome in [
        RightOutcome::Granted,
        RightOutcome::Denied,
        RightOutcome::PartiallyGranted,
        RightOutcome::Unknown,
    ] {
        let mut group: Vec<&WorkerRight> = rights
            .iter()
            .filter(|r| r.decision_outcome == outcome)
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        lines.push(String::new());
        lines.push(outcome_heading(outcome).to_string());
        lines.push("-".repeat(30));

        for right in group {
            lines.push(format!("• {}", right.description));
            lines.push(format!("  Confiança: {:.1}%", right.confidence * 100.0));
            lines.push(format!("  Menções: {}", right.mention_count));
            if !right.mentions.is_empty() {
                let mut terms = right
                    .mentions
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                if right.mentions.len() > 3 {
                    terms.push_str(&format!(" (+{} outras)", right.mentions.len() - 3));
                }
                lines.push(format!("  Termos: {terms}"));
            }
        }
    }

    let summary = RightsSummary::from_rights(rights);
    let average: f64 = rights.iter().map(|r| r.confidence).sum::<f64>() / rights.len() as f64;

    lines.push(String::new());
    lines.push("ESTATÍSTICAS".to_string());
    lines.push("-".repeat(20));
    lines.push(format!("Total de direitos identificados: {}", rights.len()));
    lines.push(format!("Confiança média: {:.1}%", average * 100.0));

    let granted = summary.count(RightOutcome::Granted);
    let denied = summary.count(RightOutcome::Denied);
    if granted > 0 {
        lines.push(format!("Direitos deferidos: {granted}"));
    }
    if denied > 0 {
        lines.push(format!("Direitos indeferidos: {denied}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(rights: &'a [WorkerRight], id: &str) -> &'a WorkerRight {
        rights
            .iter()
            .find(|r| r.right_type == id)
            .unwrap_or_else(|| panic!("right {id} not found"))
    }

    #[test]
    fn test_single_granted_right() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Defiro o pedido de horas extras.");

        assert_eq!(rights.len(), 1);
        let overtime = &rights[0];
        assert_eq!(overtime.right_type, "overtime");
        assert_eq!(overtime.decision_outcome, RightOutcome::Granted);
        assert_eq!(overtime.mentions, vec!["horas extras"]);
        assert_eq!(overtime.mention_count, 1);
        assert_eq!(overtime.context_sentences, vec!["Defiro o pedido de horas extras"]);
        assert!((overtime.confidence - 0.2).abs() < 1e-9);
        assert!(!overtime.legal_basis.is_empty());
    }

    #[test]
    fn test_empty_text_yields_no_rights() {
        let analyzer = WorkerRightAnalyzer::new();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("   ").is_empty());
    }

    #[test]
    fn test_denied_right_does_not_hit_granted_indicator() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Julgo improcedente o pedido de adicional noturno.");
        assert_eq!(
            find(&rights, "night_shift_premium").decision_outcome,
            RightOutcome::Denied
        );
    }

    #[test]
    fn test_partial_wording_resolves_to_granted_first() {
        // "procedente" is a granted indicator and is checked first
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Julgo parcialmente procedente o pedido de férias.");
        assert_eq!(
            find(&rights, "vacation_pay").decision_outcome,
            RightOutcome::Granted
        );
    }

    #[test]
    fn test_partial_indicator_without_granted_wording() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Quanto ao vale-transporte, dou parcial provimento ao recurso.");
        assert_eq!(
            find(&rights, "transportation_voucher").decision_outcome,
            RightOutcome::PartiallyGranted
        );
    }

    #[test]
    fn test_unknown_outcome_without_indicators() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("O reclamante menciona o FGTS na inicial.");
        assert_eq!(
            find(&rights, "severance_fund").decision_outcome,
            RightOutcome::Unknown
        );
    }

    #[test]
    fn test_confidence_components_and_ordering() {
        let analyzer = WorkerRightAnalyzer::new();
        let text = "Nos termos do art. 59 da CLT, condeno a reclamada ao pagamento de horas extras \
                    e reflexos, pois a sobrejornada habitual restou comprovada pelos cartões de ponto. \
                    Indefiro o pedido de danos morais.";
        let rights = analyzer.analyze(text);

        let overtime = find(&rights, "overtime");
        // 2 mentions (0.4) + long sentence (0.2) + distinct mentions (0.1) + legal term (0.1)
        assert!((overtime.confidence - 0.8).abs() < 1e-9);
        assert_eq!(overtime.decision_outcome, RightOutcome::Granted);

        let moral = find(&rights, "moral_damages");
        assert_eq!(moral.decision_outcome, RightOutcome::Denied);

        assert_eq!(rights[0].right_type, "overtime");
        for pair in rights.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_mentions_are_case_insensitive_and_counted() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("FGTS não depositado. O fgts deve ser recolhido. FGTS.");
        let fund = find(&rights, "severance_fund");
        assert_eq!(fund.mention_count, 3);
        assert_eq!(fund.mentions, vec!["FGTS", "fgts"]);
        assert_eq!(fund.context_sentences.len(), 3);
    }

    #[test]
    fn test_extract_legal_basis() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze(
            "Defiro horas extras com base no art. 59 da CLT e na Súmula 340 do TST.",
        );
        let basis = analyzer.extract_legal_basis(&rights);
        let overtime = &basis["overtime"];
        assert!(overtime.iter().any(|c| c.starts_with("art. 59")));
        assert!(overtime.iter().any(|c| c == "Súmula 340"));
    }

    #[test]
    fn test_summary_and_records() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze(
            "Defiro o pedido de horas extras. Julgo improcedente o pedido de aviso prévio.",
        );
        let summary = RightsSummary::from_rights(&rights);

        assert_eq!(summary.total_rights_identified, 2);
        assert_eq!(summary.count(RightOutcome::Granted), 1);
        assert_eq!(summary.count(RightOutcome::Denied), 1);
        assert_eq!(summary.top_confident_rights.len(), 2);

        let records = to_outcome_records(&rights);
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .any(|r| r.decision_outcome.as_deref() == Some("granted")));
        assert_eq!(RightsSummary::from_rights(&[]), RightsSummary::default());
    }

    #[test]
    fn test_rights_json_is_accepted_as_records() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Defiro o pedido de horas extras.");
        let json = rights_to_json(&rights).unwrap();
        let records: Vec<RightOutcomeRecord> = serde_json::from_str(&json).unwrap();

        assert_eq!(records[0].right_type, "overtime");
        assert_eq!(records[0].decision_outcome.as_deref(), Some("granted"));
        assert_eq!(records[0].confidence, Some(0.2));
    }

    #[test]
    fn test_report_groups_by_outcome() {
        let analyzer = WorkerRightAnalyzer::new();
        let rights = analyzer.analyze("Defiro o pedido de horas extras.");
        let report = create_rights_report(&rights);

        assert!(report.contains("DIREITOS DEFERIDOS"));
        assert!(report.contains("Confiança: 20.0%"));
        assert!(report.contains("Direitos deferidos: 1"));
        assert_eq!(create_rights_report(&[]), "Nenhum direito trabalhista identificado.");
    }
}
