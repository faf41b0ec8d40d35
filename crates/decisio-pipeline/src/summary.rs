//! Extractive summarization by legal importance
//!
//! Sentences are scored for decision wording, legal and labor vocabulary,
//! monetary values and statute citations. The best ones are kept in their
//! original order.

use once_cell::sync::Lazy;
use regex::Regex;

use decisio_core::{DecisioError, Result, SummaryMetrics, SummaryResult, Summarizer};
use decisio_extractor::text::{split_sentences, word_count};

pub const LEGAL_IMPORTANCE: &str = "legal_importance";

const DECISION_KEYWORDS: &[&str] = &[
    "julgo",
    "decido",
    "determino",
    "condeno",
    "absolvo",
    "defiro",
    "indefiro",
    "acolho",
    "rejeito",
    "procedente",
    "improcedente",
    "parcialmente procedente",
];

const LEGAL_TERMS: &[&str] = &[
    "direito",
    "lei",
    "artigo",
    "código",
    "constituição",
    "jurisprudência",
    "precedente",
    "súmula",
    "acórdão",
];

const WORKER_TERMS: &[&str] = &[
    "salário",
    "horas extras",
    "férias",
    "fgts",
    "adicional",
    "indenização",
    "rescisão",
    "estabilidade",
    "equiparação",
];

static IMPORTANT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:julgo|decido|determino|condeno)",
        r"(?:procedente|improcedente)",
        r"(?:defiro|indefiro|acolho|rejeito)",
        r"(?:reconheço|não reconheço)",
        r"(?:faz jus|tem direito|é devido)",
        r"(?:valor de|quantia de|importância de)",
        r"(?:fundamentação|ementa|dispositivo)",
    ]
    .iter()
    .filter_map(|p| match Regex::new(p) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern = p, error = %e, "skipping importance pattern");
            None
        }
    })
    .collect()
});

static MONEY: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"R\$\s*\d+").ok());
static ARTICLE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"art\.?\s*\d+").ok());

/// Default [`Summarizer`]: keeps the most legally important sentences
#[derive(Debug, Clone)]
pub struct LegalImportanceSummarizer {
    min_chars: usize,
}

impl LegalImportanceSummarizer {
    pub fn new() -> Self {
        Self { min_chars: 100 }
    }

    /// Importance score of one sentence
    pub fn importance(sentence: &str) -> f64 {
        let lower = sentence.to_lowercase();
        let mut score = 0.0;

        score += DECISION_KEYWORDS.iter().filter(|k| lower.contains(*k)).count() as f64 * 1.0;
        score += LEGAL_TERMS.iter().filter(|k| lower.contains(*k)).count() as f64 * 0.5;
        score += WORKER_TERMS.iter().filter(|k| lower.contains(*k)).count() as f64 * 0.7;
        score += IMPORTANT_PATTERNS.iter().filter(|re| re.is_match(&lower)).count() as f64 * 0.8;

        if MONEY.as_ref().map(|re| re.is_match(sentence)).unwrap_or(false) {
            score += 0.6;
        }
        if ARTICLE.as_ref().map(|re| re.is_match(&lower)).unwrap_or(false) {
            score += 0.4;
        }
        score
    }
}

impl Default for LegalImportanceSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round3(part as f64 / whole as f64)
    }
}

impl Summarizer for LegalImportanceSummarizer {
    fn summarize(&self, text: &str, max_sentences: usize, method: &str) -> Result<SummaryResult> {
        if method != LEGAL_IMPORTANCE {
            return Err(DecisioError::Summarization(format!(
                "unknown summarization method '{method}'"
            )));
        }
        if text.trim().chars().count() < self.min_chars {
            return Ok(SummaryResult::empty("text too short to summarize"));
        }

        let sentences = split_sentences(text);
        let mut ranked: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(position, sentence)| (position, Self::importance(sentence)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(max_sentences);
        ranked.sort_by_key(|(position, _)| *position);

        let selected: Vec<String> = ranked
            .iter()
            .map(|(position, _)| sentences[*position].to_string())
            .collect();
        if selected.is_empty() {
            return Ok(SummaryResult::empty("no sentences selected"));
        }

        let summary = selected
            .iter()
            .map(|s| format!("{s}."))
            .collect::<Vec<_>>()
            .join(" ");

        let original_words = word_count(text);
        let summary_words = word_count(&summary);
        let metrics = SummaryMetrics {
            original_words,
            summary_words,
            original_sentences: sentences.len(),
            summary_sentences: selected.len(),
            compression_ratio: ratio(summary_words, original_words),
            sentence_ratio: ratio(selected.len(), sentences.len()),
        };

        tracing::debug!(
            sentences = selected.len(),
            compression_ratio = metrics.compression_ratio,
            "summary created"
        );

        Ok(SummaryResult {
            summary,
            sentence_count: selected.len(),
            sentences: selected,
            method: LEGAL_IMPORTANCE.to_string(),
            metrics,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULING: &str = "Trata-se de reclamação trabalhista distribuída em 2021. \
        As partes compareceram à audiência inaugural sem acordo. \
        Nos termos do art. 59 da CLT, o reclamante faz jus às horas extras. \
        O perito visitou o local de trabalho em março. \
        Julgo procedente o pedido e condeno a ré ao pagamento de R$ 5.000,00.";

    #[test]
    fn test_keeps_most_important_sentences_in_order() {
        let result = LegalImportanceSummarizer::new()
            .summarize(RULING, 2, LEGAL_IMPORTANCE)
            .unwrap();

        assert_eq!(result.sentence_count, 2);
        assert_eq!(
            result.sentences,
            vec![
                "Nos termos do art. 59 da CLT, o reclamante faz jus às horas extras",
                "Julgo procedente o pedido e condeno a ré ao pagamento de R$ 5.000,00",
            ]
        );
        assert_eq!(result.method, LEGAL_IMPORTANCE);
        assert_eq!(result.metrics.original_sentences, 5);
        assert_eq!(result.metrics.sentence_ratio, 0.4);
        assert!(result.metrics.compression_ratio > 0.0 && result.metrics.compression_ratio < 1.0);
        assert!(result.summary.ends_with("5.000,00."));
    }

    #[test]
    fn test_short_text_yields_empty_summary() {
        let result = LegalImportanceSummarizer::new()
            .summarize("Julgo procedente.", 10, LEGAL_IMPORTANCE)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.method, "none");
        assert!(result.error.is_some());
    }

    #[test]
    fn test_unknown_method_is_an_error() {
        let err = LegalImportanceSummarizer::new()
            .summarize(RULING, 3, "textrank")
            .unwrap_err();
        assert!(matches!(err, DecisioError::Summarization(_)));
    }

    #[test]
    fn test_importance_weights() {
        assert_eq!(LegalImportanceSummarizer::importance("O perito visitou o local."), 0.0);
        // "defiro" keyword and pattern, "férias" worker term
        let score = LegalImportanceSummarizer::importance("Defiro as férias.");
        assert!((score - 2.5).abs() < 1e-9);
    }
}
