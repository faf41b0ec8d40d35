//! Heuristic text-quality scoring
//!
//! Starts from 1.0 and deducts for signs of badly extracted text (residual
//! markup, encoded blobs, symbol noise, missing sentence structure), with a
//! small bonus for legal and labor vocabulary.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use decisio_core::{TextQuality, TextQualityScorer};
use decisio_extractor::text::word_count;

static HTML_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]+>").ok());

const CSS_INDICATORS: &[&str] = &["font-family", "background-color", "text-align", "@media"];

const LEGAL_TERMS: &[&str] = &[
    "clt", "cf", "cpc", "tst", "trt", "stf", "stj", "oj", "súmula", "art", "artigo", "lei",
    "decreto", "processo", "autos", "sentença", "acórdão", "recurso", "embargos", "agravo",
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
    "aviso prévio",
    "décimo terceiro",
    "insalubridade",
    "periculosidade",
    "jornada",
    "vínculo",
];

const KEPT_PUNCTUATION: &str = ".,;:!?()[]{}\"'-“”‘’";

/// Deductions and bonuses applied by the scorer
mod weights {
    pub const SHORT_TEXT: f64 = 0.3;
    pub const HTML: f64 = 0.4;
    pub const BASE64: f64 = 0.5;
    pub const CSS: f64 = 0.3;
    pub const SPECIAL_CHARS: f64 = 0.2;
    pub const LONG_WORDS: f64 = 0.2;
    pub const CODE_WORDS: f64 = 0.3;
    pub const FEW_SENTENCES: f64 = 0.2;
    pub const NO_TERMS: f64 = 0.2;
    pub const LOW_USEFUL_RATIO: f64 = 0.3;
    pub const TERM_BONUS: f64 = 0.1;
}

/// Default [`TextQualityScorer`]
#[derive(Debug, Clone)]
pub struct HeuristicQualityScorer {
    min_chars: usize,
    min_sentences: usize,
}

impl HeuristicQualityScorer {
    pub fn new() -> Self {
        Self {
            min_chars: 100,
            min_sentences: 3,
        }
    }
}

impl Default for HeuristicQualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn count_terms(lowercase: &str, words: &HashSet<&str>, terms: &[&str]) -> usize {
    terms
        .iter()
        .filter(|term| {
            if term.contains(' ') {
                lowercase.contains(*term)
            } else {
                words.contains(*term)
            }
        })
        .count()
}

impl TextQualityScorer for HeuristicQualityScorer {
    fn assess(&self, text: &str) -> TextQuality {
        if text.trim().is_empty() {
            return TextQuality {
                issues: vec!["empty_text".to_string()],
                ..Default::default()
            };
        }

        let mut issues = Vec::new();
        let mut score = 1.0;
        let mut deduct = |issue: &str, amount: f64, score: &mut f64| {
            issues.push(issue.to_string());
            *score -= amount;
        };

        let total_chars = text.chars().count();
        if total_chars < self.min_chars {
            deduct("text_too_short", weights::SHORT_TEXT, &mut score);
        }

        if HTML_TAG.as_ref().map(|re| re.is_match(text)).unwrap_or(false) {
            deduct("html_tags_remaining", weights::HTML, &mut score);
        }

        if text.contains("base64,") {
            deduct("base64_data_remaining", weights::BASE64, &mut score);
        }

        let lowercase = text.to_lowercase();
        if CSS_INDICATORS.iter().any(|css| lowercase.contains(css)) {
            deduct("css_remnants", weights::CSS, &mut score);
        }

        let special = text
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && c != &'_' && !KEPT_PUNCTUATION.contains(*c))
            .count();
        let special_char_ratio = special as f64 / total_chars as f64;
        if special_char_ratio > 0.3 {
            deduct("too_many_special_chars", weights::SPECIAL_CHARS, &mut score);
        }

        let raw_words: Vec<&str> = text.split_whitespace().collect();
        if !raw_words.is_empty() {
            let average_len =
                raw_words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / raw_words.len() as f64;
            if average_len > 15.0 {
                deduct("words_too_long", weights::LONG_WORDS, &mut score);
            }

            let code_words = raw_words
                .iter()
                .filter(|w| w.chars().count() > 20 && !w.chars().any(char::is_alphabetic))
                .count();
            if code_words as f64 > raw_words.len() as f64 * 0.1 {
                deduct("too_many_code_words", weights::CODE_WORDS, &mut score);
            }
        }

        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| s.trim().chars().count() > 10)
            .count();
        if sentence_count < self.min_sentences {
            deduct("too_few_sentences", weights::FEW_SENTENCES, &mut score);
        }

        let words: HashSet<&str> = lowercase
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let legal_terms_found = count_terms(&lowercase, &words, LEGAL_TERMS);
        let worker_terms_found = count_terms(&lowercase, &words, WORKER_TERMS);
        if legal_terms_found > 0 {
            score += weights::TERM_BONUS;
        }
        if worker_terms_found > 0 {
            score += weights::TERM_BONUS;
        }
        if legal_terms_found == 0 && worker_terms_found == 0 {
            deduct("no_legal_terms", weights::NO_TERMS, &mut score);
        }

        let useful = text
            .chars()
            .filter(|c| c.is_alphabetic() || c.is_whitespace() || KEPT_PUNCTUATION.contains(*c))
            .count();
        let useful_text_ratio = useful as f64 / total_chars as f64;
        if useful_text_ratio < 0.7 {
            deduct("low_useful_text_ratio", weights::LOW_USEFUL_RATIO, &mut score);
        }

        let quality_score = f64::clamp(score, 0.0, 1.0);
        tracing::debug!(quality_score, issues = ?issues, "text quality assessed");

        TextQuality {
            quality_score,
            issues,
            word_count: word_count(text),
            sentence_count,
            legal_terms_found,
            worker_terms_found,
            special_char_ratio,
            useful_text_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULING: &str = "Trata-se de reclamação trabalhista ajuizada pelo reclamante contra a empresa. \
        O autor alega que cumpria jornada excessiva sem o pagamento de horas extras. \
        Nos termos do artigo 59 da CLT, julgo procedente o pedido e condeno a ré ao pagamento. \
        Defiro também as férias vencidas acrescidas do terço constitucional.";

    #[test]
    fn test_clean_ruling_scores_high() {
        let quality = HeuristicQualityScorer::new().assess(RULING);
        assert_eq!(quality.quality_score, 1.0);
        assert!(quality.issues.is_empty(), "{:?}", quality.issues);
        assert!(quality.legal_terms_found >= 2);
        assert!(quality.worker_terms_found >= 2);
        assert_eq!(quality.sentence_count, 4);
    }

    #[test]
    fn test_empty_text() {
        let quality = HeuristicQualityScorer::new().assess("   ");
        assert_eq!(quality.quality_score, 0.0);
        assert_eq!(quality.issues, vec!["empty_text"]);
    }

    #[test]
    fn test_residual_markup_is_penalised() {
        let text = format!("<div style=\"font-family: Arial\">{RULING}</div>");
        let quality = HeuristicQualityScorer::new().assess(&text);
        assert!(quality.issues.contains(&"html_tags_remaining".to_string()));
        assert!(quality.issues.contains(&"css_remnants".to_string()));
        // 1.0 - 0.4 - 0.3 + 0.1 + 0.1
        assert!((quality.quality_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_text_without_terms() {
        let quality = HeuristicQualityScorer::new().assess("Texto curto qualquer.");
        assert!(quality.issues.contains(&"text_too_short".to_string()));
        assert!(quality.issues.contains(&"too_few_sentences".to_string()));
        assert!(quality.issues.contains(&"no_legal_terms".to_string()));
        assert!((quality.quality_score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_noise() {
        let noise = "1234567890123456789012345 ".repeat(20);
        let quality = HeuristicQualityScorer::new().assess(&noise);
        assert!(quality.issues.contains(&"too_many_code_words".to_string()));
        assert!(quality.issues.contains(&"low_useful_text_ratio".to_string()));
        assert_eq!(quality.quality_score, 0.0);
    }
}
