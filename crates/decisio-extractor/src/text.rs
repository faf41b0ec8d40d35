//! Text helpers shared by the analyzers
//!
//! All offsets are byte offsets into the original text and always land on
//! UTF-8 character boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BREAK: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").ok());

/// A sentence located in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan<'a> {
    /// Sentence text, trimmed, without its terminating punctuation
    pub text: &'a str,
    /// Start of the segment, including leading whitespace
    pub start: usize,
    /// End of the segment, including the punctuation that closed it
    pub end: usize,
}

impl SentenceSpan<'_> {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Split text into sentences on runs of `.`, `!` or `?` followed by
/// whitespace or the end of the text. Decimal separators such as the one
/// in `5.000,00` do not break a sentence.
pub fn sentence_spans(text: &str) -> Vec<SentenceSpan<'_>> {
    let mut spans = Vec::new();
    let mut segment_start = 0;

    let mut push = |start: usize, body_end: usize, end: usize| {
        let body = text[start..body_end].trim();
        if !body.is_empty() {
            spans.push(SentenceSpan {
                text: body,
                start,
                end,
            });
        }
    };

    if let Some(breaker) = SENTENCE_BREAK.as_ref() {
        for mat in breaker.find_iter(text) {
            if mat.as_str().trim() == "." && ends_with_abbreviation(&text[segment_start..mat.start()]) {
                continue;
            }
            push(segment_start, mat.start(), mat.end());
            segment_start = mat.end();
        }
    }
    if segment_start < text.len() {
        push(segment_start, text.len(), text.len());
    }

    spans
}

/// Abbreviations whose period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "art", "arts", "inc", "fl", "fls", "n", "nº", "sr", "sra", "dr", "dra", "exmo", "exma", "pág",
];

fn ends_with_abbreviation(segment: &str) -> bool {
    segment
        .split_whitespace()
        .last()
        .map(|word| ABBREVIATIONS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sentence texts only
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text).into_iter().map(|s| s.text).collect()
}

/// Find the sentence whose segment contains the offset
pub fn containing_sentence<'a>(spans: &[SentenceSpan<'a>], offset: usize) -> Option<&'a str> {
    spans.iter().find(|s| s.contains(offset)).map(|s| s.text)
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Byte offset `chars` characters before `offset`, clamped at 0
pub fn back_chars(text: &str, offset: usize, chars: usize) -> usize {
    if chars == 0 {
        return offset;
    }
    text[..offset]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `chars` characters after `offset`, clamped at the end
pub fn forward_chars(text: &str, offset: usize, chars: usize) -> usize {
    text[offset..]
        .char_indices()
        .nth(chars)
        .map(|(i, _)| offset + i)
        .unwrap_or(text.len())
}

/// Excerpt around a match: `before` characters ahead of `start` and
/// `after` characters past `end`
pub fn char_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let from = back_chars(text, start, before);
    let to = forward_chars(text, end, after);
    &text[from..to]
}

/// At most `max` leading characters
pub fn prefix_chars(text: &str, max: usize) -> &str {
    &text[..forward_chars(text, 0, max)]
}

/// Truncate to at most `max_bytes`, backing off to a character boundary
pub fn truncate_at_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    &text[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_spans_keep_decimal_values() {
        let text = "Julgo procedente o pedido. Condeno a ré ao pagamento de R$ 5.000,00.";
        let sentences = split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "Julgo procedente o pedido",
                "Condeno a ré ao pagamento de R$ 5.000,00"
            ]
        );
    }

    #[test]
    fn test_abbreviations_do_not_break_sentences() {
        let text = "Nos termos do art. 59 da CLT, defiro. Fls. 20 dos autos.";
        assert_eq!(
            split_sentences(text),
            vec!["Nos termos do art. 59 da CLT, defiro", "Fls. 20 dos autos"]
        );
    }

    #[test]
    fn test_containing_sentence() {
        let text = "Primeira frase aqui. Segunda frase com horas extras! Terceira?";
        let spans = sentence_spans(text);
        let offset = text.find("horas").unwrap();
        assert_eq!(
            containing_sentence(&spans, offset),
            Some("Segunda frase com horas extras")
        );
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn test_trailing_text_without_punctuation() {
        assert_eq!(split_sentences("sem ponto final"), vec!["sem ponto final"]);
        assert!(split_sentences("  ").is_empty());
    }

    #[test]
    fn test_char_window_respects_boundaries() {
        let text = "ação é devida já";
        let start = text.find("devida").unwrap();
        let end = start + "devida".len();
        assert_eq!(char_window(text, start, end, 2, 3), "é devida já");
        assert_eq!(char_window(text, start, end, 100, 200), text);
    }

    #[test]
    fn test_prefix_and_truncate() {
        assert_eq!(prefix_chars("sentença", 6), "senten");
        assert_eq!(prefix_chars("abc", 10), "abc");
        // 'ç' spans bytes 6..8
        assert_eq!(truncate_at_boundary("sentença", 7), "senten");
    }
}
