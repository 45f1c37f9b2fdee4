//! # Jargon Span Matcher
//!
//! Finds every occurrence of known lexicon terms in free text and reports
//! where they are, in characters, in the original string.
//!
//! ## Algorithm
//!
//! 1. Tokenize the text ([`crate::tokenizer`]).
//! 2. Slide windows of 1 to [`Lexicon::max_term_length`] tokens over the
//!    token stream; each window is lower-cased and single-space-joined
//!    ([`candidate_windows`]).
//! 3. Windows found in the lexicon become matched phrases, kept once each in
//!    discovery order ([`matched_phrases`]).
//! 4. Each matched phrase is searched for again in the *original* text,
//!    case-insensitively and literally, and every non-overlapping hit becomes
//!    a [`Match`] ([`locate_terms_in_text`]).
//!
//! Step 4 is shared with the LLM identification path, which produces term
//! strings without positions.
//!
//! The re-search reports every occurrence of a phrase, including ones the
//! token windows never saw (for example inside a longer word). Shorter terms
//! nested in longer matched terms are reported as well.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::lexicon::Lexicon;
use crate::tokenizer::{TokenSpan, Tokenizer};

/// A located term. Offsets and lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Match {
    /// Index of the term's first character in the text
    pub char_position_in_text: usize,
    /// Length of the matched text in characters
    pub term_length: usize,
}

impl Match {
    pub fn new(char_position_in_text: usize, term_length: usize) -> Self {
        Self {
            char_position_in_text,
            term_length,
        }
    }

    /// The matched slice of `text`, or `None` if the span does not fit it.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut boundaries = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()));
        let start = boundaries.nth(self.char_position_in_text)?;
        let end = match self.term_length {
            0 => start,
            len => boundaries.nth(len - 1)?,
        };
        Some(&text[start..end])
    }
}

/// A run of `len` tokens starting at token index `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow {
    pub start: usize,
    pub len: usize,
    /// Lower-cased tokens joined by single spaces
    pub phrase: String,
}

/// Iterator over all candidate windows, shortest first for each start token.
pub struct CandidateWindows {
    words: Vec<String>,
    max_len: usize,
    start: usize,
    len: usize,
}

impl Iterator for CandidateWindows {
    type Item = CandidateWindow;

    fn next(&mut self) -> Option<Self::Item> {
        while self.start < self.words.len() {
            if self.len < self.max_len && self.start + self.len < self.words.len() {
                self.len += 1;
                let end = self.start + self.len;
                return Some(CandidateWindow {
                    start: self.start,
                    len: self.len,
                    phrase: self.words[self.start..end].join(" "),
                });
            }
            self.start += 1;
            self.len = 0;
        }
        None
    }
}

/// Windows of 1 to `max_len` tokens, never running past the last token.
pub fn candidate_windows(tokens: &[TokenSpan], max_len: usize) -> CandidateWindows {
    CandidateWindows {
        words: tokens.iter().map(|t| t.text().to_lowercase()).collect(),
        max_len,
        start: 0,
        len: 0,
    }
}

/// Lexicon terms found in `text`, each once, in order of first discovery.
#[tracing::instrument(level = "debug", skip_all, fields(text_len = text.len()))]
pub fn matched_phrases(text: &str, lexicon: &Lexicon) -> Vec<String> {
    if text.is_empty() || lexicon.is_empty() {
        return Vec::new();
    }

    let tokens = Tokenizer::new().tokenize(text);
    let mut seen = HashSet::new();
    let phrases: Vec<String> = candidate_windows(&tokens, lexicon.max_term_length())
        .filter_map(|window| lexicon.term(&window.phrase))
        .filter(|term| seen.insert(*term))
        .map(str::to_string)
        .collect();

    debug!(
        "{} tokens, {} distinct matched phrases",
        tokens.len(),
        phrases.len()
    );
    phrases
}

/// Locates every lexicon term occurring in `text`.
///
/// Returns an empty list when nothing matches, or when the text or the
/// lexicon is empty.
pub fn find_jargon_spans(text: &str, lexicon: &Lexicon) -> Vec<Match> {
    let phrases = matched_phrases(text, lexicon);
    locate_terms_in_text(&phrases, text)
}

/// Finds every non-overlapping, case-insensitive occurrence of each term in
/// `text`. Words match literally; the gaps between them match any run of
/// whitespace, so a term split by a line break is still found. Blank terms
/// are skipped and repeated terms are searched once.
#[tracing::instrument(level = "debug", skip_all, fields(terms = terms.len()))]
pub fn locate_terms_in_text<S: AsRef<str>>(terms: &[S], text: &str) -> Vec<Match> {
    let offsets = CharOffsets::new(text);
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for term in terms {
        let words: Vec<&str> = term.as_ref().split_whitespace().collect();
        if words.is_empty() || !seen.insert(words.join(" ").to_lowercase()) {
            continue;
        }

        let pattern = match RegexBuilder::new(&term_pattern(&words))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Skipping term '{}': {}", words.join(" "), e);
                continue;
            }
        };

        for found in pattern.find_iter(text) {
            let start = offsets.char_offset(found.start());
            let end = offsets.char_offset(found.end());
            matches.push(Match::new(start, end - start));
        }
    }

    debug!("Located {} matches", matches.len());
    matches
}

fn term_pattern(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Byte to character offset conversion for one text.
struct CharOffsets {
    char_starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            char_starts: text.char_indices().map(|(byte, _)| byte).collect(),
        }
    }

    fn char_offset(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&start| start < byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    fn lexicon(terms: &[&str]) -> Lexicon {
        Lexicon::from_entries(terms.iter().map(|t| (*t, "CUI"))).unwrap()
    }

    #[test]
    fn test_reference_sentence() {
        let lex = lexicon(&["chronic emphysema", "embolism"]);
        let text = "Test results returned positive for chronic emphysema and an embolism.";
        let matches = find_jargon_spans(text, &lex);
        assert_eq!(matches, vec![Match::new(35, 17), Match::new(60, 8)]);
        assert_eq!(matches[0].slice(text), Some("chronic emphysema"));
        assert_eq!(matches[1].slice(text), Some("embolism"));
    }

    #[test]
    fn test_case_insensitive() {
        let lex = lexicon(&["Chronic Emphysema"]);
        let text = "CHRONIC EMPHYSEMA was noted";
        assert_eq!(find_jargon_spans(text, &lex), vec![Match::new(0, 17)]);
    }

    #[test]
    fn test_repeated_term_yields_one_match_per_occurrence() {
        let lex = lexicon(&["embolism"]);
        let text = "An embolism, then another EMBOLISM.";
        assert_eq!(
            find_jargon_spans(text, &lex),
            vec![Match::new(3, 8), Match::new(26, 8)]
        );
    }

    #[test]
    fn test_nested_terms_are_all_reported() {
        let lex = lexicon(&["embolism", "pulmonary embolism"]);
        let text = "pulmonary embolism";
        assert_eq!(
            find_jargon_spans(text, &lex),
            vec![Match::new(0, 18), Match::new(10, 8)]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let lex = lexicon(&["embolism"]);
        assert!(find_jargon_spans("", &lex).is_empty());
        assert!(find_jargon_spans("an embolism", &Lexicon::default()).is_empty());
        assert!(find_jargon_spans("nothing to see here", &lex).is_empty());
    }

    #[test]
    fn test_term_with_metacharacters() {
        let lex = lexicon(&["vitamin b(12)"]);
        let text = "Low vitamin B(12) levels";
        assert_eq!(find_jargon_spans(text, &lex), vec![Match::new(4, 13)]);
    }

    #[test]
    fn test_contraction_term() {
        let lex = lexicon(&["crohn's disease"]);
        let text = "History of Crohn's disease.";
        assert_eq!(find_jargon_spans(text, &lex), vec![Match::new(11, 15)]);
    }

    #[test]
    fn test_research_finds_occurrences_outside_windows() {
        let lex = lexicon(&["stroke"]);
        let text = "Stroke risk is high; heatstroke too.";
        assert_eq!(
            find_jargon_spans(text, &lex),
            vec![Match::new(0, 6), Match::new(25, 6)]
        );
    }

    #[test]
    fn test_offsets_are_in_characters() {
        let lex = lexicon(&["émphysème chronique", "embolism"]);
        let text = "Café patient: émphysème chronique, embolism.";
        let matches = find_jargon_spans(text, &lex);
        assert_eq!(matches, vec![Match::new(14, 19), Match::new(35, 8)]);
        assert_eq!(matches[0].slice(text), Some("émphysème chronique"));
    }

    #[test]
    fn test_terms_at_end_of_text_are_found() {
        // the window must reach the last tokens
        let lex = lexicon(&["copd"]);
        assert_eq!(
            find_jargon_spans("asthma and COPD", &lex),
            vec![Match::new(11, 4)]
        );
    }

    #[test]
    fn test_term_split_by_other_whitespace() {
        let lexicon = Lexicon::from_entries([("chronic emphysema", "C0034067")]).unwrap();
        assert_eq!(
            find_jargon_spans("chronic\nemphysema", &lexicon),
            vec![Match::new(0, 17)]
        );
        assert_eq!(
            find_jargon_spans("Chronic \t emphysema, again", &lexicon),
            vec![Match::new(0, 19)]
        );
        assert_eq!(
            locate_terms_in_text(&["vitamin b(12)"], "low vitamin\r\nB(12) level"),
            vec![Match::new(4, 14)]
        );
    }

    #[test]
    fn test_locate_terms_is_literal() {
        let matches = locate_terms_in_text(&["a.c"], "abc a.c");
        assert_eq!(matches, vec![Match::new(4, 3)]);

        let matches = locate_terms_in_text(&["(copd", "[x", "*"], "x (COPD [x *");
        assert_eq!(
            matches,
            vec![Match::new(2, 5), Match::new(8, 2), Match::new(11, 1)]
        );
    }

    #[test]
    fn test_locate_terms_skips_blank_and_repeated() {
        let matches = locate_terms_in_text(&["", "  ", "Asthma", "asthma "], "asthma");
        assert_eq!(matches, vec![Match::new(0, 6)]);
    }

    #[test]
    fn test_candidate_windows() {
        let tokens = tokenize("a b c");
        let windows: Vec<(usize, usize, String)> = candidate_windows(&tokens, 2)
            .map(|w| (w.start, w.len, w.phrase))
            .collect();
        assert_eq!(
            windows,
            vec![
                (0, 1, "a".to_string()),
                (0, 2, "a b".to_string()),
                (1, 1, "b".to_string()),
                (1, 2, "b c".to_string()),
                (2, 1, "c".to_string()),
            ]
        );
        assert_eq!(candidate_windows(&tokens, 0).count(), 0);
        assert_eq!(candidate_windows(&[], 5).count(), 0);
    }

    #[test]
    fn test_candidate_windows_lowercase() {
        let tokens = tokenize("Pulmonary EMBOLISM");
        let phrases: Vec<String> = candidate_windows(&tokens, 2).map(|w| w.phrase).collect();
        assert_eq!(phrases, vec!["pulmonary", "pulmonary embolism", "embolism"]);
    }

    #[test]
    fn test_match_slice_out_of_range() {
        assert_eq!(Match::new(3, 2).slice("abcd"), None);
        assert_eq!(Match::new(2, 2).slice("abcd"), Some("cd"));
        assert_eq!(Match::new(4, 0).slice("abcd"), Some(""));
    }

    #[test]
    fn test_match_serialization_field_names() {
        let json = serde_json::to_value(Match::new(35, 17)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"char_position_in_text": 35, "term_length": 17})
        );
    }
}
