//! # Jargon Lexicon
//!
//! The immutable vocabulary of known medical terms. Each entry maps a term to
//! an opaque concept identifier (a UMLS CUI in the bundled data).
//!
//! Terms are indexed by a *lookup key*: the term run through the same
//! [`Tokenizer`] used on input text, lower-cased and joined by single spaces.
//! For ordinary terms the key equals the term (`chronic emphysema`); for terms
//! carrying contractions or punctuation it follows the token split
//! (`crohn's disease` is keyed as `crohn 's disease`), which is exactly the
//! shape of the candidate windows the matcher builds.

use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::tokenizer::{TokenSpan, Tokenizer};

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed lexicon {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed lexicon {path}: expected a JSON object of term to identifier")]
    NotAnObject { path: PathBuf },

    #[error("Blank term in lexicon (identifier {concept_id})")]
    EmptyTerm { concept_id: String },
}

pub type LexiconResult<T> = Result<T, LexiconError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LexiconEntry {
    /// Lower-cased, whitespace-normalized surface form
    term: String,
    concept_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    max_term_length: usize,
}

impl Lexicon {
    /// Loads a lexicon from a JSON file mapping term to identifier.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_reader(BufReader::new(file), path)?;
        info!(
            "Loaded {} terms from {} (max term length {})",
            lexicon.len(),
            path.display(),
            lexicon.max_term_length()
        );
        Ok(lexicon)
    }

    /// Reads a lexicon from any JSON source. `origin` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> LexiconResult<Self> {
        let map = read_json_object(reader, origin)?;
        Self::from_entries(
            map.into_iter()
                .map(|(term, id)| (term, json_value_to_string(id))),
        )
    }

    /// Builds a lexicon from `(term, identifier)` pairs. When two terms share
    /// a lookup key the first one wins.
    pub fn from_entries<I, T, C>(entries: I) -> LexiconResult<Self>
    where
        I: IntoIterator<Item = (T, C)>,
        T: AsRef<str>,
        C: Into<String>,
    {
        let tokenizer = Tokenizer::new();
        let mut lexicon = Lexicon::default();

        for (term, concept_id) in entries {
            let concept_id = concept_id.into();
            let term = normalize_whitespace(&term.as_ref().to_lowercase());
            let tokens = tokenizer.tokenize(&term);
            if tokens.is_empty() {
                return Err(LexiconError::EmptyTerm { concept_id });
            }

            let key = join_tokens(&tokens);
            if lexicon.entries.contains_key(&key) {
                debug!("Duplicate lexicon key '{}', keeping first entry", key);
                continue;
            }
            lexicon.max_term_length = lexicon.max_term_length.max(tokens.len());
            lexicon
                .entries
                .insert(key, LexiconEntry { term, concept_id });
        }

        Ok(lexicon)
    }

    /// Membership test for a candidate phrase (lower-cased, single-spaced).
    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains_key(candidate)
    }

    pub fn concept_id(&self, candidate: &str) -> Option<&str> {
        self.entries.get(candidate).map(|e| e.concept_id.as_str())
    }

    /// Surface form of the term stored under a lookup key.
    pub fn term(&self, candidate: &str) -> Option<&str> {
        self.entries.get(candidate).map(|e| e.term.as_str())
    }

    /// Lookup key for arbitrary user-supplied phrasing of a term.
    pub fn lookup_key(phrase: &str) -> String {
        join_tokens(&Tokenizer::new().tokenize(&phrase.to_lowercase()))
    }

    /// Word count of the longest term; bounds the matcher's window.
    pub fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lower-cases and single-space-joins token texts.
pub fn join_tokens(tokens: &[TokenSpan]) -> String {
    let mut joined = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(&token.text().to_lowercase());
    }
    joined
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn read_json_object<R: Read>(
    reader: R,
    origin: &Path,
) -> LexiconResult<Map<String, Value>> {
    let value: Value = serde_json::from_reader(reader).map_err(|source| LexiconError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LexiconError::NotAnObject {
            path: origin.to_path_buf(),
        }),
    }
}

pub(crate) fn json_value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lexicon(terms: &[&str]) -> Lexicon {
        Lexicon::from_entries(terms.iter().enumerate().map(|(i, t)| (*t, format!("C{i}"))))
            .unwrap()
    }

    #[test]
    fn test_contains_and_concept_id() {
        let lex = Lexicon::from_entries([("chronic emphysema", "C0012"), ("embolism", "C0013")])
            .unwrap();
        assert!(lex.contains("chronic emphysema"));
        assert!(lex.contains("embolism"));
        assert!(!lex.contains("emphysema"));
        assert_eq!(lex.concept_id("embolism"), Some("C0013"));
        assert_eq!(lex.concept_id("asthma"), None);
        assert_eq!(lex.len(), 2);
    }

    #[test]
    fn test_terms_are_canonicalized() {
        let lex = lexicon(&["  Chronic   Obstructive Pulmonary  Disease "]);
        assert!(lex.contains("chronic obstructive pulmonary disease"));
        assert_eq!(
            lex.term("chronic obstructive pulmonary disease"),
            Some("chronic obstructive pulmonary disease")
        );
    }

    #[test]
    fn test_max_term_length_is_derived() {
        assert_eq!(lexicon(&[]).max_term_length(), 0);
        assert_eq!(lexicon(&["copd", "pulmonary embolism"]).max_term_length(), 2);
        assert_eq!(
            lexicon(&["a b c d e f g", "copd"]).max_term_length(),
            7,
            "window bound must follow the data, not a fixed five"
        );
    }

    #[test]
    fn test_contraction_terms_use_token_keys() {
        let lex = lexicon(&["Crohn's disease"]);
        assert!(lex.contains("crohn 's disease"));
        assert_eq!(lex.term("crohn 's disease"), Some("crohn's disease"));
        assert_eq!(lex.max_term_length(), 3);
        assert_eq!(Lexicon::lookup_key("CROHN'S   Disease"), "crohn 's disease");
    }

    #[test]
    fn test_blank_term_is_rejected() {
        let result = Lexicon::from_entries([("embolism", "C1"), ("   ", "C2")]);
        assert!(matches!(
            result,
            Err(LexiconError::EmptyTerm { concept_id }) if concept_id == "C2"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"embolism": "C0013922", "chronic emphysema": "C0034067", "asthma": 4096}}"#
        )
        .unwrap();
        let lex = Lexicon::load(file.path()).unwrap();
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.concept_id("asthma"), Some("4096"));
        assert_eq!(lex.max_term_length(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Lexicon::load(Path::new("/nonexistent/term_to_cui.json"));
        assert!(matches!(result, Err(LexiconError::Io { .. })));
    }

    #[test]
    fn test_load_malformed() {
        let result = Lexicon::from_reader("{not json".as_bytes(), Path::new("inline"));
        assert!(matches!(result, Err(LexiconError::Parse { .. })));

        let result = Lexicon::from_reader(r#"["embolism"]"#.as_bytes(), Path::new("inline"));
        assert!(matches!(result, Err(LexiconError::NotAnObject { .. })));
    }
}
