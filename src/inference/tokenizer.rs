//! Identifier decomposition.
//!
//! Splits table and column identifiers into lowercase word tokens and
//! separates the entity words from generic identifier tokens.

use std::collections::BTreeSet;

use serde::Serialize;

use super::vocabulary::Vocabulary;

/// A decomposed identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameTokens {
    /// Lowercase tokens in identifier order.
    pub tokens: Vec<String>,
    /// Tokens that are not generic identifier suffixes.
    pub base_words: BTreeSet<String>,
    /// At least one generic identifier token was present.
    pub has_identifier_marker: bool,
}

impl NameTokens {
    /// The tokens joined without separators (`patient_id` → `patientid`).
    pub fn joined(&self) -> String {
        self.tokens.concat()
    }
}

/// Tokenizes identifiers against a vocabulary of generic suffixes.
#[derive(Debug, Clone, Copy)]
pub struct NameTokenizer<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> NameTokenizer<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Decompose `identifier`. Never fails; an empty identifier yields empty tokens.
    pub fn tokenize(&self, identifier: &str) -> NameTokens {
        let tokens = split_identifier(identifier);

        let mut base_words = BTreeSet::new();
        let mut has_identifier_marker = false;
        for token in &tokens {
            if self.vocabulary.is_id_suffix(token) {
                has_identifier_marker = true;
            } else {
                base_words.insert(token.clone());
            }
        }

        NameTokens {
            tokens,
            base_words,
            has_identifier_marker,
        }
    }
}

/// Split an identifier into lowercase word tokens.
///
/// Splits on any non-alphanumeric character, on lowercase/digit → uppercase
/// transitions, and before the last capital of an uppercase run that is
/// followed by lowercase (`HTTPServer` → `http`, `server`).
///
/// ```
/// use schemalink::inference::split_identifier;
///
/// assert_eq!(split_identifier("OwnerPatientCode"), ["owner", "patient", "code"]);
/// assert_eq!(split_identifier("id_paciente"), ["id", "paciente"]);
/// assert_eq!(split_identifier("KundenSchlüssel"), ["kunden", "schlüssel"]);
/// ```
pub fn split_identifier(identifier: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for segment in identifier.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut start = 0;

        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let lower_to_upper = (prev.is_lowercase() || prev.is_numeric()) && cur.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && cur.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());

            if lower_to_upper || acronym_end {
                tokens.push(chars[start..i].iter().collect::<String>().to_lowercase());
                start = i;
            }
        }

        if start < chars.len() {
            tokens.push(chars[start..].iter().collect::<String>().to_lowercase());
        }
    }

    tokens
}
