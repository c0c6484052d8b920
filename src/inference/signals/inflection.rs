//! Singularization for table and column word matching.
//!
//! English and Spanish schema vocabularies both show up in practice, so the
//! irregular table and suffix rules are checked before falling back to the
//! `inflector` crate.

use inflector::Inflector;

/// Irregular (singular, plural) pairs inflector handles poorly.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("diagnosis", "diagnoses"),
    ("thesis", "theses"),
    ("criterion", "criteria"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("status", "statuses"),
];

/// Spanish plural suffix → singular suffix.
static SPANISH_SUFFIXES: &[(&str, &str)] = &[
    ("ciones", "cion"),
    ("siones", "sion"),
    ("dades", "dad"),
];

/// Singularize a lowercase word.
///
/// ```
/// use schemalink::inference::signals::singularize;
///
/// assert_eq!(singularize("patients"), "patient");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("prescripciones"), "prescripcion");
/// ```
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return singular.to_string();
        }
    }

    for (plural, singular) in SPANISH_SUFFIXES {
        if let Some(stem) = lower.strip_suffix(plural) {
            if !stem.is_empty() {
                return format!("{stem}{singular}");
            }
        }
    }

    // Short tokens are usually abbreviations (`ss`, `os`), not plurals
    if lower.chars().count() <= 3 {
        return lower;
    }

    lower.to_singular()
}
