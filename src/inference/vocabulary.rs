//! Identifier vocabularies used by tokenization, key detection and name scoring.
//!
//! A [`Vocabulary`] is immutable once built. Extend it through
//! [`InferenceConfigBuilder`](super::InferenceConfigBuilder), never on a live
//! engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ConfigError;

/// Tokens that mark a column as an identifier without naming an entity.
static DEFAULT_ID_SUFFIXES: &[&str] = &[
    // English
    "id", "uid", "uuid", "guid", "pk", "fk", "code", "key", "ref", "reference", "identifier",
    "ident", "number", "num", "nbr",
    // Spanish / Portuguese
    "identificador", "codigo", "código", "cod", "numero", "número", "clave", "referencia",
    // German
    "schlüssel", "schluessel", "nummer", "kennung",
    // French
    "identifiant", "numéro", "clé", "cle",
];

/// Names that, on their own, identify a primary key column.
static DEFAULT_PK_NAMES: &[&str] = &["id", "uid", "uuid", "guid", "pk"];

/// Column names too common to say anything about a relationship on their own.
static DEFAULT_GENERIC_COLUMNS: &[&str] = &[
    "id", "uid", "uuid", "name", "description", "created_at", "updated_at", "status", "type",
    "date", "time", "timestamp", "active", "deleted", "enabled", "visible",
];

/// Concept → alternate spellings, including localized forms.
static DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("patient", &["patient", "person", "individual", "client", "paciente"]),
    ("appointment", &["appointment", "visit", "booking", "schedule", "cita"]),
    ("medication", &["medication", "medicine", "drug", "prescription", "medicamento"]),
    ("doctor", &["doctor", "physician", "provider", "staff", "medico"]),
    ("pet", &["pet", "animal", "mascota"]),
    ("owner", &["owner", "client", "customer", "dueño", "propietario"]),
];

/// Immutable identifier vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    id_suffixes: BTreeSet<String>,
    pk_names: BTreeSet<String>,
    generic_columns: BTreeSet<String>,
    synonyms: BTreeMap<String, BTreeSet<String>>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let mut vocabulary = Self::empty();
        vocabulary.add_id_suffixes(DEFAULT_ID_SUFFIXES.iter().copied());
        vocabulary.add_pk_names(DEFAULT_PK_NAMES.iter().copied());
        vocabulary.add_generic_columns(DEFAULT_GENERIC_COLUMNS.iter().copied());
        for (concept, spellings) in DEFAULT_SYNONYMS {
            vocabulary.add_synonyms(concept, spellings.iter().copied());
        }
        vocabulary
    }
}

impl Vocabulary {
    /// A vocabulary with no entries at all.
    pub fn empty() -> Self {
        Self {
            id_suffixes: BTreeSet::new(),
            pk_names: BTreeSet::new(),
            generic_columns: BTreeSet::new(),
            synonyms: BTreeMap::new(),
        }
    }

    /// Is `token` a generic identifier token (`id`, `code`, `nummer`, ...)?
    pub fn is_id_suffix(&self, token: &str) -> bool {
        self.id_suffixes.contains(token)
    }

    /// Is `name` (already lowercased) one of the bare primary-key names?
    pub fn is_pk_name(&self, name: &str) -> bool {
        self.pk_names.contains(name)
    }

    /// Is this column name generic (`name`, `status`, `created_at`, ...)?
    ///
    /// Takes the name's tokens so that `CreatedAt` and `created_at` agree.
    pub fn is_generic_column(&self, tokens: &[String]) -> bool {
        !tokens.is_empty() && self.generic_columns.contains(&tokens.join("_"))
    }

    pub fn id_suffixes(&self) -> impl Iterator<Item = &str> {
        self.id_suffixes.iter().map(String::as_str)
    }

    /// Do `a` and `b` belong to the same synonym concept?
    ///
    /// The concept name itself counts as one of its spellings.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        self.synonyms.iter().any(|(concept, spellings)| {
            let has = |w: &str| w == concept || spellings.contains(w);
            has(a) && has(b)
        })
    }

    pub(super) fn add_id_suffixes<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        self.id_suffixes.extend(tokens.into_iter().map(normalize));
    }

    pub(super) fn add_pk_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.pk_names.extend(names.into_iter().map(normalize));
    }

    pub(super) fn add_generic_columns<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.generic_columns.extend(names.into_iter().map(normalize));
    }

    pub(super) fn add_synonyms<'a>(
        &mut self,
        concept: &str,
        spellings: impl IntoIterator<Item = &'a str>,
    ) {
        self.synonyms
            .entry(normalize(concept))
            .or_default()
            .extend(spellings.into_iter().map(normalize));
    }
}

fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Vocabulary presets for common application domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Medical,
    Ecommerce,
    Education,
    Financial,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Medical,
        Domain::Ecommerce,
        Domain::Education,
        Domain::Financial,
    ];

    /// Extra identifier tokens used in this domain.
    pub fn id_suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Medical => &[
                "mrn", "npi", "dx", "rx", "cpt", "icd", "hl7", "expediente", "historia", "ficha",
                "registro",
            ],
            Self::Ecommerce => &[
                "sku", "upc", "ean", "asin", "barcode", "serial", "tracking", "pedido", "factura",
            ],
            Self::Education => &["matricula", "legajo", "enrollment", "sid", "tid", "registro"],
            Self::Financial => &[
                "iban", "swift", "routing", "acct", "folio", "voucher", "referencia",
            ],
        }
    }

    /// Extra concept → spelling mappings used in this domain.
    pub fn synonyms(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Self::Medical => &[
                ("patient", &["patient", "paciente", "enfermo", "case", "subject", "persona"]),
                ("doctor", &["doctor", "physician", "medico", "practitioner", "provider", "profesional"]),
                ("diagnosis", &["diagnosis", "diagnostico", "dx", "finding", "condition"]),
                ("treatment", &["treatment", "tratamiento", "therapy", "intervention", "procedure"]),
                ("medication", &["medication", "medicine", "drug", "medicamento", "farmaco", "rx"]),
                ("appointment", &["appointment", "visit", "cita", "consulta", "encuentro"]),
                ("insurance", &["insurance", "seguro", "coverage", "plan", "cobertura"]),
            ],
            Self::Ecommerce => &[
                ("customer", &["customer", "client", "cliente", "buyer", "comprador", "user"]),
                ("order", &["order", "pedido", "purchase", "compra", "transaction"]),
                ("product", &["product", "item", "producto", "articulo", "merchandise", "goods"]),
                ("cart", &["cart", "basket", "carrito", "cesta", "bag"]),
                ("payment", &["payment", "pago", "transaction", "transaccion", "billing"]),
                ("shipping", &["shipping", "envio", "delivery", "entrega", "dispatch"]),
            ],
            Self::Education => &[
                ("student", &["student", "alumno", "estudiante", "pupil", "learner", "aprendiz"]),
                ("teacher", &["teacher", "profesor", "docente", "instructor", "educator", "maestro"]),
                ("course", &["course", "curso", "class", "clase", "subject", "materia", "asignatura"]),
                ("grade", &["grade", "nota", "calificacion", "score", "mark", "puntaje"]),
                ("enrollment", &["enrollment", "matricula", "inscripcion", "registration"]),
                ("semester", &["semester", "semestre", "term", "periodo", "trimester", "cuatrimestre"]),
            ],
            Self::Financial => &[
                ("account", &["account", "cuenta", "acc", "acct"]),
                ("customer", &["customer", "client", "cliente", "holder", "titular"]),
                ("transaction", &["transaction", "transaccion", "trans", "movement", "movimiento"]),
                ("balance", &["balance", "saldo", "amount", "monto", "importe"]),
                ("branch", &["branch", "sucursal", "office", "oficina", "agency"]),
                ("card", &["card", "tarjeta", "debit", "credit", "credito", "debito"]),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Ecommerce => "ecommerce",
            Self::Education => "education",
            Self::Financial => "financial",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.trim().to_lowercase().as_str() {
            "e-commerce" => "ecommerce".to_string(),
            "finance" => "financial".to_string(),
            other => other.to_string(),
        };
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownDomain(s.to_string()))
    }
}
