//! Per-column profiling.
//!
//! A profile captures everything scoring needs from a column: its type
//! class, a bounded sample of distinct values, uniqueness and null ratios
//! over the full column, and the dominant value shape of the sample.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::model::{Column, Table, TypeClass, Value, ValueShape};

use super::primary_key::DetectedPrimaryKey;
use super::signals::classifier::ShapeClassifier;
use super::tokenizer::{NameTokenizer, NameTokens};

static TEMPORAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2}([T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?)?|\d{2}/\d{2}/\d{4})$",
    )
    .expect("valid regex")
});

/// Min, max and mean of a column's numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub table: String,
    pub name: String,
    /// Declaration order within the table.
    pub position: usize,
    pub type_class: TypeClass,
    pub row_count: usize,
    pub null_count: usize,
    pub distinct_count: usize,
    /// Distinct non-null values / non-null values.
    pub uniqueness_ratio: f64,
    /// Null values / rows.
    pub null_ratio: f64,
    /// First distinct non-null sample keys in row order.
    pub sample: BTreeSet<String>,
    pub dominant_shape: Option<ValueShape>,
    pub shape_counts: BTreeMap<ValueShape, usize>,
    pub numeric: Option<NumericSummary>,
    #[serde(skip)]
    pub tokens: NameTokens,
    pub is_primary_key: bool,
    /// Primary-key confidence; 0.0 for columns failing the structural gate.
    pub pk_score: f64,
}

impl ColumnProfile {
    pub fn non_null_count(&self) -> usize {
        self.row_count - self.null_count
    }

    /// Every row holds a distinct non-null value.
    pub fn is_unique_and_complete(&self) -> bool {
        self.null_count == 0
            && self.non_null_count() > 0
            && self.distinct_count == self.non_null_count()
    }
}

/// Profiles of every column in a table plus its detected primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub name: String,
    #[serde(skip)]
    pub tokens: NameTokens,
    pub row_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub primary_key: Option<DetectedPrimaryKey>,
}

impl TableProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Builds [`ColumnProfile`]s.
#[derive(Debug, Clone, Copy)]
pub struct ColumnProfiler<'a> {
    sample_size: usize,
    classifier: &'a dyn ShapeClassifier,
    tokenizer: NameTokenizer<'a>,
}

impl<'a> ColumnProfiler<'a> {
    pub fn new(
        sample_size: usize,
        classifier: &'a dyn ShapeClassifier,
        tokenizer: NameTokenizer<'a>,
    ) -> Self {
        Self {
            sample_size,
            classifier,
            tokenizer,
        }
    }

    /// Profile every column of `table`. Primary keys are not detected here.
    pub fn profile_table(&self, table: &Table) -> TableProfile {
        let columns: Vec<ColumnProfile> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| self.profile_column(table.name(), position, column))
            .collect();

        debug!(
            table = table.name(),
            columns = columns.len(),
            rows = table.row_count(),
            "profiled table"
        );

        TableProfile {
            name: table.name().to_string(),
            tokens: self.tokenizer.tokenize(table.name()),
            row_count: table.row_count(),
            columns,
            primary_key: None,
        }
    }

    pub fn profile_column(&self, table: &str, position: usize, column: &Column) -> ColumnProfile {
        let row_count = column.len();
        let mut distinct = HashSet::new();
        let mut sample = BTreeSet::new();
        let mut non_null = 0usize;

        for key in column.values.iter().filter_map(Value::sample_key) {
            non_null += 1;
            if distinct.insert(key.clone()) && sample.len() < self.sample_size {
                sample.insert(key);
            }
        }

        let null_count = row_count - non_null;
        let distinct_count = distinct.len();

        let mut shape_counts = BTreeMap::new();
        for value in &sample {
            *shape_counts.entry(self.classifier.classify(value)).or_insert(0usize) += 1;
        }

        ColumnProfile {
            table: table.to_string(),
            name: column.name.clone(),
            position,
            type_class: column
                .declared_type
                .unwrap_or_else(|| infer_type_class(&column.values)),
            row_count,
            null_count,
            distinct_count,
            uniqueness_ratio: ratio(distinct_count, non_null),
            null_ratio: ratio(null_count, row_count),
            dominant_shape: dominant_shape(&shape_counts),
            shape_counts,
            sample,
            numeric: numeric_summary(&column.values),
            tokens: self.tokenizer.tokenize(&column.name),
            is_primary_key: false,
            pk_score: 0.0,
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Most frequent shape; ties go to the earlier shape in [`ValueShape::ALL`].
fn dominant_shape(counts: &BTreeMap<ValueShape, usize>) -> Option<ValueShape> {
    let mut best: Option<(ValueShape, usize)> = None;
    for shape in ValueShape::ALL {
        let count = counts.get(&shape).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((shape, count));
        }
    }
    best.map(|(shape, _)| shape)
}

/// Infer a type class for a column loaded without one.
pub fn infer_type_class(values: &[Value]) -> TypeClass {
    let (mut bools, mut ints, mut floats, mut texts, mut temporals) = (0, 0, 0, 0, 0);

    for value in values {
        match value.type_class() {
            Some(TypeClass::Boolean) => bools += 1,
            Some(TypeClass::Integer) => ints += 1,
            Some(TypeClass::Float) => floats += 1,
            Some(_) => {
                texts += 1;
                if matches!(value, Value::Text(s) if TEMPORAL.is_match(s.trim())) {
                    temporals += 1;
                }
            }
            None => {}
        }
    }

    let total = bools + ints + floats + texts;
    if total == 0 {
        TypeClass::Unknown
    } else if bools == total {
        TypeClass::Boolean
    } else if ints == total {
        TypeClass::Integer
    } else if ints + floats == total {
        TypeClass::Float
    } else if texts == total && temporals == total {
        TypeClass::Temporal
    } else if texts == total {
        TypeClass::Text
    } else {
        TypeClass::Unknown
    }
}

fn numeric_summary(values: &[Value]) -> Option<NumericSummary> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|v| match v {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        })
        .collect();

    if numbers.is_empty() {
        return None;
    }

    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
    Some(NumericSummary { min, max, mean })
}
