//! Individual relationship signals.
//!
//! Each signal is computed independently and yields a sub-score in [0, 1].
//! [`RelationshipScorer`](super::RelationshipScorer) weights and combines them.

pub mod classifier;
pub mod inflection;
pub mod naming;
pub mod pattern;
pub mod statistics;
pub mod types;

pub use inflection::singularize;
pub use naming::{matches_fk_template, NameSide, NameSimilarity};
pub use pattern::pattern_score;
pub use statistics::ValueOverlap;
pub use types::TypeCompatibility;
