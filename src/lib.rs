//! # schemalink
//!
//! Infers undocumented relationships between tables from column names,
//! type classes and sampled values.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Tables (model::Table)                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ColumnProfiler, per table]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Column profiles (type, sample, ratios, shape)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [PrimaryKeyDetector, per table]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Table profiles + detected keys              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [CandidateGenerator + RelationshipScorer]
//! ┌─────────────────────────────────────────────────────────┐
//! │         Ranked RelationshipCandidates + evidence         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The inference core performs no I/O. [`model::load_dataset`] and
//! [`config::Settings`] are thin adapters used by the `schemalink` binary.

pub mod config;
pub mod inference;
pub mod model;
