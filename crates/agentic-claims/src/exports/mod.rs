//! Exports — subject grants, overlap detection, and revocation.
//!
//! The exports module provides:
//! - Subject pattern parsing with `*` / `>` wildcard overlap
//! - Export grants and export sets with pairwise ambiguity checks
//! - The monotonic revocation ledger embedded in each export

pub mod export;
pub mod revocation;
pub mod subject;

pub use export::{Export, ExportKind, Exports};
pub use revocation::{RevocationList, ALL_PRINCIPALS};
pub use subject::{subjects_overlap, Subject};
