//! Exports — authorization grants an account makes available to others.
//!
//! An export names a subject pattern and whether it is a stream (one-way
//! data) or a service (request/response). Exports of the same kind must not
//! overlap, since an overlapping pair would make the grant for some
//! concrete subject ambiguous.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::claims::Claims;
use crate::validation::ValidationResults;

use super::revocation::RevocationList;
use super::subject::Subject;

/// What an export carries.
///
/// Unrecognized serialized values decode to `Unknown`, which validation
/// then flags, rather than failing the decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportKind {
    #[default]
    Unknown,
    Stream,
    Service,
}

impl ExportKind {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Stream => "stream",
            Self::Service => "service",
        }
    }
}

impl From<String> for ExportKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "stream" => Self::Stream,
            "service" => Self::Service,
            _ => Self::Unknown,
        }
    }
}

impl From<ExportKind> for String {
    fn from(kind: ExportKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single authorization grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Subject pattern being granted.
    pub subject: Subject,
    /// Stream or service.
    #[serde(rename = "type")]
    pub kind: ExportKind,
    /// Importers must present an activation token.
    #[serde(default, skip_serializing_if = "is_false")]
    pub token_req: bool,
    /// Importers revoked from this export.
    #[serde(default, skip_serializing_if = "RevocationList::is_empty")]
    pub revocations: RevocationList,
}

impl Export {
    /// Create an export for a subject.
    pub fn new(subject: impl Into<Subject>, kind: ExportKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
            ..Self::default()
        }
    }

    /// Create a stream export.
    pub fn stream(subject: impl Into<Subject>) -> Self {
        Self::new(subject, ExportKind::Stream)
    }

    /// Create a service export.
    pub fn service(subject: impl Into<Subject>) -> Self {
        Self::new(subject, ExportKind::Service)
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// True for stream exports.
    pub fn is_stream(&self) -> bool {
        self.kind == ExportKind::Stream
    }

    /// True for service exports.
    pub fn is_service(&self) -> bool {
        self.kind == ExportKind::Service
    }

    /// Append findings for this export alone.
    pub fn validate(&self, results: &mut ValidationResults) {
        if self.kind == ExportKind::Unknown {
            results.add_error(format!(
                "export {:?} has an invalid type, must be stream or service",
                self.subject.as_str()
            ));
        }
        self.subject.validate(results);
    }

    /// Revoke `principal` for credentials issued at or before `threshold`.
    pub fn revoke_at(&mut self, principal: impl Into<String>, threshold: u64) {
        self.revocations.revoke_at(principal, threshold);
    }

    /// Drop any revocation of `principal`.
    pub fn clear_revocation(&mut self, principal: &str) {
        self.revocations.clear_revocation(principal);
    }

    /// Is `principal` revoked for credentials issued at `instant`?
    pub fn is_revoked_at(&self, principal: &str, instant: u64) -> bool {
        self.revocations.is_revoked_at(principal, instant)
    }

    /// Is `principal` revoked right now?
    pub fn is_revoked(&self, principal: &str) -> bool {
        self.revocations.is_revoked(principal)
    }

    /// Is this credential revoked, judged by its subject and issue time?
    pub fn is_claim_revoked<T>(&self, claims: &Claims<T>) -> bool {
        self.is_revoked_at(&claims.subject, claims.issued_at)
    }
}

/// The exports belonging to one credential, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exports(Vec<Export>);

impl Exports {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append exports. Duplicates are kept; validation reports them.
    pub fn add(&mut self, exports: impl IntoIterator<Item = Export>) {
        self.0.extend(exports);
    }

    /// True when there are no exports.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate each export, then report every same-kind pair whose
    /// subjects overlap.
    pub fn validate(&self, results: &mut ValidationResults) {
        for export in &self.0 {
            export.validate(results);
        }

        for (i, a) in self.0.iter().enumerate() {
            for b in &self.0[i + 1..] {
                if a.kind != b.kind {
                    continue;
                }
                if a.subject.overlaps(&b.subject) {
                    log::debug!("overlapping {} exports: {} / {}", a.kind, a.subject, b.subject);
                    results.add_error(format!(
                        "{} export subject {:?} overlaps with {:?}",
                        a.kind,
                        a.subject.as_str(),
                        b.subject.as_str()
                    ));
                }
            }
        }
    }

    /// True if some export's pattern covers every subject `subject` matches.
    pub fn has_export_containing_subject(&self, subject: &Subject) -> bool {
        self.0.iter().any(|e| subject.is_contained_in(&e.subject))
    }

    /// Iterate exports of one kind.
    pub fn of_kind(&self, kind: ExportKind) -> impl Iterator<Item = &Export> {
        self.0.iter().filter(move |e| e.kind == kind)
    }
}

impl Deref for Exports {
    type Target = [Export];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Exports {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Export>> for Exports {
    fn from(exports: Vec<Export>) -> Self {
        Self(exports)
    }
}

impl<'a> IntoIterator for &'a Exports {
    type Item = &'a Export;
    type IntoIter = std::slice::Iter<'a, Export>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
