//! Imports — subjects an account consumes from another account's exports.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::exports::{ExportKind, Subject};
use crate::identity::{is_public_key, KeyRole};
use crate::validation::ValidationResults;

/// A subject imported from another account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Subject as exported by the other account.
    pub subject: Subject,
    /// The exporting account's public key identifier.
    pub account: String,
    /// Local subject the import is mapped to, if different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Subject>,
    #[serde(rename = "type")]
    pub kind: ExportKind,
}

impl Import {
    pub fn new(account: impl Into<String>, subject: impl Into<Subject>, kind: ExportKind) -> Self {
        Self {
            account: account.into(),
            subject: subject.into(),
            kind,
            ..Self::default()
        }
    }

    /// Map the import onto a different local subject.
    pub fn mapped_to(mut self, to: impl Into<Subject>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// The subject this import appears under locally.
    pub fn local_subject(&self) -> &Subject {
        self.to.as_ref().unwrap_or(&self.subject)
    }

    /// Append findings for this import.
    pub fn validate(&self, results: &mut ValidationResults) {
        if self.kind == ExportKind::Unknown {
            results.add_error(format!(
                "import {:?} has an invalid type, must be stream or service",
                self.subject.as_str()
            ));
        }
        self.subject.validate(results);
        if let Some(to) = &self.to {
            to.validate(results);
        }
        if !is_public_key(&self.account, KeyRole::Account) {
            results.add_error(format!(
                "import {:?} names {:?}, which is not an account public key",
                self.subject.as_str(),
                self.account
            ));
        }
    }
}

/// The imports belonging to one account, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Imports(Vec<Import>);

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, imports: impl IntoIterator<Item = Import>) {
        self.0.extend(imports);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self, results: &mut ValidationResults) {
        for import in &self.0 {
            import.validate(results);
        }
    }
}

impl Deref for Imports {
    type Target = [Import];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
