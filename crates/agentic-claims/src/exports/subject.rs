//! Subject patterns and wildcard overlap.
//!
//! Subjects are hierarchical, `.`-separated token lists:
//!   - `orders.eu.created` — a concrete subject
//!   - `orders.*.created` — `*` matches exactly one token
//!   - `orders.>` — `>` matches one or more trailing tokens
//!
//! Two patterns overlap when some concrete subject matches both.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationResults;

/// Token delimiter.
pub const DELIMITER: char = '.';
/// Matches exactly one token.
pub const SINGLE_WILDCARD: &str = "*";
/// Matches every remaining token.
pub const MULTI_WILDCARD: &str = ">";

/// A subject pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(pub String);

impl Subject {
    /// Create a subject from any string. No normalization is applied.
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    /// The raw pattern.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into tokens. The empty subject is a single empty token.
    pub fn tokens(&self) -> std::str::Split<'_, char> {
        self.0.split(DELIMITER)
    }

    /// True if any token is a wildcard.
    pub fn has_wildcards(&self) -> bool {
        self.tokens()
            .any(|t| t == SINGLE_WILDCARD || t == MULTI_WILDCARD)
    }

    /// Can some concrete subject match both `self` and `other`?
    pub fn overlaps(&self, other: &Subject) -> bool {
        subjects_overlap(self.as_str(), other.as_str())
    }

    /// Does every concrete subject matching `self` also match `other`?
    pub fn is_contained_in(&self, other: &Subject) -> bool {
        let mut mine = self.tokens();
        let mut theirs = other.tokens();
        loop {
            match (mine.next(), theirs.next()) {
                (Some(_), Some(MULTI_WILDCARD)) => return true,
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if b == SINGLE_WILDCARD {
                        if a == MULTI_WILDCARD {
                            return false;
                        }
                    } else if a != b {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    /// Append well-formedness findings. Only an empty subject blocks.
    pub fn validate(&self, results: &mut ValidationResults) {
        if self.0.is_empty() {
            results.add_error("subject cannot be empty");
            return;
        }
        if self.0.chars().any(char::is_whitespace) {
            results.add_warning(format!("subject {:?} cannot contain whitespace", self.0));
        }
        let tokens: Vec<&str> = self.tokens().collect();
        if tokens[..tokens.len() - 1].contains(&MULTI_WILDCARD) {
            results.add_warning(format!(
                "subject {:?} uses {MULTI_WILDCARD} before its last token",
                self.0
            ));
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Subject {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Subject {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Decide whether two subject patterns can match a common concrete subject.
///
/// Walks both token lists in lock-step. A `>` on either side ends the walk
/// with a match; running out of tokens on exactly one side is a mismatch;
/// otherwise tokens must be equal or one of them `*`.
pub fn subjects_overlap(a: &str, b: &str) -> bool {
    let mut left = a.split(DELIMITER);
    let mut right = b.split(DELIMITER);
    loop {
        let (l, r) = (left.next(), right.next());
        if l == Some(MULTI_WILDCARD) || r == Some(MULTI_WILDCARD) {
            return true;
        }
        match (l, r) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                if l != r && l != SINGLE_WILDCARD && r != SINGLE_WILDCARD {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
