//! Claims — the signed credential envelope.
//!
//! A credential is three base64url segments, `header.payload.signature`.
//! The payload is a `Claims<T>`: standard JWT registered claims plus a
//! typed `data` section. The signature covers the first two segments
//! exactly as transmitted and is checked against the key named by `iss`,
//! so no key lookup is ever needed.

pub mod builder;
pub mod codec;
pub mod header;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::identity::KeyRole;
use crate::validation::ValidationResults;

pub use builder::ClaimsBuilder;
pub use codec::{decode, encode};
pub use header::{Header, ALGORITHM, TOKEN_TYPE};

/// A payload type that can travel inside a credential.
pub trait ClaimData: Serialize + DeserializeOwned + Clone {
    /// Tag written to the payload's `type` field.
    const CLAIM_TYPE: &'static str;

    /// Roles allowed to sign this kind of claim.
    fn issuer_roles() -> &'static [KeyRole];

    /// Roles the subject key may have.
    fn subject_roles() -> &'static [KeyRole];

    /// Append payload-specific findings.
    fn validate(claims: &Claims<Self>, results: &mut ValidationResults);
}

/// The signed region of a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims<T> {
    /// Claim ID, a hash of the payload computed at encode time.
    #[serde(rename = "jti", default)]
    pub id: String,
    /// Issue time (Unix seconds), set at encode time.
    #[serde(rename = "iat", default)]
    pub issued_at: u64,
    /// Signing key identifier, set at encode time.
    #[serde(rename = "iss", default)]
    pub issuer: String,
    /// Identity the claim describes.
    #[serde(rename = "sub", default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<u64>,
    /// Payload type tag.
    #[serde(rename = "type")]
    pub claim_type: String,
    pub data: T,
}

impl<T: ClaimData> Claims<T> {
    /// Unsigned claims about `subject`.
    pub fn new(subject: impl Into<String>, data: T) -> Self {
        Self {
            id: String::new(),
            issued_at: 0,
            issuer: String::new(),
            subject: subject.into(),
            name: String::new(),
            expires: None,
            not_before: None,
            claim_type: T::CLAIM_TYPE.to_string(),
            data,
        }
    }

    /// Validate against the current time.
    pub fn validate(&self, results: &mut ValidationResults) {
        self.validate_at(results, crate::time::now_secs());
    }

    /// Validate against an explicit instant.
    pub fn validate_at(&self, results: &mut ValidationResults, now: u64) {
        if self.subject.is_empty() {
            results.add_error("subject is required");
        }
        if let Some(exp) = self.expires {
            if exp < now {
                results.add_time_check(format!(
                    "claim expired at {}",
                    crate::time::secs_to_rfc3339(exp)
                ));
            }
        }
        if let Some(nbf) = self.not_before {
            if nbf > now {
                results.add_time_check(format!(
                    "claim is not valid until {}",
                    crate::time::secs_to_rfc3339(nbf)
                ));
            }
        }
        T::validate(self, results);
    }

    /// True if the claim has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires.is_some_and(|exp| exp < now)
    }
}
