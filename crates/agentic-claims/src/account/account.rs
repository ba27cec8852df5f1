//! Account claims — the export-bearing credential an account issues.
//!
//! An account claim describes an account key: what it exports, what it
//! imports, which extra keys may sign on its behalf, and which user
//! credentials it has revoked. It must be self-signed by the account key;
//! one signed by any other key decodes but fails validation.

use serde::{Deserialize, Serialize};

use crate::claims::{ClaimData, Claims};
use crate::error::Result;
use crate::exports::{Export, Exports, RevocationList};
use crate::identity::{is_public_key, KeyRole, PublicKeyId};
use crate::validation::ValidationResults;

use super::import::{Import, Imports};

/// Account payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Imports::is_empty")]
    pub imports: Imports,
    #[serde(default, skip_serializing_if = "Exports::is_empty")]
    pub exports: Exports,
    /// Additional account keys allowed to issue user credentials.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signing_keys: Vec<String>,
    /// Revoked user keys.
    #[serde(default, skip_serializing_if = "RevocationList::is_empty")]
    pub revocations: RevocationList,
}

/// Claims carrying an [`Account`] payload.
pub type AccountClaims = Claims<Account>;

impl ClaimData for Account {
    const CLAIM_TYPE: &'static str = "account";

    fn issuer_roles() -> &'static [KeyRole] {
        &[KeyRole::Operator, KeyRole::Account]
    }

    fn subject_roles() -> &'static [KeyRole] {
        &[KeyRole::Account]
    }

    fn validate(claims: &Claims<Self>, results: &mut ValidationResults) {
        if !claims.subject.is_empty() && !is_public_key(&claims.subject, KeyRole::Account) {
            results.add_error(format!(
                "account subject {:?} is not an account public key",
                claims.subject
            ));
        }

        // Unsigned claims have no issuer yet.
        if !claims.issuer.is_empty() && claims.issuer != claims.subject {
            results.add_error(format!(
                "account claims must be self-signed: issuer {:?} is not the subject",
                claims.issuer
            ));
        }

        claims.data.imports.validate(results);
        claims.data.exports.validate(results);

        for key in &claims.data.signing_keys {
            if !is_public_key(key, KeyRole::Account) {
                results.add_error(format!("signing key {key:?} is not an account public key"));
            }
        }
    }
}

impl Claims<Account> {
    /// Unsigned account claims for `subject`.
    pub fn new_account(subject: &PublicKeyId) -> Self {
        Claims::new(subject.to_text(), Account::default())
    }

    /// Exports this account grants.
    pub fn exports(&self) -> &Exports {
        &self.data.exports
    }

    /// Mutable access to the exports, for revocation edits.
    pub fn exports_mut(&mut self) -> &mut Exports {
        &mut self.data.exports
    }

    /// Append an export.
    pub fn add_export(&mut self, export: Export) {
        self.data.exports.add([export]);
    }

    /// Subjects this account imports from others.
    pub fn imports(&self) -> &Imports {
        &self.data.imports
    }

    /// Append an import.
    pub fn add_import(&mut self, import: Import) {
        self.data.imports.add([import]);
    }

    /// Allow another account key to issue on this account's behalf.
    pub fn add_signing_key(&mut self, key: &PublicKeyId) {
        let text = key.to_text();
        if !self.data.signing_keys.contains(&text) {
            self.data.signing_keys.push(text);
        }
    }

    /// Was `claims` signed by this account or one of its signing keys?
    pub fn did_sign<U>(&self, claims: &Claims<U>) -> bool {
        claims.issuer == self.subject || self.data.signing_keys.contains(&claims.issuer)
    }

    /// Revoke user credentials for `principal` issued at or before `threshold`.
    pub fn revoke_at(&mut self, principal: impl Into<String>, threshold: u64) {
        self.data.revocations.revoke_at(principal, threshold);
    }

    /// Drop any revocation of `principal`.
    pub fn clear_revocation(&mut self, principal: &str) {
        self.data.revocations.clear_revocation(principal);
    }

    /// Is `principal` revoked for credentials issued at `instant`?
    pub fn is_revoked_at(&self, principal: &str, instant: u64) -> bool {
        self.data.revocations.is_revoked_at(principal, instant)
    }

    /// Is `principal` revoked right now?
    pub fn is_revoked(&self, principal: &str) -> bool {
        self.data.revocations.is_revoked(principal)
    }

    /// Is this credential revoked, judged by its subject and issue time?
    pub fn is_claim_revoked<U>(&self, claims: &Claims<U>) -> bool {
        self.is_revoked_at(&claims.subject, claims.issued_at)
    }
}

/// Decode and verify account claims.
pub fn decode_account_claims(token: &str) -> Result<AccountClaims> {
    AccountClaims::decode(token)
}
