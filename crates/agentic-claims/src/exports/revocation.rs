//! Revocation ledger — time-windowed, monotonic revocation of principals.
//!
//! Each entry maps a principal (a public key identifier, or `*` for all
//! principals) to a threshold in Unix seconds. Credentials associated with
//! a timestamp at or before the threshold are revoked; anything later is
//! unaffected, so a reissued credential escapes an earlier revocation.
//!
//! Thresholds only ever move forward. Merging two ledgers keeps the later
//! threshold per principal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Principal that matches every key without an entry of its own.
pub const ALL_PRINCIPALS: &str = "*";

/// Principal → revocation threshold (Unix seconds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevocationList(BTreeMap<String, u64>);

impl RevocationList {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `principal` up to and including `threshold`.
    ///
    /// An existing threshold is only ever raised; an earlier value is
    /// ignored.
    pub fn revoke_at(&mut self, principal: impl Into<String>, threshold: u64) {
        let entry = self.0.entry(principal.into()).or_insert(threshold);
        if *entry < threshold {
            *entry = threshold;
        }
    }

    /// Revoke every principal up to and including `threshold`.
    pub fn revoke_all_at(&mut self, threshold: u64) {
        self.revoke_at(ALL_PRINCIPALS, threshold);
    }

    /// Remove the entry for `principal`. Absent entries are ignored.
    pub fn clear_revocation(&mut self, principal: &str) {
        self.0.remove(principal);
    }

    /// Is `principal` revoked for timestamps at `instant`?
    ///
    /// The principal's own entry wins; the wildcard entry applies only to
    /// principals without one.
    pub fn is_revoked_at(&self, principal: &str, instant: u64) -> bool {
        self.threshold(principal)
            .or_else(|| self.threshold(ALL_PRINCIPALS))
            .is_some_and(|threshold| instant <= threshold)
    }

    /// Is `principal` revoked right now?
    pub fn is_revoked(&self, principal: &str) -> bool {
        self.is_revoked_at(principal, crate::time::now_secs())
    }

    /// The stored threshold for exactly this principal.
    pub fn threshold(&self, principal: &str) -> Option<u64> {
        self.0.get(principal).copied()
    }

    /// Fold another ledger in, keeping the later threshold per principal.
    pub fn merge(&mut self, other: &RevocationList) {
        for (principal, &threshold) in &other.0 {
            self.revoke_at(principal.clone(), threshold);
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is revoked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in principal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(p, &t)| (p.as_str(), t))
    }
}
