//! AgenticClaims — self-describing signed authorization claims.
//!
//! Provides the credential codec (canonical bytes, Ed25519 signing,
//! verified decoding), a validation engine that collects severity-classified
//! findings, wildcard-aware export overlap detection, and monotonic
//! time-windowed revocation. Verification needs nothing but the credential:
//! the issuer's public key travels inside it.

pub mod account;
pub mod claims;
pub mod crypto;
pub mod error;
pub mod exports;
pub mod identity;
pub mod time;
pub mod validation;

// Re-export primary types
pub use account::{decode_account_claims, Account, AccountClaims, Import, Imports};
pub use claims::{ClaimData, Claims, ClaimsBuilder};
pub use crypto::{Ed25519KeyPair, KeyPair};
pub use error::{ClaimsError, Result};
pub use exports::{subjects_overlap, Export, ExportKind, Exports, RevocationList, Subject};
pub use identity::{KeyRole, PublicKeyId};
pub use validation::{ValidationIssue, ValidationResults};
