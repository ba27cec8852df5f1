//! Identity — role-tagged public key identifiers.
//!
//! The identity module provides `PublicKeyId`, the self-describing form
//! in which issuers and subjects are named inside a credential.

pub mod key_id;

pub use key_id::{is_public_key, KeyRole, PublicKeyId};
