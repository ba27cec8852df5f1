//! Account — the export-bearing claim payload.

#[allow(clippy::module_inception)]
pub mod account;
pub mod import;

pub use account::{decode_account_claims, Account, AccountClaims};
pub use import::{Import, Imports};
