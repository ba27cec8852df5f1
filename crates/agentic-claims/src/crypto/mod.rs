//! Cryptographic primitives for AgenticClaims.
//!
//! This module provides:
//! - The `KeyPair` signer abstraction and an Ed25519 implementation
//! - Ed25519 verification and base64url signature segments

pub mod keys;
pub mod signing;

pub use keys::{Ed25519KeyPair, KeyPair};
