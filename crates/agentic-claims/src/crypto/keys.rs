//! Ed25519 key pairs and the signer abstraction used by the codec.
//!
//! The codec never generates or stores key material itself. It signs
//! through the [`KeyPair`] trait; [`Ed25519KeyPair`] is the in-process
//! implementation.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::identity::{KeyRole, PublicKeyId};

/// Anything that can sign a credential.
pub trait KeyPair {
    /// The identifier the signature will be checked against.
    fn public_key(&self) -> PublicKeyId;

    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Signature;
}

/// An Ed25519 key pair bound to a role.
///
/// The signing key is zeroized on drop.
pub struct Ed25519KeyPair {
    role: KeyRole,
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair for the given role.
    pub fn generate(role: KeyRole) -> Self {
        Self {
            role,
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Generate an operator key pair.
    pub fn new_operator() -> Self {
        Self::generate(KeyRole::Operator)
    }

    /// Generate an account key pair.
    pub fn new_account() -> Self {
        Self::generate(KeyRole::Account)
    }

    /// Generate a user key pair.
    pub fn new_user() -> Self {
        Self::generate(KeyRole::User)
    }

    /// Reconstruct a key pair from a raw 32-byte seed.
    pub fn from_seed(role: KeyRole, seed: &[u8; 32]) -> Self {
        Self {
            role,
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The role this key pair signs as.
    pub fn role(&self) -> KeyRole {
        self.role
    }

    /// Return the verifying (public) key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Return the seed. Wiped when the returned value is dropped.
    pub fn seed(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }
}

impl KeyPair for Ed25519KeyPair {
    fn public_key(&self) -> PublicKeyId {
        PublicKeyId::from_verifying_key(self.role, &self.signing_key.verifying_key())
    }

    fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
