//! Ed25519 verification and base64url signature encoding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::{ClaimsError, Result};

use super::keys::KeyPair;

/// Verify an Ed25519 signature against a public key and message.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &Signature) -> Result<()> {
    verifying_key
        .verify(message, signature)
        .map_err(|_| ClaimsError::SignatureInvalid)
}

/// Sign a message and return the signature as unpadded base64url.
pub fn sign_to_base64url<K: KeyPair + ?Sized>(key_pair: &K, message: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(key_pair.sign(message).to_bytes())
}

/// Decode an unpadded base64url signature segment.
pub fn signature_from_base64url(segment: &str) -> Result<Signature> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| ClaimsError::MalformedCredential(format!("invalid signature encoding: {e}")))?;

    let array: [u8; 64] = bytes
        .try_into()
        .map_err(|_| ClaimsError::MalformedCredential("signature must be 64 bytes".into()))?;

    Ok(Signature::from_bytes(&array))
}
