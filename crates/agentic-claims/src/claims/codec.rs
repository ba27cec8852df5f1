//! Credential codec — canonical bytes, signing, and verified decoding.
//!
//! Canonical bytes are compact JSON in struct field order; every map in a
//! payload is a `BTreeMap`, so the same claims always serialize the same
//! way. The signing input is `base64url(header) "." base64url(payload)`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::crypto::keys::KeyPair;
use crate::crypto::signing;
use crate::error::{ClaimsError, Result};
use crate::identity::PublicKeyId;

use super::header::Header;
use super::{ClaimData, Claims};

const SEGMENTS: usize = 3;

/// Sign `claims` with `key_pair`, stamping issuer, issue time, and ID.
pub fn encode<T, K>(claims: &Claims<T>, key_pair: &K) -> Result<String>
where
    T: ClaimData,
    K: KeyPair + ?Sized,
{
    encode_at(claims, key_pair, crate::time::now_secs())
}

/// Like [`encode`] with an explicit issue time.
pub fn encode_at<T, K>(claims: &Claims<T>, key_pair: &K, issued_at: u64) -> Result<String>
where
    T: ClaimData,
    K: KeyPair + ?Sized,
{
    if claims.subject.is_empty() {
        return Err(ClaimsError::Encoding("subject is required".into()));
    }
    PublicKeyId::parse_with_roles(&claims.subject, T::subject_roles()).map_err(|e| {
        ClaimsError::Encoding(format!("invalid subject {:?}: {e}", claims.subject))
    })?;

    let issuer = key_pair.public_key();
    if !T::issuer_roles().contains(&issuer.role()) {
        return Err(ClaimsError::Encoding(format!(
            "{} keys cannot issue {} claims",
            issuer.role(),
            T::CLAIM_TYPE
        )));
    }

    let mut signed = claims.clone();
    signed.issuer = issuer.to_text();
    signed.issued_at = issued_at;
    signed.claim_type = T::CLAIM_TYPE.to_string();
    signed.id = String::new();
    signed.id = claim_id(&serde_json::to_vec(&signed)?);

    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&Header::default())?);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&signed)?);
    let signing_input = format!("{header}.{payload}");
    let signature = signing::sign_to_base64url(key_pair, signing_input.as_bytes());

    log::debug!(
        "encoded {} claims {} for {}",
        T::CLAIM_TYPE,
        signed.id,
        signed.subject
    );
    Ok(format!("{signing_input}.{signature}"))
}

/// Parse and verify a credential.
///
/// Fails with `MalformedCredential` on structural damage,
/// `UnsupportedVersion` on an unknown header, `InvalidKey` when the issuer
/// cannot issue this claim type, and `SignatureInvalid` when the signature
/// does not verify. Nothing is returned unless the signature checks out.
pub fn decode<T: ClaimData>(token: &str) -> Result<Claims<T>> {
    decode_verified(token).map_err(|e| {
        log::warn!("rejected credential: {e}");
        e
    })
}

fn decode_verified<T: ClaimData>(token: &str) -> Result<Claims<T>> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != SEGMENTS {
        return Err(ClaimsError::MalformedCredential(format!(
            "expected {SEGMENTS} segments, found {}",
            parts.len()
        )));
    }

    Header::parse(&decode_segment(parts[0], "header")?)?;

    let payload = decode_segment(parts[1], "payload")?;
    let claims: Claims<T> = serde_json::from_slice(&payload)
        .map_err(|e| ClaimsError::MalformedCredential(format!("invalid payload: {e}")))?;

    if claims.claim_type != T::CLAIM_TYPE {
        return Err(ClaimsError::MalformedCredential(format!(
            "expected {} claims, found {:?}",
            T::CLAIM_TYPE,
            claims.claim_type
        )));
    }

    let issuer = PublicKeyId::parse_with_roles(&claims.issuer, T::issuer_roles())?;
    let signature = signing::signature_from_base64url(parts[2])?;
    let signing_input = &token.trim()[..parts[0].len() + 1 + parts[1].len()];
    issuer.verify(signing_input.as_bytes(), &signature)?;

    log::debug!("decoded {} claims {} from {}", T::CLAIM_TYPE, claims.id, issuer);
    Ok(claims)
}

fn decode_segment(segment: &str, what: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| ClaimsError::MalformedCredential(format!("invalid {what} encoding: {e}")))
}

/// Claim ID: base58 of the first 16 bytes of SHA-256 over the payload.
fn claim_id(payload: &[u8]) -> String {
    let hash = Sha256::digest(payload);
    bs58::encode(&hash[..16]).into_string()
}

impl<T: ClaimData> Claims<T> {
    /// Sign these claims. See [`encode`].
    pub fn encode<K: KeyPair + ?Sized>(&self, key_pair: &K) -> Result<String> {
        encode(self, key_pair)
    }

    /// Parse and verify a credential. See [`decode`].
    pub fn decode(token: &str) -> Result<Self> {
        decode(token)
    }
}
