//! Public key identifiers — self-describing, role-tagged Ed25519 keys.
//!
//! A `PublicKeyId` is the only form in which keys travel inside a
//! credential. It carries the raw public key, the role the key plays,
//! and a checksum, so a verifier needs no registry to recover the key.
//!
//! Text form:
//!
//! ```text
//! <prefix>_<base58(role_byte || key[32] || sha256(role_byte || key)[..4])>
//! ```

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::signing;
use crate::error::{ClaimsError, Result};

const KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;
const BINARY_LEN: usize = 1 + KEY_LEN + CHECKSUM_LEN;

/// The role a key plays in the trust hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    Operator,
    Account,
    User,
    Server,
    Cluster,
}

impl KeyRole {
    /// All roles, in tag order.
    pub const ALL: [KeyRole; 5] = [
        Self::Operator,
        Self::Account,
        Self::User,
        Self::Server,
        Self::Cluster,
    ];

    /// Text prefix used in the identifier's text form.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Operator => "op",
            Self::Account => "acct",
            Self::User => "user",
            Self::Server => "srv",
            Self::Cluster => "clus",
        }
    }

    /// Role tag byte embedded in the binary form.
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Operator => 0x01,
            Self::Account => 0x02,
            Self::User => 0x03,
            Self::Server => 0x04,
            Self::Cluster => 0x05,
        }
    }

    /// Parse a role tag byte. Unknown tags are rejected.
    pub fn from_byte(byte: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.to_byte() == byte)
            .ok_or_else(|| ClaimsError::InvalidKey(format!("unknown role tag 0x{byte:02x}")))
    }

    /// Look up a role by its text prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.prefix() == prefix)
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Operator => "operator",
            Self::Account => "account",
            Self::User => "user",
            Self::Server => "server",
            Self::Cluster => "cluster",
        };
        f.write_str(name)
    }
}

/// A decoded, checksum-verified public key identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyId {
    role: KeyRole,
    key: [u8; KEY_LEN],
}

impl PublicKeyId {
    /// Derive an identifier from a verifying key and the role it plays.
    pub fn from_verifying_key(role: KeyRole, key: &VerifyingKey) -> Self {
        Self {
            role,
            key: key.to_bytes(),
        }
    }

    /// Parse the text form. Rejects unknown prefixes, bad base58, a role
    /// tag that disagrees with the prefix, a bad checksum, and bytes that
    /// are not a valid Ed25519 point.
    pub fn parse(text: &str) -> Result<Self> {
        let (prefix, body) = text
            .split_once('_')
            .ok_or_else(|| ClaimsError::InvalidKey(format!("missing role prefix: {text:?}")))?;

        let role = KeyRole::from_prefix(prefix)
            .ok_or_else(|| ClaimsError::InvalidKey(format!("unknown role prefix: {prefix:?}")))?;

        let bytes = bs58::decode(body)
            .into_vec()
            .map_err(|e| ClaimsError::InvalidKey(format!("invalid base58 key: {e}")))?;

        if bytes.len() != BINARY_LEN {
            return Err(ClaimsError::InvalidKey(format!(
                "key identifier must be {BINARY_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let tagged = KeyRole::from_byte(bytes[0])?;
        if tagged != role {
            return Err(ClaimsError::InvalidKey(format!(
                "role tag {tagged} does not match prefix {prefix:?}"
            )));
        }

        let (payload, checksum) = bytes.split_at(1 + KEY_LEN);
        if checksum != &Sha256::digest(payload)[..CHECKSUM_LEN] {
            return Err(ClaimsError::InvalidKey("checksum mismatch".into()));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&payload[1..]);

        // Reject identifiers that cannot verify anything.
        VerifyingKey::from_bytes(&key)
            .map_err(|e| ClaimsError::InvalidKey(format!("invalid verifying key: {e}")))?;

        Ok(Self { role, key })
    }

    /// Parse the text form and require one of the given roles.
    pub fn parse_with_roles(text: &str, allowed: &[KeyRole]) -> Result<Self> {
        let id = Self::parse(text)?;
        if !allowed.contains(&id.role) {
            return Err(ClaimsError::InvalidKey(format!(
                "{} key not allowed here: {text}",
                id.role
            )));
        }
        Ok(id)
    }

    /// The role this key plays.
    pub fn role(&self) -> KeyRole {
        self.role
    }

    /// Raw public key bytes.
    pub fn key_bytes(&self) -> [u8; KEY_LEN] {
        self.key
    }

    /// Recover the Ed25519 verifying key.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.key)
            .map_err(|e| ClaimsError::InvalidKey(format!("invalid verifying key: {e}")))
    }

    /// Verify a signature made by the key this identifier names.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        signing::verify(&self.verifying_key()?, message, signature)
    }

    /// Render the text form.
    pub fn to_text(&self) -> String {
        let mut bytes = Vec::with_capacity(BINARY_LEN);
        bytes.push(self.role.to_byte());
        bytes.extend_from_slice(&self.key);
        let checksum = Sha256::digest(&bytes);
        bytes.extend_from_slice(&checksum[..CHECKSUM_LEN]);
        format!("{}_{}", self.role.prefix(), bs58::encode(bytes).into_string())
    }
}

/// Check whether `text` parses as an identifier with the given role.
pub fn is_public_key(text: &str, role: KeyRole) -> bool {
    PublicKeyId::parse_with_roles(text, &[role]).is_ok()
}

impl fmt::Display for PublicKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for PublicKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyId({})", self.to_text())
    }
}

impl FromStr for PublicKeyId {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
