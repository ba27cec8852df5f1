//! Credential header — the fixed first segment.

use serde::{Deserialize, Serialize};

use crate::error::{ClaimsError, Result};

/// Token type written into every header.
pub const TOKEN_TYPE: &str = "JWT";
/// The only signature algorithm this codec speaks.
pub const ALGORITHM: &str = "ed25519";

const KNOWN_FIELDS: [&str; 2] = ["typ", "alg"];

/// The signed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub typ: String,
    pub alg: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: ALGORITHM.to_string(),
        }
    }
}

impl Header {
    /// Parse header JSON.
    ///
    /// Bytes that are not a JSON object, or lack `typ`/`alg`, are malformed.
    /// Extra fields or values other than the ones this codec writes are an
    /// unsupported version.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)
            .map_err(|e| ClaimsError::MalformedCredential(format!("invalid header: {e}")))?;

        if let Some(field) = map.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
            return Err(ClaimsError::UnsupportedVersion(format!(
                "unknown header field {field:?}"
            )));
        }

        let header: Header = serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| ClaimsError::MalformedCredential(format!("invalid header: {e}")))?;

        if header.typ != TOKEN_TYPE {
            return Err(ClaimsError::UnsupportedVersion(format!(
                "token type {:?}",
                header.typ
            )));
        }
        if header.alg != ALGORITHM {
            return Err(ClaimsError::UnsupportedVersion(format!(
                "algorithm {:?}",
                header.alg
            )));
        }
        Ok(header)
    }
}
