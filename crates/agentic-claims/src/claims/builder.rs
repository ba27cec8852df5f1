//! Builder for unsigned claims.

use crate::identity::PublicKeyId;

use super::{ClaimData, Claims};

/// Builder for creating claims ready to encode.
pub struct ClaimsBuilder<T> {
    subject: String,
    name: String,
    expires: Option<u64>,
    not_before: Option<u64>,
    data: T,
}

impl<T: ClaimData + Default> Default for ClaimsBuilder<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ClaimData> ClaimsBuilder<T> {
    /// Start building claims around a payload.
    pub fn new(data: T) -> Self {
        Self {
            subject: String::new(),
            name: String::new(),
            expires: None,
            not_before: None,
            data,
        }
    }

    /// Set the subject identifier.
    pub fn subject(mut self, subject: &PublicKeyId) -> Self {
        self.subject = subject.to_text();
        self
    }

    /// Set the subject from raw text, without parsing it.
    pub fn subject_text(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set a human-readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Expire at an absolute time (Unix seconds).
    pub fn expires(mut self, at: u64) -> Self {
        self.expires = Some(at);
        self
    }

    /// Expire `secs` seconds from now.
    pub fn expires_in(self, secs: u64) -> Self {
        self.expires(crate::time::now_secs().saturating_add(secs))
    }

    /// Not valid before an absolute time (Unix seconds).
    pub fn not_before(mut self, at: u64) -> Self {
        self.not_before = Some(at);
        self
    }

    /// Replace the payload.
    pub fn data(mut self, data: T) -> Self {
        self.data = data;
        self
    }

    /// Finish building.
    pub fn build(self) -> Claims<T> {
        let mut claims = Claims::new(self.subject, self.data);
        claims.name = self.name;
        claims.expires = self.expires;
        claims.not_before = self.not_before;
        claims
    }
}
