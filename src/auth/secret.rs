use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};

use super::error::TokenError;

/// Process-wide HMAC secret, derived once at startup.
///
/// The configured string is base64-encoded and the encoded text is treated as a
/// base64 key, so the HMAC key bytes equal the configured bytes. Tokens issued
/// by the previous service with the same configured secret keep verifying.
#[derive(Clone)]
pub struct SigningSecret {
    encoded: String,
}

impl SigningSecret {
    pub fn derive(configured: &str) -> Result<Self, TokenError> {
        if configured.trim().is_empty() {
            return Err(TokenError::InvalidArgument("signing secret is blank".into()));
        }
        Ok(Self {
            encoded: STANDARD.encode(configured.as_bytes()),
        })
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub(crate) fn keys(&self) -> Result<(EncodingKey, DecodingKey), TokenError> {
        let encoding = EncodingKey::from_base64_secret(&self.encoded)?;
        let decoding = DecodingKey::from_base64_secret(&self.encoded)?;
        Ok((encoding, decoding))
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
