use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::Duration;
use tracing::{debug, error, info, warn};

use super::{
    claims::{Claims, Role},
    clock::{Clock, SystemClock},
    error::{AuthFailure, TokenError},
    principal::{Principal, UserLookup},
    secret::SigningSecret,
};
use crate::config::JwtConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies HS256 session tokens bound to a single process secret.
#[derive(Clone)]
pub struct TokenAuthenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenAuthenticator {
    pub fn new(secret: &SigningSecret, validity: Duration) -> Result<Self, TokenError> {
        Self::with_clock(secret, validity, Arc::new(SystemClock))
    }

    pub fn with_clock(
        secret: &SigningSecret,
        validity: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        if !validity.is_positive() {
            return Err(TokenError::InvalidArgument(format!(
                "validity window must be positive, got {}s",
                validity.whole_seconds()
            )));
        }
        let (encoding, decoding) = secret.keys()?;

        // Signature and `exp > now` are the only acceptance criteria; expiry is
        // checked against the injected clock in `parse`.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"].into_iter().map(String::from).collect();

        Ok(Self {
            encoding,
            decoding,
            validation,
            validity,
            clock,
        })
    }

    pub fn from_config(cfg: &JwtConfig) -> anyhow::Result<Self> {
        let secret = SigningSecret::derive(&cfg.secret)?;
        let validity = cfg
            .ttl_minutes
            .checked_mul(60)
            .map(Duration::seconds)
            .ok_or_else(|| anyhow::anyhow!("ttl of {} minutes overflows", cfg.ttl_minutes))?;
        let authenticator = Self::new(&secret, validity)?;
        info!(ttl_minutes = cfg.ttl_minutes, "token authenticator ready");
        Ok(authenticator)
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn issue_token(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::InvalidArgument("subject is empty".into()));
        }
        let now = self.clock.now();
        let exp = now.checked_add(self.validity).ok_or_else(|| {
            TokenError::InvalidArgument(format!(
                "validity of {}s overflows the expiration time",
                self.validity.whole_seconds()
            ))
        })?;
        let claims = Claims {
            sub: subject.to_string(),
            roles: Some(role),
            iat: Some(now.unix_timestamp()),
            exp: exp.unix_timestamp(),
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)?;
        debug!(subject, role = %role, exp = claims.exp, "jwt issued");
        Ok(token)
    }

    /// Verifies signature, structure and expiry, returning the claim set.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::InvalidArgument("token is empty".into()));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(TokenError::InvalidArgument(
                "token contains whitespace".into(),
            ));
        }

        if let Err(err) = decode_header(token) {
            return Err(classify_header(token).unwrap_or_else(|| err.into()));
        }

        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        // Accepted only while exp is strictly in the future.
        if claims.exp <= self.clock.now().unix_timestamp() {
            return Err(TokenError::Expired);
        }
        debug!(subject = %claims.sub, role = ?claims.roles, "jwt verified");
        Ok(claims)
    }

    pub fn validate(&self, token: &str) -> bool {
        match self.parse(token) {
            Ok(_) => true,
            Err(err) => {
                info!(kind = err.kind(), error = %err, "jwt rejected");
                false
            }
        }
    }

    /// Subject of a token that must still be valid. Invalid tokens yield an
    /// error, never a best-effort value.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.parse(token).map(|claims| claims.sub)
    }

    /// Verifies the token, then asks the user store for the principal. The
    /// principal's authorities come from the store, not from the `roles` claim.
    pub async fn resolve_authorization(
        &self,
        token: &str,
        users: &dyn UserLookup,
    ) -> Result<Principal, AuthFailure> {
        let subject = match self.extract_subject(token) {
            Ok(subject) => subject,
            Err(err) => {
                info!(kind = err.kind(), error = %err, "jwt rejected");
                return Err(err.into());
            }
        };

        match users.find_principal_by_subject(&subject).await {
            Ok(Some(principal)) => {
                debug!(subject = %principal.subject, authorities = ?principal.authorities, "principal resolved");
                Ok(principal)
            }
            Ok(None) => {
                warn!(subject = %subject, "token subject has no matching user");
                Err(AuthFailure::UnknownSubject(subject))
            }
            Err(e) => {
                error!(error = %e, subject = %subject, "user lookup failed");
                Err(AuthFailure::Lookup(e))
            }
        }
    }
}

/// Header that decodes as JSON but names an algorithm the library does not
/// know (`none`, custom names) is an unsupported variant, not a malformed token.
fn classify_header(token: &str) -> Option<TokenError> {
    let encoded = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let alg = header.get("alg")?.as_str()?;
    if alg.parse::<Algorithm>().is_ok() {
        return None;
    }
    Some(TokenError::UnsupportedFormat(format!("algorithm {alg}")))
}
