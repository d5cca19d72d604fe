use axum::http::StatusCode;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signature does not verify")]
    SignatureInvalid,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token expired")]
    Expired,

    #[error("unsupported token format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("token rejected: {0}")]
    Unclassified(String),
}

impl TokenError {
    /// Short stable label used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SignatureInvalid => "signature_invalid",
            Self::Malformed(_) => "malformed",
            Self::Expired => "expired",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Unclassified(_) => "unclassified",
        }
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => Self::Malformed(err.to_string()),
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::UnsupportedFormat(err.to_string()),
            _ => Self::Unclassified(err.to_string()),
        }
    }
}

/// Failure to turn a presented credential into a principal.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("no user for subject {0}")]
    UnknownSubject(String),

    #[error("user lookup failed: {0:#}")]
    Lookup(anyhow::Error),
}

impl From<AuthFailure> for (StatusCode, String) {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ),
            AuthFailure::Token(TokenError::Expired) => {
                (StatusCode::UNAUTHORIZED, "Token expired".to_string())
            }
            AuthFailure::Token(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AuthFailure::UnknownSubject(_) => {
                (StatusCode::UNAUTHORIZED, "User not found".to_string())
            }
            AuthFailure::Lookup(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication unavailable".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_library_error_kinds() {
        assert_eq!(
            TokenError::from(JwtError::from(ErrorKind::InvalidSignature)),
            TokenError::SignatureInvalid
        );
        assert_eq!(
            TokenError::from(JwtError::from(ErrorKind::ExpiredSignature)),
            TokenError::Expired
        );
        assert!(matches!(
            TokenError::from(JwtError::from(ErrorKind::InvalidToken)),
            TokenError::Malformed(_)
        ));
        assert!(matches!(
            TokenError::from(JwtError::from(ErrorKind::InvalidAlgorithm)),
            TokenError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            TokenError::from(JwtError::from(ErrorKind::ImmatureSignature)),
            TokenError::Unclassified(_)
        ));
    }

    #[test]
    fn rejections_hide_internal_detail() {
        let (status, body) =
            <(StatusCode, String)>::from(AuthFailure::Token(TokenError::SignatureInvalid));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid token");

        let (status, _) = <(StatusCode, String)>::from(AuthFailure::Lookup(anyhow::anyhow!(
            "connection refused"
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
