use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use tracing::debug;

use super::{bearer::extract_bearer_credential, error::AuthFailure, principal::Principal};
use crate::state::AppState;

/// Request filter: reads `Authorization: Bearer <token>` and resolves the
/// principal through the user store.
pub struct AuthPrincipal(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        let Some(token) = extract_bearer_credential(header) else {
            debug!("no bearer credential on request");
            return Err(AuthFailure::MissingCredential.into());
        };

        let principal = state
            .tokens
            .resolve_authorization(token, state.users.as_ref())
            .await?;
        Ok(AuthPrincipal(principal))
    }
}
