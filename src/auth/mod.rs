use crate::state::AppState;
use axum::Router;

pub mod bearer;
pub mod claims;
pub mod clock;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod repo;
mod repo_types;
pub mod secret;

pub use bearer::extract_bearer_credential;
pub use claims::{Claims, Role};
pub use clock::{Clock, SystemClock};
pub use error::{AuthFailure, TokenError};
pub use extractors::AuthPrincipal;
pub use jwt::TokenAuthenticator;
pub use principal::{InMemoryUserLookup, Principal, UserLookup};
pub use repo::PgUserLookup;
pub use secret::SigningSecret;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
